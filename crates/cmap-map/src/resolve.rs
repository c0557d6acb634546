//! Turning suggestions into a collision-free mapping.

use std::collections::BTreeSet;

use cmap_model::{Mapping, MatchSuggestion};
use serde::{Deserialize, Serialize};

use crate::matcher::by_strength;

/// How to settle several columns suggesting the same caption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// The highest confidence wins. Ties go to the stronger evidence, then
    /// to the lower column index.
    #[default]
    HighestConfidence,
    /// The lowest column index wins regardless of confidence.
    FirstClaim,
}

impl ConflictPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighestConfidence => "highest-confidence",
            Self::FirstClaim => "first-claim",
        }
    }
}

impl std::fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving suggestions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Suggestions kept, at most one per caption and per column.
    pub applied: Vec<MatchSuggestion>,
    /// Suggestions that lost a conflict or hit an existing assignment.
    pub rejected: Vec<MatchSuggestion>,
}

/// Picks a winner for every contested caption.
///
/// Uses greedy assignment in policy order: each suggestion is accepted
/// unless its column or caption was already taken by an earlier one.
pub fn resolve(suggestions: &[MatchSuggestion], policy: ConflictPolicy) -> Resolution {
    resolve_against(&Mapping::default(), suggestions, policy)
}

/// Applies suggestions to an existing mapping.
///
/// Columns already mapped and captions already used are left untouched; the
/// suggestions aimed at them are rejected.
pub fn apply(
    mapping: &mut Mapping,
    suggestions: &[MatchSuggestion],
    policy: ConflictPolicy,
) -> Resolution {
    let resolution = resolve_against(mapping, suggestions, policy);
    for suggestion in &resolution.applied {
        // Both sides were checked free in resolve_against.
        if let Err(error) = mapping.assign(&suggestion.column_name, &suggestion.target_field) {
            tracing::warn!(%error, "skipped suggestion");
        }
    }
    resolution
}

fn resolve_against(
    mapping: &Mapping,
    suggestions: &[MatchSuggestion],
    policy: ConflictPolicy,
) -> Resolution {
    let mut ordered: Vec<&MatchSuggestion> = suggestions.iter().collect();
    match policy {
        ConflictPolicy::HighestConfidence => {
            ordered.sort_by(|a, b| by_strength(a, b).then(a.column_index.cmp(&b.column_index)));
        }
        ConflictPolicy::FirstClaim => ordered.sort_by_key(|s| s.column_index),
    }

    let mut used_columns: BTreeSet<&str> = BTreeSet::new();
    let mut used_captions: BTreeSet<&str> = BTreeSet::new();
    let mut resolution = Resolution::default();

    for suggestion in ordered {
        let column = suggestion.column_name.as_str();
        let caption = suggestion.target_field.as_str();
        let taken = mapping.is_column_mapped(column)
            || mapping.is_caption_used(caption)
            || used_columns.contains(column)
            || used_captions.contains(caption);

        if taken {
            tracing::debug!(column, caption, "rejected suggestion");
            resolution.rejected.push(suggestion.clone());
        } else {
            used_columns.insert(column);
            used_captions.insert(caption);
            resolution.applied.push(suggestion.clone());
        }
    }
    resolution
}
