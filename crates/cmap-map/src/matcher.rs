//! Heuristic matcher: scores columns against captions with the rule table.

use std::cmp::Ordering;

use cmap_model::{Column, MatchSuggestion};
use serde::{Deserialize, Serialize};

use crate::rules::{Candidate, RULES, evidence_rank};

/// Default threshold a best match must exceed to be suggested.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// The best rule that fired for one (column, caption) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleMatch {
    /// Name of the rule, used as the suggestion's reasoning label.
    pub rule: &'static str,
    pub confidence: f32,
    /// Position of the rule in the table; lower is stronger evidence.
    pub rank: usize,
}

impl RuleMatch {
    /// Higher confidence wins; equal confidence goes to stronger evidence.
    fn beats(&self, other: &Self) -> bool {
        self.confidence
            .total_cmp(&other.confidence)
            .then(other.rank.cmp(&self.rank))
            .is_gt()
    }
}

/// Confidence level categories for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// Below 0.85.
    Low,
    /// 0.85 up to (not including) 0.95.
    Medium,
    /// 0.95 and above.
    High,
}

impl ConfidenceLevel {
    #[must_use]
    pub fn of(confidence: f32) -> Self {
        if confidence >= 0.95 {
            Self::High
        } else if confidence >= 0.85 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Keyword matcher for column-to-caption suggestions.
///
/// Produces at most one suggestion per column. Several columns may suggest
/// the same caption; see [`crate::resolve`] for turning suggestions into a
/// collision-free mapping.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    min_confidence: f32,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

impl Matcher {
    pub fn new(min_confidence: f32) -> Self {
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Best rule for a single pair, or `None` if no rule fires.
    ///
    /// Ties keep the earlier rule in table order.
    pub fn score(&self, column: &Column, target: &str) -> Option<RuleMatch> {
        let candidate = Candidate::new(column, target);
        let mut best: Option<RuleMatch> = None;
        for (rank, rule) in RULES.iter().enumerate() {
            if !(rule.applies)(&candidate) {
                continue;
            }
            if best.is_none_or(|b| rule.confidence > b.confidence) {
                best = Some(RuleMatch {
                    rule: rule.name,
                    confidence: rule.confidence,
                    rank,
                });
            }
        }
        best
    }

    /// Best caption for one column above the threshold.
    ///
    /// Equal confidence goes to the target with stronger evidence, then to
    /// the earlier target.
    pub fn best_for<S: AsRef<str>>(
        &self,
        column: &Column,
        targets: &[S],
    ) -> Option<MatchSuggestion> {
        let mut best: Option<(&str, RuleMatch)> = None;
        for target in targets {
            let target = target.as_ref();
            let Some(found) = self.score(column, target) else {
                continue;
            };
            if best.is_none_or(|(_, b)| found.beats(&b)) {
                best = Some((target, found));
            }
        }

        let (target, found) = best?;
        if found.confidence <= self.min_confidence {
            return None;
        }
        Some(MatchSuggestion {
            column_index: column.index,
            column_name: column.name.clone(),
            target_field: target.to_string(),
            confidence: found.confidence,
            reasoning: found.rule.to_string(),
        })
    }

    /// Suggests a caption for every column that clears the threshold.
    ///
    /// Results are ranked with [`rank`].
    pub fn suggest<S: AsRef<str>>(
        &self,
        columns: &[Column],
        targets: &[S],
    ) -> Vec<MatchSuggestion> {
        let mut suggestions: Vec<MatchSuggestion> = columns
            .iter()
            .filter_map(|column| self.best_for(column, targets))
            .inspect(|s| {
                tracing::debug!(
                    column = %s.column_name,
                    target = %s.target_field,
                    confidence = s.confidence,
                    rule = %s.reasoning,
                    "suggested mapping"
                );
            })
            .collect();
        rank(&mut suggestions);
        suggestions
    }
}

/// Suggests captions with the default threshold.
pub fn suggest<S: AsRef<str>>(columns: &[Column], targets: &[S]) -> Vec<MatchSuggestion> {
    Matcher::default().suggest(columns, targets)
}

/// Orders the stronger suggestion first: higher confidence, then the rule
/// with stronger evidence.
pub fn by_strength(a: &MatchSuggestion, b: &MatchSuggestion) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| evidence_rank(&a.reasoning).cmp(&evidence_rank(&b.reasoning)))
}

/// Sorts by [`by_strength`], then ascending column index.
pub fn rank(suggestions: &mut [MatchSuggestion]) {
    suggestions.sort_by(|a, b| by_strength(a, b).then(a.column_index.cmp(&b.column_index)));
}
