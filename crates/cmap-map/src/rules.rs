//! Keyword rule table for column-to-caption matching.
//!
//! Each rule pairs a condition on the target caption with evidence from the
//! column and yields a fixed confidence. Rules are evaluated in table order,
//! and the order also ranks evidence: name keywords first, then shared
//! tokens, then sample values alone.

use cmap_model::{Column, InferredType};

/// Samples shorter than this (in chars) count as name-like text.
const SHORT_TEXT_MAX: usize = 20;

/// Shared tokens must be at least this long to count.
const MIN_SHARED_TOKEN: usize = 3;

/// Name tokens marking a key column rather than a descriptive one.
const IDENTIFIER_TOKENS: &[&str] = &["id", "ref", "code"];

/// Pre-computed views of one (column, target) pair.
pub(crate) struct Candidate<'a> {
    pub column: &'a Column,
    /// Lowercased column name.
    pub name: String,
    /// Lowercased target caption.
    pub target: String,
    pub name_norm: String,
    pub target_norm: String,
}

impl<'a> Candidate<'a> {
    pub fn new(column: &'a Column, target: &str) -> Self {
        Self {
            column,
            name: column.name.to_lowercase(),
            target: target.to_lowercase(),
            name_norm: normalize_text(&column.name),
            target_norm: normalize_text(target),
        }
    }

    fn target_has(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.target.contains(k))
    }

    fn name_has(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.name.contains(k))
    }

    fn shares_token(&self) -> bool {
        self.name_norm
            .split(' ')
            .filter(|t| t.len() >= MIN_SHARED_TOKEN)
            .any(|t| self.target_norm.split(' ').any(|u| u == t))
    }

    fn is_identifier(&self) -> bool {
        self.name_norm
            .split(' ')
            .any(|t| IDENTIFIER_TOKENS.contains(&t))
    }

    fn has_short_text_sample(&self) -> bool {
        self.column.inferred_type == InferredType::Text
            && self
                .column
                .sample_values
                .iter()
                .any(|v| v.chars().count() < SHORT_TEXT_MAX)
    }
}

/// A single keyword rule.
pub(crate) struct Rule {
    pub name: &'static str,
    pub confidence: f32,
    pub applies: fn(&Candidate<'_>) -> bool,
}

pub(crate) const RULES: &[Rule] = &[
    Rule {
        name: "exact name",
        confidence: 0.95,
        applies: |c| !c.name_norm.is_empty() && c.name_norm == c.target_norm,
    },
    Rule {
        name: "email",
        confidence: 0.95,
        applies: |c| {
            c.target_has(&["email"])
                && (c.name_has(&["mail"]) || c.column.inferred_type == InferredType::Email)
        },
    },
    Rule {
        name: "forename",
        confidence: 0.9,
        applies: |c| {
            c.target_has(&["forename", "first"]) && c.name_has(&["first", "forename", "given"])
        },
    },
    Rule {
        name: "surname",
        confidence: 0.9,
        applies: |c| {
            c.target_has(&["surname", "last"]) && c.name_has(&["last", "surname", "family"])
        },
    },
    Rule {
        name: "job title",
        confidence: 0.85,
        applies: |c| {
            c.target_has(&["title", "job"]) && c.name_has(&["title", "job", "position", "role"])
        },
    },
    Rule {
        name: "manager",
        confidence: 0.85,
        applies: |c| {
            c.target_has(&["manager"]) && c.name_has(&["manager", "supervisor", "boss"])
        },
    },
    Rule {
        name: "reference",
        confidence: 0.8,
        applies: |c| c.target_has(&["reference", "id"]) && c.name_has(&["ref", "id", "code"]),
    },
    Rule {
        name: "org unit",
        confidence: 0.8,
        applies: |c| {
            c.target_has(&["org", "unit"])
                && c.name_has(&["org", "unit", "department", "dept", "division"])
        },
    },
    Rule {
        name: "shared keyword",
        confidence: 0.8,
        applies: |c| !c.is_identifier() && c.shares_token(),
    },
    Rule {
        name: "shared keyword (identifier)",
        confidence: 0.8,
        applies: |c| c.is_identifier() && c.shares_token(),
    },
    Rule {
        name: "forename (short text)",
        confidence: 0.9,
        applies: |c| c.target_has(&["forename", "first"]) && c.has_short_text_sample(),
    },
];

/// Table position of the rule named by a suggestion's reasoning.
///
/// Lower is stronger evidence. Labels naming no rule rank after every rule.
pub fn evidence_rank(reasoning: &str) -> usize {
    RULES
        .iter()
        .position(|r| r.name == reasoning)
        .unwrap_or(RULES.len())
}

/// Lowercases and replaces every non-alphanumeric run with one space.
pub fn normalize_text(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
