//! Profiled source columns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse value classification of a source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferredType {
    Number,
    Email,
    Date,
    #[default]
    Text,
}

impl InferredType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Email => "email",
            Self::Date => "date",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for InferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source column derived from a parsed grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Header text, or `Column {n}` when no header is available.
    pub name: String,
    /// Zero-based position in the grid.
    pub index: usize,
    /// Up to three non-empty values, in row order.
    pub sample_values: Vec<String>,
    pub inferred_type: InferredType,
}

impl Column {
    /// Placeholder name for a column without a usable header (1-based).
    pub fn default_name(index: usize) -> String {
        format!("Column {}", index + 1)
    }
}
