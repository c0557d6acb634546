//! Column-to-caption mapping types.
//!
//! A [`Mapping`] holds the assignments the user has accepted. A
//! [`MatchSuggestion`] is a proposal from the matcher or the assistant that
//! has not been applied yet.

use serde::{Deserialize, Serialize};

use crate::error::{MappingError, Result};

/// A suggested pairing of a source column with a caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    /// Position of the source column in the grid.
    pub column_index: usize,
    /// Source column name.
    pub column_name: String,
    /// Caption the column should be mapped onto.
    pub target_field: String,
    /// Heuristic score in `[0, 1]`.
    pub confidence: f32,
    /// Short label naming the rule that produced the score.
    pub reasoning: String,
}

/// One accepted column-to-caption assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MappingEntry {
    column: String,
    caption: String,
}

/// Accepted assignments, kept in the order they were made.
///
/// Each caption is held by at most one column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    entries: Vec<MappingEntry>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `column` onto `caption`.
    ///
    /// Re-assigning a column replaces its previous caption in place. Fails if
    /// the caption is held by a different column.
    pub fn assign(&mut self, column: &str, caption: &str) -> Result<()> {
        if let Some(holder) = self.column_for(caption)
            && holder != column
        {
            return Err(MappingError::CaptionAlreadyUsed {
                caption: caption.to_string(),
                column: holder.to_string(),
            });
        }
        match self.entries.iter_mut().find(|e| e.column == column) {
            Some(entry) => entry.caption = caption.to_string(),
            None => self.entries.push(MappingEntry {
                column: column.to_string(),
                caption: caption.to_string(),
            }),
        }
        Ok(())
    }

    /// Removes the assignment for `column`, returning its caption.
    pub fn unassign(&mut self, column: &str) -> Option<String> {
        let idx = self.entries.iter().position(|e| e.column == column)?;
        Some(self.entries.remove(idx).caption)
    }

    pub fn target_of(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.column == column)
            .map(|e| e.caption.as_str())
    }

    pub fn column_for(&self, caption: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.caption == caption)
            .map(|e| e.column.as_str())
    }

    pub fn is_column_mapped(&self, column: &str) -> bool {
        self.target_of(column).is_some()
    }

    pub fn is_caption_used(&self, caption: &str) -> bool {
        self.column_for(caption).is_some()
    }

    /// Mapped column names in assignment order.
    pub fn mapped_columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.column.as_str())
    }

    /// Columns from `columns` without an assignment, in the given order.
    pub fn unmapped_columns<'a, S: AsRef<str>>(&self, columns: &'a [S]) -> Vec<&'a str> {
        columns
            .iter()
            .map(AsRef::as_ref)
            .filter(|c| !self.is_column_mapped(c))
            .collect()
    }

    /// Captions from `captions` not yet used, in the given order.
    pub fn available_captions<'a, S: AsRef<str>>(&self, captions: &'a [S]) -> Vec<&'a str> {
        captions
            .iter()
            .map(AsRef::as_ref)
            .filter(|c| !self.is_caption_used(c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
