//! Overall mapping progress and per-column previews.

use std::fmt;

use cmap_model::{Column, Grid, Mapping};
use serde::{Deserialize, Serialize};

/// Progress of a mapping session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MappingStatus {
    /// No columns loaded.
    NoColumns,
    /// Columns loaded, nothing mapped.
    NoMappings,
    /// Some columns mapped.
    Partial { mapped: usize, total: usize },
    /// Every column mapped.
    Complete,
}

impl MappingStatus {
    pub fn of(columns: &[Column], mapping: &Mapping) -> Self {
        let total = columns.len();
        let mapped = columns
            .iter()
            .filter(|c| mapping.is_column_mapped(&c.name))
            .count();

        if total == 0 {
            Self::NoColumns
        } else if mapped == 0 {
            Self::NoMappings
        } else if mapped == total {
            Self::Complete
        } else {
            Self::Partial { mapped, total }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    pub fn message(&self) -> String {
        match self {
            Self::NoColumns => "No CSV uploaded".to_string(),
            Self::NoMappings => "No mappings created".to_string(),
            Self::Partial { mapped, total } => format!("{mapped}/{total} columns mapped"),
            Self::Complete => "All columns mapped!".to_string(),
        }
    }
}

impl fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Values of one column from the first `max_items` data rows, blanks dropped.
///
/// The blank filter runs after the row window is taken, so fewer than
/// `max_items` values may come back even when later rows have data.
pub fn column_preview(
    grid: &Grid,
    column_index: usize,
    max_items: usize,
    has_header_row: bool,
) -> Vec<&str> {
    let skip = usize::from(has_header_row);
    grid.rows()
        .iter()
        .skip(skip)
        .take(max_items)
        .filter_map(|row| row.get(column_index))
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
        .collect()
}
