//! Column profiling: names, sample values, and type inference.

use std::sync::LazyLock;

use cmap_model::{Column, Grid, InferredType};
use regex::Regex;

/// Number of sample values kept per column.
pub const SAMPLE_LIMIT: usize = 3;

/// Day/month/year dates such as `1/2/2024` or `15/06/2023`.
static SLASH_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b").expect("Invalid slash date regex")
});

/// Derives one [`Column`] per grid column.
///
/// The column count is the widest row in the grid, so data rows longer than
/// the header still produce columns (named `Column {n}`).
pub fn profile(grid: &Grid, has_header_row: bool) -> Vec<Column> {
    let width = grid.width();
    let data_start = usize::from(has_header_row);

    (0..width)
        .map(|index| {
            let name = if has_header_row {
                let header = grid.cell(0, index);
                if header.is_empty() {
                    Column::default_name(index)
                } else {
                    header.to_string()
                }
            } else {
                Column::default_name(index)
            };

            let values: Vec<&str> = (data_start..grid.len())
                .map(|row| grid.cell(row, index))
                .filter(|value| !value.trim().is_empty())
                .collect();

            let inferred_type = infer_type(&values);
            tracing::debug!(column = %name, index, %inferred_type, "profiled column");

            Column {
                name,
                index,
                sample_values: values
                    .iter()
                    .take(SAMPLE_LIMIT)
                    .map(|v| (*v).to_string())
                    .collect(),
                inferred_type,
            }
        })
        .collect()
}

/// Classifies a column from its non-empty values.
///
/// Checks run in a fixed order and the first match wins: all numeric, then
/// any `@`, then any slash date. A column with no values is text.
pub fn infer_type(values: &[&str]) -> InferredType {
    if values.is_empty() {
        return InferredType::Text;
    }
    if values.iter().all(|v| is_numeric(v)) {
        InferredType::Number
    } else if values.iter().any(|v| v.contains('@')) {
        InferredType::Email
    } else if values.iter().any(|v| SLASH_DATE_REGEX.is_match(v)) {
        InferredType::Date
    } else {
        InferredType::Text
    }
}

fn is_numeric(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok_and(f64::is_finite)
}
