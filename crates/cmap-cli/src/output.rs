//! Terminal tables for profiles, suggestions and mappings.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cmap_map::{ConfidenceLevel, Resolution, column_preview};
use cmap_model::{Column, Grid, InferredType, Mapping, MatchSuggestion};

/// Data rows shown in the mapping preview.
const PREVIEW_ROWS: usize = 3;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// One row per profiled column.
pub fn columns_table(columns: &[Column]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Samples"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for column in columns {
        table.add_row(vec![
            Cell::new(column.index),
            Cell::new(&column.name),
            type_cell(column.inferred_type),
            samples_cell(&column.sample_values),
        ]);
    }
    table
}

/// Ranked suggestions, marking which ones the resolver applied.
pub fn suggestions_table(suggestions: &[MatchSuggestion], resolution: &Resolution) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Caption"),
        header_cell("Confidence"),
        header_cell("Rule"),
        header_cell("Applied"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for suggestion in suggestions {
        let applied = resolution.applied.contains(suggestion);
        table.add_row(vec![
            Cell::new(&suggestion.column_name),
            Cell::new(&suggestion.target_field),
            confidence_cell(suggestion.confidence),
            Cell::new(&suggestion.reasoning),
            applied_cell(applied),
        ]);
    }
    table
}

/// Every column with its caption (if any) and a short value preview.
pub fn mapping_table(
    columns: &[Column],
    mapping: &Mapping,
    grid: &Grid,
    has_header_row: bool,
) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Caption"),
        header_cell("Preview"),
    ]);
    apply_table_style(&mut table);
    for column in columns {
        let caption = match mapping.target_of(&column.name) {
            Some(caption) => Cell::new(caption).fg(Color::Green),
            None => dim_cell("not mapped"),
        };
        let preview = column_preview(grid, column.index, PREVIEW_ROWS, has_header_row);
        table.add_row(vec![
            Cell::new(&column.name),
            caption,
            Cell::new(preview.join(", ")),
        ]);
    }
    table
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn type_cell(inferred_type: InferredType) -> Cell {
    let color = match inferred_type {
        InferredType::Number => Color::Cyan,
        InferredType::Email => Color::Magenta,
        InferredType::Date => Color::Blue,
        InferredType::Text => return Cell::new(inferred_type),
    };
    Cell::new(inferred_type).fg(color)
}

fn samples_cell(samples: &[String]) -> Cell {
    if samples.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(samples.join(", "))
    }
}

fn confidence_cell(confidence: f32) -> Cell {
    let color = match ConfidenceLevel::of(confidence) {
        ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::DarkYellow,
    };
    Cell::new(format!("{:.0}%", confidence * 100.0)).fg(color)
}

fn applied_cell(applied: bool) -> Cell {
    if applied {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
