//! Terminal tables for type reports and row previews.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tabinfer_model::{Cell as ValueCell, DType, ProcessedTable, SemanticType};

use crate::commands::Outcome;

/// Prints the file header and type table to stderr.
pub fn print_type_summary(outcome: &Outcome) {
    let processed = &outcome.processed;
    eprintln!("File: {} ({})", outcome.source.display(), outcome.kind);
    eprintln!(
        "Rows: {}  Columns: {}  Chunks: {}",
        processed.table.height(),
        processed.table.width(),
        processed.chunk_count
    );
    eprintln!("{}", type_table(processed));
    if !processed.divergent_columns.is_empty() {
        eprintln!(
            "Note: types shown come from the first chunk; {} column(s) resolved differently later.",
            processed.divergent_columns.len()
        );
    }
}

/// Prints the first `limit` cleaned rows to stderr.
pub fn print_preview(processed: &ProcessedTable, limit: usize) {
    if limit == 0 || processed.table.height() == 0 {
        return;
    }
    eprintln!();
    eprintln!("Preview:");
    eprintln!("{}", preview_table(processed, limit));
}

/// One row per column: name, before/after storage type and semantic type.
pub fn type_table(processed: &ProcessedTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Before"),
        header_cell("After"),
        header_cell("Type"),
        header_cell("NA"),
        header_cell("Note"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    align_column(&mut table, 4, CellAlignment::Right);

    for (name, types) in processed.report.iter() {
        let na_count = processed
            .table
            .column(name)
            .map_or(0, |column| column.cells.iter().filter(|c| c.is_na()).count());
        let divergent = processed.divergent_columns.iter().any(|c| c == name);
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            dim_cell(types.before),
            dtype_cell(types.after),
            semantic_cell(types.after.semantic()),
            count_cell(na_count),
            if divergent {
                Cell::new("varies by chunk").fg(Color::Yellow)
            } else {
                dim_cell("-")
            },
        ]);
    }
    table
}

/// The first `limit` rows of the cleaned table.
pub fn preview_table(processed: &ProcessedTable, limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(
        processed
            .table
            .column_names()
            .into_iter()
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for row in processed.rows().iter().take(limit) {
        table.add_row(
            row.cells()
                .map(|(_, value)| value_cell(value))
                .collect::<Vec<_>>(),
        );
    }
    table
}

fn value_cell(value: &ValueCell) -> Cell {
    match value {
        ValueCell::Na => dim_cell(value),
        ValueCell::Int(_) | ValueCell::Float(_) => {
            Cell::new(value).set_alignment(CellAlignment::Right)
        }
        ValueCell::DateTime(_) | ValueCell::Text(_) => Cell::new(value),
    }
}

fn dtype_cell(dtype: DType) -> Cell {
    let color = match dtype.semantic() {
        Some(SemanticType::Integer | SemanticType::Float) => Color::Green,
        Some(SemanticType::DateTime) => Color::Magenta,
        Some(SemanticType::Categorical) => Color::Blue,
        Some(SemanticType::String) | None => Color::Reset,
    };
    Cell::new(dtype).fg(color)
}

fn semantic_cell(semantic: Option<SemanticType>) -> Cell {
    match semantic {
        Some(semantic) => Cell::new(semantic),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
