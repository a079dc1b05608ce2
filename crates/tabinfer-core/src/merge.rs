//! Concatenation of processed chunks.
//!
//! The first chunk's type report stands for the whole table. Later chunks
//! that resolved a column differently are recorded in
//! `divergent_columns` and logged, but the report is not changed.

use tabinfer_model::{CleanTable, ProcessedTable, TypeReport};
use tracing::Span;

use crate::chunk::ProcessedChunk;
use crate::error::{ProcessError, Result};

/// Concatenates chunks in the order given.
///
/// # Errors
///
/// Fails when a chunk's columns do not line up with the first chunk's.
pub fn merge_chunks(chunks: Vec<ProcessedChunk>, parent: &Span) -> Result<ProcessedTable> {
    let chunk_count = chunks.len();
    let mut iter = chunks.into_iter();
    let Some(first) = iter.next() else {
        return Ok(ProcessedTable {
            table: CleanTable::default(),
            report: TypeReport::new(),
            chunk_count: 0,
            divergent_columns: Vec::new(),
        });
    };

    let ProcessedChunk {
        table: mut merged,
        report,
        ..
    } = first;
    let mut divergent_columns: Vec<String> = Vec::new();

    for chunk in iter {
        if chunk.table.width() != merged.width() {
            return Err(ProcessError::Merge {
                chunk: chunk.index,
                reason: format!(
                    "{} columns, expected {}",
                    chunk.table.width(),
                    merged.width()
                ),
            });
        }
        for name in report.diverging_from(&chunk.report) {
            if !divergent_columns.contains(&name) {
                divergent_columns.push(name);
            }
        }
        for (target, column) in merged.columns.iter_mut().zip(chunk.table.columns) {
            if target.name != column.name {
                return Err(ProcessError::Merge {
                    chunk: chunk.index,
                    reason: format!("column '{}' where '{}' was expected", column.name, target.name),
                });
            }
            target.cells.extend(column.cells);
        }
    }

    if !divergent_columns.is_empty() {
        tracing::warn!(
            parent: parent,
            columns = ?divergent_columns,
            "later chunks inferred different types; keeping the first chunk's report"
        );
    }

    Ok(ProcessedTable {
        table: merged,
        report,
        chunk_count,
        divergent_columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabinfer_model::{Cell, CleanColumn, DType, IntWidth};

    fn chunk(index: usize, after: DType, cells: Vec<Cell>) -> ProcessedChunk {
        let mut report = TypeReport::new();
        report.push("a", DType::Object, after);
        ProcessedChunk {
            index,
            table: CleanTable::new(vec![CleanColumn {
                name: "a".into(),
                dtype: after,
                categories: None,
                cells,
            }]),
            report,
        }
    }

    #[test]
    fn test_cells_concatenate_in_order() {
        let merged = merge_chunks(
            vec![
                chunk(0, DType::Int(IntWidth::I8), vec![Cell::Int(1), Cell::Int(2)]),
                chunk(1, DType::Int(IntWidth::I8), vec![Cell::Int(3)]),
            ],
            &Span::none(),
        )
        .unwrap();
        assert_eq!(merged.chunk_count, 2);
        assert_eq!(
            merged.table.column("a").unwrap().cells,
            vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)]
        );
        assert!(merged.divergent_columns.is_empty());
    }

    #[test]
    fn test_first_report_wins_and_divergence_is_recorded() {
        let merged = merge_chunks(
            vec![
                chunk(0, DType::Int(IntWidth::I8), vec![Cell::Int(1)]),
                chunk(1, DType::String, vec![Cell::Text("x".into())]),
            ],
            &Span::none(),
        )
        .unwrap();
        assert_eq!(
            merged.report.get("a").unwrap().after,
            DType::Int(IntWidth::I8)
        );
        assert_eq!(merged.divergent_columns, vec!["a".to_string()]);
        assert_eq!(merged.table.column("a").unwrap().dtype, DType::Int(IntWidth::I8));
    }

    #[test]
    fn test_misaligned_chunk_is_rejected() {
        let mut other = chunk(1, DType::String, vec![Cell::Na]);
        other.table.columns[0].name = "b".into();
        let result = merge_chunks(
            vec![chunk(0, DType::String, vec![Cell::Na]), other],
            &Span::none(),
        );
        assert!(matches!(result, Err(ProcessError::Merge { chunk: 1, .. })));
    }

    #[test]
    fn test_no_chunks() {
        let merged = merge_chunks(Vec::new(), &Span::none()).unwrap();
        assert_eq!(merged.table.height(), 0);
        assert!(merged.report.is_empty());
    }
}
