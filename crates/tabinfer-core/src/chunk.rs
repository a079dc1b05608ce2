//! Processing of one contiguous row range.

use polars::prelude::DataFrame;
use tabinfer_model::{CleanTable, TypeReport};
use tracing::Span;

use crate::error::Result;
use crate::infer::{downcast_column, infer_column};
use crate::raw::read_column;
use crate::sanitize::sanitize_column;

/// A contiguous row range of the raw table.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Position in submission order.
    pub index: usize,
    /// First row of the chunk within the raw table.
    pub offset: usize,
    pub frame: DataFrame,
}

/// A cleaned chunk with the types its columns resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedChunk {
    pub index: usize,
    pub table: CleanTable,
    pub report: TypeReport,
}

/// Types every column of `chunk`, downcasts numeric columns, then
/// sanitizes missing values.
///
/// # Errors
///
/// Any column failure aborts the chunk.
pub fn process_chunk(chunk: &Chunk, threshold: f64, parent: &Span) -> Result<ProcessedChunk> {
    let span = tracing::info_span!(
        parent: parent,
        "chunk",
        index = chunk.index,
        offset = chunk.offset,
        rows = chunk.frame.height()
    );
    let _guard = span.enter();

    let typed = chunk
        .frame
        .get_columns()
        .iter()
        .map(|column| read_column(column).map(|raw| infer_column(raw, threshold)))
        .collect::<Result<Vec<_>>>()?;

    let mut report = TypeReport::new();
    let mut columns = Vec::with_capacity(typed.len());
    for column in typed.into_iter().map(downcast_column) {
        tracing::info!(
            column = %column.name,
            dtype_before = %column.before,
            dtype_after = %column.after,
            "column typed"
        );
        report.push(column.name.clone(), column.before, column.after);
        columns.push(sanitize_column(column)?);
    }

    Ok(ProcessedChunk {
        index: chunk.index,
        table: CleanTable::new(columns),
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;
    use tabinfer_model::{Cell, DType, IntWidth};

    #[test]
    fn test_chunk_report_and_cells() {
        let frame = DataFrame::new(vec![
            Column::new("n".into(), [Some("1"), Some("2"), Some("x")]),
            Column::new("s".into(), [Some("a"), Some("b"), None]),
        ])
        .unwrap();
        let chunk = Chunk {
            index: 0,
            offset: 0,
            frame,
        };

        let processed = process_chunk(&chunk, 0.5, &Span::none()).unwrap();
        let n = processed.report.get("n").unwrap();
        assert_eq!(n.before, DType::Object);
        assert_eq!(n.after, DType::Int(IntWidth::I8));
        assert_eq!(processed.report.get("s").unwrap().after, DType::String);

        assert_eq!(processed.table.cell(2, "n"), Some(&Cell::Na));
        assert_eq!(processed.table.cell(2, "s"), Some(&Cell::Na));
        assert_eq!(processed.table.cell(0, "n"), Some(&Cell::Int(1)));
    }
}
