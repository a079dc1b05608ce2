//! Entry points that turn a file or an uploaded byte buffer into a raw table.

use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::DataFrame;

use crate::csv::{MAX_FILE_SIZE, check_file_size, read_csv_bytes, read_csv_file};
use crate::error::{IngestError, Result};
use crate::source::FileKind;
use crate::spreadsheet::{read_spreadsheet_bytes, read_spreadsheet_file};

/// Limits applied while loading.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Files larger than this are rejected before reading.
    pub max_file_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}

/// A raw table ready for type inference.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// File name or path the table came from.
    pub source: PathBuf,
    pub kind: FileKind,
    pub frame: DataFrame,
}

/// Loads a `.csv`, `.xlsx` or `.xls` file from disk.
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<LoadedTable> {
    let kind = FileKind::from_path(path)?;
    let size = check_file_size(path, options.max_file_size)?;
    let start = Instant::now();

    let frame = match kind {
        FileKind::Csv => read_csv_file(path)?,
        FileKind::Spreadsheet => read_spreadsheet_file(path)?,
    };

    tracing::info!(
        path = %path.display(),
        kind = %kind,
        size_bytes = size,
        rows = frame.height(),
        columns = frame.width(),
        duration_ms = start.elapsed().as_millis(),
        "table loaded"
    );

    Ok(LoadedTable {
        source: path.to_path_buf(),
        kind,
        frame,
    })
}

/// Loads an uploaded file held in memory; the format is taken from
/// `file_name`'s extension.
pub fn load_table_from_bytes(
    file_name: &str,
    bytes: Vec<u8>,
    options: &LoadOptions,
) -> Result<LoadedTable> {
    let source = PathBuf::from(file_name);
    let kind = FileKind::from_path(&source)?;
    let size = bytes.len() as u64;
    if size > options.max_file_size {
        return Err(IngestError::FileTooLarge {
            path: source,
            size,
            max_size: options.max_file_size,
        });
    }

    let frame = match kind {
        FileKind::Csv => read_csv_bytes(bytes, &source)?,
        FileKind::Spreadsheet => read_spreadsheet_bytes(bytes, &source)?,
    };

    tracing::info!(
        source = %source.display(),
        kind = %kind,
        size_bytes = size,
        rows = frame.height(),
        columns = frame.width(),
        "table loaded"
    );

    Ok(LoadedTable {
        source,
        kind,
        frame,
    })
}
