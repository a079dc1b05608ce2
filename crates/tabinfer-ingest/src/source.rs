//! Input file classification.

use std::fmt;
use std::path::Path;

use tabinfer_model::ExecutionMode;

use crate::error::{IngestError, Result};

/// Supported table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Spreadsheet,
}

impl FileKind {
    /// Classifies a file by its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xls" => Ok(Self::Spreadsheet),
            _ => Err(IngestError::UnsupportedExtension {
                path: path.to_path_buf(),
                extension: format!(".{extension}"),
            }),
        }
    }

    /// Large CSV files are split into chunks; spreadsheets are small
    /// enough to process in one pass.
    pub fn execution_mode(self) -> ExecutionMode {
        match self {
            Self::Csv => ExecutionMode::Chunked,
            Self::Spreadsheet => ExecutionMode::SingleShot,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Spreadsheet => f.write_str("spreadsheet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_extensions() {
        assert_eq!(FileKind::from_path(Path::new("a.csv")).unwrap(), FileKind::Csv);
        assert_eq!(
            FileKind::from_path(Path::new("A.XLSX")).unwrap(),
            FileKind::Spreadsheet
        );
        assert_eq!(
            FileKind::from_path(Path::new("old.xls")).unwrap(),
            FileKind::Spreadsheet
        );
    }

    #[test]
    fn rejects_other_extensions() {
        let err = FileKind::from_path(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedExtension { ref extension, .. } if extension == ".txt"
        ));
        assert!(FileKind::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn spreadsheets_run_single_shot() {
        assert_eq!(FileKind::Csv.execution_mode(), ExecutionMode::Chunked);
        assert_eq!(
            FileKind::Spreadsheet.execution_mode(),
            ExecutionMode::SingleShot
        );
    }
}
