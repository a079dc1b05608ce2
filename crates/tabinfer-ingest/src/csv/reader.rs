//! CSV file reading into raw Polars frames.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Maximum file size for table loading (500 MB default).
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size against a limit, returning the size.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<u64> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(metadata.len())
}

/// Rejects byte streams starting with a UTF-16 BOM.
///
/// A UTF-8 BOM is accepted; the CSV reader skips it.
pub fn check_encoding(prefix: &[u8], path: &Path) -> Result<()> {
    match prefix.get(0..2) {
        Some([0xFF, 0xFE]) => Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        }),
        Some([0xFE, 0xFF]) => Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        }),
        _ => Ok(()),
    }
}

/// Detect encoding from the first bytes of a file (UTF-8 only).
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    check_encoding(&buffer[..bytes_read], path)
}

/// Validate frame shape after loading.
///
/// Checks for:
/// - Empty frame (no columns or no rows)
/// - Empty column names
/// - Warns about wide datasets (>500 columns)
pub fn validate_frame_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.width() == 0 || df.height() == 0 {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    if df.width() > 500 {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "table has more than 500 columns - may impact performance"
        );
    }

    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}

fn csv_options() -> CsvReadOptions {
    // Scan every row so a late non-numeric value keeps the column as text.
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
}

fn parse_error(path: &Path, e: &PolarsError) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Reads a CSV file into a raw frame.
///
/// Columns come back as `Int64`, `Float64` or `String` depending on what
/// every value in the column parses as; blank fields are null.
pub fn read_csv_file(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;

    let df = csv_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| parse_error(path, &e))?
        .finish()
        .map_err(|e| parse_error(path, &e))?;

    validate_frame_shape(&df, path)?;
    Ok(df)
}

/// Reads CSV content already held in memory. `path` names the source in
/// errors only.
pub fn read_csv_bytes(bytes: Vec<u8>, path: &Path) -> Result<DataFrame> {
    check_encoding(&bytes, path)?;

    let df = csv_options()
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| parse_error(path, &e))?;

    validate_frame_shape(&df, path)?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_file_infers_raw_dtypes() {
        let file = create_temp_csv("id,amount,flag\n1,10.5,yes\n2,,no\n3,7,yes\n");
        let df = read_csv_file(file.path()).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 3);
        assert_eq!(df.column("id").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("amount").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("flag").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("amount").unwrap().null_count(), 1);
    }

    #[test]
    fn test_late_text_value_keeps_column_as_string() {
        let mut content = String::from("code\n");
        for i in 0..200 {
            content.push_str(&format!("{i}\n"));
        }
        content.push_str("x\n");
        let file = create_temp_csv(&content);
        let df = read_csv_file(file.path()).unwrap();

        assert_eq!(df.column("code").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_read_csv_bytes() {
        let df = read_csv_bytes(b"a,b\n1,x\n".to_vec(), Path::new("upload.csv")).unwrap();
        assert_eq!(df.height(), 1);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_header_only_is_empty() {
        let result = read_csv_bytes(b"a,b\n".to_vec(), Path::new("empty.csv"));
        assert!(matches!(result, Err(IngestError::EmptyTable { .. })));
    }

    #[test]
    fn test_utf16_rejected() {
        let result = check_encoding(&[0xFF, 0xFE, 0x61, 0x00], Path::new("u16.csv"));
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
        assert!(check_encoding(&[0xEF, 0xBB, 0xBF, b'a'], Path::new("bom.csv")).is_ok());
    }

    #[test]
    fn test_file_size_limit() {
        let file = create_temp_csv("a\n1\n");
        assert!(check_file_size(file.path(), MAX_FILE_SIZE).is_ok());
        assert!(matches!(
            check_file_size(file.path(), 1),
            Err(IngestError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_csv_file(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
