//! Spreadsheet reading (first worksheet) into raw Polars frames.
//!
//! The first row holds column names. Each remaining column becomes
//! `Int64` when every non-empty cell is a whole number, `Float64` when every
//! non-empty cell is numeric, and `String` otherwise.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{
    Data, DataType as _, Range, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs,
};
use chrono::Timelike;
use polars::prelude::{Column, DataFrame};

use crate::csv::validate_frame_shape;
use crate::error::{IngestError, Result};

/// Reads the first worksheet of an `.xlsx`/`.xls` file.
pub fn read_spreadsheet_file(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let workbook = open_workbook_auto(path).map_err(|e| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    read_first_sheet(workbook, path)
}

/// Reads a workbook already held in memory. `path` names the source in
/// errors only.
pub fn read_spreadsheet_bytes(bytes: Vec<u8>, path: &Path) -> Result<DataFrame> {
    let workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| IngestError::Spreadsheet {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    read_first_sheet(workbook, path)
}

fn read_first_sheet<RS: Read + Seek>(mut workbook: Sheets<RS>, path: &Path) -> Result<DataFrame> {
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| IngestError::Spreadsheet {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let df = range_to_frame(&range)?;
    validate_frame_shape(&df, path)?;
    Ok(df)
}

/// Converts a cell range into a frame, first row as header.
pub fn range_to_frame(range: &Range<Data>) -> Result<DataFrame> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let names: Vec<String> = header
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    let body: Vec<&[Data]> = rows.collect();
    let empty = Data::Empty;

    let columns = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<&Data> = body
                .iter()
                .map(|row| row.get(idx).unwrap_or(&empty))
                .collect();
            build_column(name, &cells)
        })
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

fn build_column(name: &str, cells: &[&Data]) -> Column {
    let numeric = cells
        .iter()
        .all(|cell| matches!(cell, Data::Empty | Data::Int(_) | Data::Float(_)));
    let has_value = cells.iter().any(|cell| !matches!(cell, Data::Empty));

    if numeric && has_value {
        let whole: Option<Vec<Option<i64>>> =
            cells.iter().map(|cell| whole_number(cell)).collect();
        if let Some(values) = whole {
            return Column::new(name.into(), values);
        }
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| match cell {
                Data::Int(v) => Some(*v as f64),
                Data::Float(v) => Some(*v),
                _ => None,
            })
            .collect();
        return Column::new(name.into(), values);
    }

    let values: Vec<Option<String>> = cells.iter().map(|cell| cell_text(cell)).collect();
    Column::new(name.into(), values)
}

/// `Some(None)` for empty cells, `None` when the cell is not a whole number.
fn whole_number(cell: &Data) -> Option<Option<i64>> {
    match cell {
        Data::Empty => Some(None),
        Data::Int(v) => Some(Some(*v)),
        Data::Float(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => Some(Some(*v as i64)),
        _ => None,
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::DateTime(_) | Data::DateTimeIso(_) => cell.as_datetime().map(|dt| {
            if dt.num_seconds_from_midnight() == 0 {
                dt.format("%d/%m/%Y").to_string()
            } else {
                dt.format("%d/%m/%Y %H:%M:%S").to_string()
            }
        }),
        other => Some(other.to_string()),
    }
}
