//! Extraction of raw cell values from Polars columns.
//!
//! `String` columns are the untyped ("object") case and run the inference
//! precedence. `Int64`/`Float64` columns arrive already typed. Other integer
//! and float dtypes are widened; anything else is rendered to text.

use polars::prelude::{Column, DataType};
use tabinfer_model::{DType, FloatWidth, IntWidth};

use crate::error::{ProcessError, Result};

/// Raw values of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValues {
    /// Trimmed text; blanks are `None`.
    Text(Vec<Option<String>>),
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
}

impl RawValues {
    /// Type name the column carries on entry.
    pub fn dtype(&self) -> DType {
        match self {
            Self::Text(_) => DType::Object,
            Self::Int(_) => DType::Int(IntWidth::I64),
            Self::Float(_) => DType::Float(FloatWidth::F64),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Text(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named column of raw values.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub name: String,
    pub values: RawValues,
}

/// Reads a column into owned raw values.
///
/// # Errors
///
/// Fails with [`ProcessError::Conversion`] when the column cannot be cast
/// to one of the raw representations.
pub fn read_column(column: &Column) -> Result<RawColumn> {
    let name = column.name().to_string();
    let values = match column.dtype() {
        DataType::String => read_text(column, &name)?,
        DataType::Int64 => read_ints(column, &name)?,
        DataType::Float64 => read_floats(column, &name)?,
        dtype if dtype.is_integer() => {
            let cast = cast(column, &DataType::Int64, &name)?;
            read_ints(&cast, &name)?
        }
        dtype if dtype.is_float() => {
            let cast = cast(column, &DataType::Float64, &name)?;
            read_floats(&cast, &name)?
        }
        _ => {
            let cast = cast(column, &DataType::String, &name)?;
            read_text(&cast, &name)?
        }
    };

    Ok(RawColumn { name, values })
}

fn cast(column: &Column, target: &DataType, name: &str) -> Result<Column> {
    column
        .cast(target)
        .map_err(|e| ProcessError::conversion(name, e))
}

fn read_text(column: &Column, name: &str) -> Result<RawValues> {
    let chunked = column.str().map_err(|e| ProcessError::conversion(name, e))?;
    Ok(RawValues::Text(
        chunked.iter().map(|v| v.and_then(normalize_text)).collect(),
    ))
}

fn read_ints(column: &Column, name: &str) -> Result<RawValues> {
    let chunked = column.i64().map_err(|e| ProcessError::conversion(name, e))?;
    Ok(RawValues::Int(chunked.iter().collect()))
}

fn read_floats(column: &Column, name: &str) -> Result<RawValues> {
    let chunked = column.f64().map_err(|e| ProcessError::conversion(name, e))?;
    Ok(RawValues::Float(chunked.iter().collect()))
}

/// Trims whitespace and a leading BOM; blank text is missing.
pub fn normalize_text(value: &str) -> Option<String> {
    let trimmed = value.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
