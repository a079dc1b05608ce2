use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::dtype::{DType, SemanticType};
use crate::error::CategoryError;
use crate::numeric::{FloatValues, IntValues};

/// Literal written in place of every missing or invalid value.
pub const NA_MARKER: &str = "NA";

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A cleaned output cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    Text(String),
    Na,
}

impl Cell {
    pub fn is_na(&self) -> bool {
        matches!(self, Self::Na)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Na => Some(NA_MARKER),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_numeric(*v)),
            Self::DateTime(v) => write!(f, "{}", v.format(DATETIME_FORMAT)),
            Self::Text(s) => f.write_str(s),
            Self::Na => f.write_str(NA_MARKER),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
            Self::Float(_) | Self::Na => serializer.serialize_str(NA_MARKER),
            Self::DateTime(v) => serializer.collect_str(&v.format(DATETIME_FORMAT)),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Formats a floating-point number without trailing fractional zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Closed set of labels for one categorical column within one chunk.
///
/// Cells refer to labels by position. Labels are kept in sorted order as
/// observed, with later additions appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    labels: Vec<String>,
}

impl CategorySet {
    /// Builds the set of distinct labels, sorted.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        Self {
            labels: distinct.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.code_of(label).is_some()
    }

    pub fn code_of(&self, label: &str) -> Option<u32> {
        self.labels
            .iter()
            .position(|existing| existing == label)
            .and_then(|idx| u32::try_from(idx).ok())
    }

    pub fn label(&self, code: u32) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.labels.get(idx))
            .map(String::as_str)
    }

    /// Appends `label` unless already present. Returns true when added.
    pub fn add_category(&mut self, label: &str) -> bool {
        if self.contains(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    /// Code to use when filling a missing cell with `label`.
    ///
    /// # Errors
    ///
    /// Fails when `label` has not been added to the set.
    pub fn fill_code(&self, label: &str) -> Result<u32, CategoryError> {
        self.code_of(label).ok_or_else(|| CategoryError {
            label: label.to_string(),
        })
    }
}

/// Values of a column after inference; one variant per semantic type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValues {
    Integer(IntValues),
    Float(FloatValues),
    DateTime(Vec<Option<NaiveDateTime>>),
    Categorical {
        categories: CategorySet,
        codes: Vec<Option<u32>>,
    },
    Text(Vec<Option<String>>),
}

impl TypedValues {
    pub fn semantic(&self) -> SemanticType {
        match self {
            Self::Integer(_) => SemanticType::Integer,
            Self::Float(_) => SemanticType::Float,
            Self::DateTime(_) => SemanticType::DateTime,
            Self::Categorical { .. } => SemanticType::Categorical,
            Self::Text(_) => SemanticType::String,
        }
    }

    /// Storage type of the values at their current width.
    pub fn dtype(&self) -> DType {
        match self {
            Self::Integer(v) => DType::Int(v.width()),
            Self::Float(v) => DType::Float(v.width()),
            Self::DateTime(_) => DType::DateTime,
            Self::Categorical { .. } => DType::Category,
            Self::Text(_) => DType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Integer(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::DateTime(v) => v.len(),
            Self::Categorical { codes, .. } => codes.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A column that has been typed but not yet sanitized.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedColumn {
    pub name: String,
    /// Storage type the column had on entry.
    pub before: DType,
    /// Storage type after inference and downcast.
    pub after: DType,
    pub values: TypedValues,
}

/// A sanitized column: every cell is a typed scalar or [`Cell::Na`].
#[derive(Debug, Clone, PartialEq)]
pub struct CleanColumn {
    pub name: String,
    pub dtype: DType,
    /// Category set including the `NA` member, for categorical columns.
    pub categories: Option<CategorySet>,
    pub cells: Vec<Cell>,
}

impl CleanColumn {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An ordered set of equal-length cleaned columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanTable {
    pub columns: Vec<CleanColumn>,
}

impl CleanTable {
    pub fn new(columns: Vec<CleanColumn>) -> Self {
        Self { columns }
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, CleanColumn::len)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&CleanColumn> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        self.column(column).and_then(|c| c.cells.get(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_numeric_trims_fraction_only() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(0.0), "0");
    }

    #[test]
    fn category_fill_requires_membership() {
        let mut set = CategorySet::from_values(["b", "a", "b"]);
        assert_eq!(set.labels(), &["a".to_string(), "b".to_string()]);
        assert!(set.fill_code(NA_MARKER).is_err());
        assert!(set.add_category(NA_MARKER));
        assert!(!set.add_category(NA_MARKER));
        assert_eq!(set.fill_code(NA_MARKER), Ok(2));
        assert_eq!(set.label(2), Some(NA_MARKER));
    }

    #[test]
    fn cells_serialize_with_na_marker() {
        let cells = vec![
            Cell::Int(1),
            Cell::Float(10.5),
            Cell::Text("yes".to_string()),
            Cell::Na,
            Cell::Float(f64::NAN),
        ];
        let json = serde_json::to_string(&cells).expect("serialize cells");
        assert_eq!(json, r#"[1,10.5,"yes","NA","NA"]"#);
    }

    #[test]
    fn datetime_cell_serializes_iso() {
        let date = chrono::NaiveDate::from_ymd_opt(2023, 12, 31)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date");
        let json = serde_json::to_string(&Cell::DateTime(date)).expect("serialize");
        assert_eq!(json, r#""2023-12-31T00:00:00""#);
    }
}
