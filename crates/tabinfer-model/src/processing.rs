use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::report::TypeReport;
use crate::table::{Cell, CleanTable};

/// Result of processing one raw table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedTable {
    /// Cleaned chunks concatenated in row order.
    pub table: CleanTable,
    /// Type report of the first chunk, taken as representative.
    pub report: TypeReport,
    pub chunk_count: usize,
    /// Columns whose inferred type in a later chunk differs from the report.
    pub divergent_columns: Vec<String>,
}

impl ProcessedTable {
    pub fn rows(&self) -> Rows<'_> {
        Rows { table: &self.table }
    }

    pub fn to_response(&self) -> InferenceResponse<'_> {
        InferenceResponse {
            rows: self.rows(),
            dtypes_before: self.report.before_map(),
            dtypes_after: self.report.after_map(),
        }
    }
}

/// Output document: row records plus the before/after type mappings.
#[derive(Debug, Serialize)]
pub struct InferenceResponse<'a> {
    pub rows: Rows<'a>,
    pub dtypes_before: BTreeMap<String, String>,
    pub dtypes_after: BTreeMap<String, String>,
}

/// Row-oriented view over a [`CleanTable`].
#[derive(Debug, Clone, Copy)]
pub struct Rows<'a> {
    table: &'a CleanTable,
}

impl<'a> Rows<'a> {
    pub fn len(&self) -> usize {
        self.table.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<RowRecord<'a>> {
        (index < self.len()).then_some(RowRecord {
            table: self.table,
            index,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = RowRecord<'a>> + 'a {
        let table = self.table;
        (0..table.height()).map(move |index| RowRecord { table, index })
    }
}

impl Serialize for Rows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for row in self.iter() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

/// One row, serialized as a map from column name to cell in column order.
#[derive(Debug, Clone, Copy)]
pub struct RowRecord<'a> {
    table: &'a CleanTable,
    index: usize,
}

impl<'a> RowRecord<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Cell> {
        self.table.cell(self.index, column)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&'a str, &'a Cell)> + 'a {
        let index = self.index;
        self.table
            .columns
            .iter()
            .filter_map(move |column| column.cells.get(index).map(|cell| (column.name.as_str(), cell)))
    }
}

impl Serialize for RowRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.table.width()))?;
        for (name, cell) in self.cells() {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{DType, IntWidth};
    use crate::table::CleanColumn;

    fn sample() -> ProcessedTable {
        let mut report = TypeReport::new();
        report.push("id", DType::Int(IntWidth::I64), DType::Int(IntWidth::I8));
        report.push("flag", DType::Object, DType::String);
        ProcessedTable {
            table: CleanTable::new(vec![
                CleanColumn {
                    name: "id".to_string(),
                    dtype: DType::Int(IntWidth::I8),
                    categories: None,
                    cells: vec![Cell::Int(1), Cell::Int(2)],
                },
                CleanColumn {
                    name: "flag".to_string(),
                    dtype: DType::String,
                    categories: None,
                    cells: vec![Cell::Text("yes".to_string()), Cell::Na],
                },
            ]),
            report,
            chunk_count: 1,
            divergent_columns: Vec::new(),
        }
    }

    #[test]
    fn response_keeps_column_order_in_rows() {
        let processed = sample();
        let json = serde_json::to_string(&processed.to_response()).expect("serialize");
        assert_eq!(
            json,
            r#"{"rows":[{"id":1,"flag":"yes"},{"id":2,"flag":"NA"}],"dtypes_before":{"flag":"object","id":"int64"},"dtypes_after":{"flag":"string","id":"int8"}}"#
        );
    }

    #[test]
    fn row_lookup() {
        let processed = sample();
        let rows = processed.rows();
        assert_eq!(rows.len(), 2);
        let second = rows.get(1).expect("second row");
        assert_eq!(second.get("flag"), Some(&Cell::Na));
        assert!(rows.get(2).is_none());
    }
}
