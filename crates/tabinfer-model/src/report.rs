use std::collections::BTreeMap;

use serde::Serialize;

use crate::dtype::DType;

/// Storage type of one column before and after inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnTypes {
    pub before: DType,
    pub after: DType,
}

/// Per-chunk record of each column's type on entry and after inference,
/// in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeReport {
    entries: Vec<(String, ColumnTypes)>,
}

impl TypeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, before: DType, after: DType) {
        self.entries
            .push((column.into(), ColumnTypes { before, after }));
    }

    pub fn get(&self, column: &str) -> Option<ColumnTypes> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, types)| *types)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnTypes)> {
        self.entries.iter().map(|(name, types)| (name.as_str(), *types))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn before_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(name, types)| (name.to_string(), types.before.name().to_string()))
            .collect()
    }

    pub fn after_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(name, types)| (name.to_string(), types.after.name().to_string()))
            .collect()
    }

    /// Columns whose after-type in `other` differs from this report.
    pub fn diverging_from(&self, other: &TypeReport) -> Vec<String> {
        self.iter()
            .filter(|(name, types)| {
                other
                    .get(name)
                    .is_some_and(|theirs| theirs.after != types.after)
            })
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::{FloatWidth, IntWidth};

    #[test]
    fn diverging_columns_compare_after_types() {
        let mut first = TypeReport::new();
        first.push("a", DType::Object, DType::Int(IntWidth::I8));
        first.push("b", DType::Object, DType::String);

        let mut second = TypeReport::new();
        second.push("a", DType::Object, DType::Category);
        second.push("b", DType::Object, DType::String);

        assert_eq!(first.diverging_from(&second), vec!["a".to_string()]);
        assert!(first.diverging_from(&first).is_empty());
    }

    #[test]
    fn get_returns_types() {
        let mut report = TypeReport::new();
        report.push(
            "x",
            DType::Float(FloatWidth::F64),
            DType::Float(FloatWidth::F32),
        );
        let types = report.get("x").expect("column present");
        assert_eq!(types.after, DType::Float(FloatWidth::F32));
        assert!(report.get("y").is_none());
    }
}
