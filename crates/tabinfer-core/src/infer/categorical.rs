//! Categorical vs string decision for columns no parser accepted.

use std::collections::HashSet;

use tabinfer_model::{CategorySet, TypedValues};

/// Distinct non-null values over non-null values; `None` for a column with
/// no values.
pub fn unique_ratio(values: &[Option<String>]) -> Option<f64> {
    let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();
    if present.is_empty() {
        return None;
    }
    let distinct: HashSet<&str> = present.iter().copied().collect();
    Some(distinct.len() as f64 / present.len() as f64)
}

/// Builds a categorical column when the unique ratio is strictly below
/// `threshold`, otherwise keeps the values as text.
pub fn categorize(values: &[Option<String>], threshold: f64) -> TypedValues {
    match unique_ratio(values) {
        Some(ratio) if ratio < threshold => {
            let categories =
                CategorySet::from_values(values.iter().flatten().map(String::as_str));
            let codes = values
                .iter()
                .map(|v| v.as_deref().and_then(|label| categories.code_of(label)))
                .collect();
            TypedValues::Categorical { categories, codes }
        }
        _ => TypedValues::Text(values.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some((*v).to_string())).collect()
    }

    #[test]
    fn ratio_ignores_nulls() {
        let values = vec![Some("a".to_string()), None, Some("a".to_string())];
        assert_eq!(unique_ratio(&values), Some(0.5));
        assert_eq!(unique_ratio(&[None, None]), None);
        assert_eq!(unique_ratio(&cells(&["only"])), Some(1.0));
    }

    #[test]
    fn threshold_is_strict() {
        // 10 rows, 5 distinct: ratio exactly 0.5.
        let values = cells(&["a", "b", "c", "d", "e", "a", "b", "c", "d", "e"]);
        assert!(matches!(categorize(&values, 0.5), TypedValues::Text(_)));

        let values = cells(&["a", "b", "a", "b", "a"]);
        let TypedValues::Categorical { categories, codes } = categorize(&values, 0.5) else {
            panic!("expected categorical column");
        };
        assert_eq!(categories.labels(), &["a".to_string(), "b".to_string()]);
        assert_eq!(codes, vec![Some(0), Some(1), Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn single_row_is_string() {
        assert!(matches!(
            categorize(&cells(&["x"]), 0.5),
            TypedValues::Text(_)
        ));
    }
}
