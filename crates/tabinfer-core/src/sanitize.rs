//! Missing-value normalization.
//!
//! Runs after typing. Nulls and non-finite floats become [`Cell::Na`]; for
//! categorical columns the `NA` label joins the category set before any
//! cell is filled with it.

use tabinfer_model::{Cell, CleanColumn, NA_MARKER, TypedColumn, TypedValues};

use crate::error::{ProcessError, Result};

/// Converts a typed column into cleaned cells.
///
/// # Errors
///
/// Fails when a categorical fill references a label outside the column's
/// category set.
pub fn sanitize_column(column: TypedColumn) -> Result<CleanColumn> {
    let TypedColumn {
        name,
        after,
        values,
        ..
    } = column;

    let (cells, categories) = match values {
        TypedValues::Integer(ints) => {
            let cells = (0..ints.len())
                .map(|idx| ints.get(idx).map_or(Cell::Na, Cell::Int))
                .collect();
            (cells, None)
        }
        TypedValues::Float(floats) => {
            let cells = (0..floats.len())
                .map(|idx| match floats.get(idx) {
                    Some(v) if v.is_finite() => Cell::Float(v),
                    _ => Cell::Na,
                })
                .collect();
            (cells, None)
        }
        TypedValues::DateTime(dates) => {
            let cells = dates
                .into_iter()
                .map(|v| v.map_or(Cell::Na, Cell::DateTime))
                .collect();
            (cells, None)
        }
        TypedValues::Categorical {
            mut categories,
            codes,
        } => {
            categories.add_category(NA_MARKER);
            let fill = categories
                .fill_code(NA_MARKER)
                .map_err(|source| ProcessError::Fill {
                    column: name.clone(),
                    source,
                })?;
            let cells = codes
                .into_iter()
                .map(|code| {
                    let code = code.unwrap_or(fill);
                    match categories.label(code) {
                        Some(NA_MARKER) => Ok(Cell::Na),
                        Some(label) => Ok(Cell::Text(label.to_string())),
                        None => Err(ProcessError::conversion(
                            &name,
                            format_args!("category code {code} out of range"),
                        )),
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            (cells, Some(categories))
        }
        TypedValues::Text(texts) => {
            let cells = texts
                .into_iter()
                .map(|v| v.map_or(Cell::Na, Cell::Text))
                .collect();
            (cells, None)
        }
    };

    Ok(CleanColumn {
        name,
        dtype: after,
        categories,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabinfer_model::{CategorySet, DType, FloatValues, FloatWidth, IntValues, IntWidth};

    fn typed(values: TypedValues) -> TypedColumn {
        TypedColumn {
            name: "c".into(),
            before: DType::Object,
            after: values.dtype(),
            values,
        }
    }

    #[test]
    fn non_finite_floats_become_na() {
        let column = typed(TypedValues::Float(FloatValues::F64(vec![
            Some(1.5),
            Some(f64::NAN),
            Some(f64::INFINITY),
            Some(f64::NEG_INFINITY),
            None,
        ])));
        let clean = sanitize_column(column).unwrap();
        assert_eq!(
            clean.cells,
            vec![Cell::Float(1.5), Cell::Na, Cell::Na, Cell::Na, Cell::Na]
        );
        assert_eq!(clean.dtype, DType::Float(FloatWidth::F64));
    }

    #[test]
    fn null_ints_become_na() {
        let column = typed(TypedValues::Integer(IntValues::I8(vec![Some(3), None])));
        let clean = sanitize_column(column).unwrap();
        assert_eq!(clean.cells, vec![Cell::Int(3), Cell::Na]);
        assert_eq!(clean.dtype, DType::Int(IntWidth::I8));
    }

    #[test]
    fn categorical_gains_na_before_fill() {
        let categories = CategorySet::from_values(["a", "b"]);
        let column = typed(TypedValues::Categorical {
            categories,
            codes: vec![Some(0), None, Some(1)],
        });
        let clean = sanitize_column(column).unwrap();

        let categories = clean.categories.expect("categorical keeps its set");
        assert_eq!(categories.labels(), &["a", "b", NA_MARKER]);
        assert_eq!(
            clean.cells,
            vec![Cell::Text("a".into()), Cell::Na, Cell::Text("b".into())]
        );
    }

    #[test]
    fn text_nulls_become_na() {
        let column = typed(TypedValues::Text(vec![Some("x".into()), None]));
        let clean = sanitize_column(column).unwrap();
        assert_eq!(clean.cells, vec![Cell::Text("x".into()), Cell::Na]);
        assert!(clean.categories.is_none());
    }
}
