//! Lossless narrowing of numeric storage.

use tabinfer_model::{TypedColumn, TypedValues};

/// Narrows numeric values to the smallest exact width; other values pass
/// through unchanged.
pub fn downcast_values(values: TypedValues) -> TypedValues {
    match values {
        TypedValues::Integer(ints) => TypedValues::Integer(ints.downcast()),
        TypedValues::Float(floats) => TypedValues::Float(floats.downcast()),
        other => other,
    }
}

/// Applies [`downcast_values`] and refreshes the column's after-type.
pub fn downcast_column(column: TypedColumn) -> TypedColumn {
    let from = column.after;
    let values = downcast_values(column.values);
    let after = values.dtype();
    if from != after {
        tracing::debug!(column = %column.name, from = %from, to = %after, "downcast");
    }
    TypedColumn {
        name: column.name,
        before: column.before,
        after,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tabinfer_model::{DType, FloatValues, FloatWidth, IntValues, IntWidth};

    #[test]
    fn column_after_type_tracks_width() {
        let column = TypedColumn {
            name: "id".into(),
            before: DType::Int(IntWidth::I64),
            after: DType::Int(IntWidth::I64),
            values: TypedValues::Integer(IntValues::I64(vec![Some(1), Some(2), Some(3)])),
        };
        let narrowed = downcast_column(column);
        assert_eq!(narrowed.after, DType::Int(IntWidth::I8));
        assert_eq!(narrowed.before, DType::Int(IntWidth::I64));
    }

    #[test]
    fn non_numeric_values_are_untouched() {
        let values = TypedValues::Text(vec![Some("a".into())]);
        assert_eq!(downcast_values(values.clone()), values);
    }

    proptest! {
        #[test]
        fn integer_downcast_round_trips(values in prop::collection::vec(prop::option::of(any::<i64>()), 0..64)) {
            let narrowed = IntValues::I64(values.clone()).downcast();
            prop_assert_eq!(narrowed.to_i64(), values);
        }

        #[test]
        fn small_integers_fit_i8(values in prop::collection::vec(prop::option::of(-128i64..=127), 1..64)) {
            let narrowed = IntValues::I64(values).downcast();
            prop_assert_eq!(narrowed.width(), IntWidth::I8);
        }

        #[test]
        fn float_downcast_round_trips(values in prop::collection::vec(prop::option::of(any::<f64>()), 0..64)) {
            let narrowed = FloatValues::F64(values.clone()).downcast();
            let decoded = narrowed.to_f64();
            prop_assert_eq!(decoded.len(), values.len());
            for (original, decoded) in values.iter().zip(&decoded) {
                match (original, decoded) {
                    (Some(a), Some(b)) if a.is_nan() => prop_assert!(b.is_nan()),
                    (Some(a), Some(b)) => prop_assert_eq!(a.to_bits(), b.to_bits()),
                    (None, None) => {}
                    _ => prop_assert!(false, "null mask changed"),
                }
            }
        }

        #[test]
        fn f32_values_narrow(values in prop::collection::vec(prop::option::of(-1.0e6f32..1.0e6), 1..32)) {
            let widened: Vec<Option<f64>> = values.iter().map(|v| v.map(f64::from)).collect();
            let narrowed = FloatValues::F64(widened).downcast();
            prop_assert_eq!(narrowed.width(), FloatWidth::F32);
        }
    }
}
