//! Numeric parse strategy.

use tabinfer_model::{FloatValues, IntValues, TypedValues};

use super::{Attempt, ParseAttempt};

/// A successfully parsed number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedNumber {
    Int(i64),
    Float(f64),
}

/// Parses trimmed text as an `i64`, falling back to `f64`.
///
/// Text that parses to NaN is treated as a miss; infinities are kept.
pub fn parse_number(text: &str) -> Option<ParsedNumber> {
    if let Ok(v) = text.parse::<i64>() {
        return Some(ParsedNumber::Int(v));
    }
    text.parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .map(ParsedNumber::Float)
}

/// Converts every cell to a number; the column is `Integer` when every
/// parsed cell was an integer literal and `Float` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericParse;

impl ParseAttempt for NumericParse {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn attempt(&self, values: &[Option<String>]) -> Attempt {
        let parsed: Vec<Option<ParsedNumber>> = values
            .iter()
            .map(|v| v.as_deref().and_then(parse_number))
            .collect();
        let success_count = parsed.iter().flatten().count();
        let all_int = parsed
            .iter()
            .flatten()
            .all(|v| matches!(v, ParsedNumber::Int(_)));

        let converted = if all_int {
            TypedValues::Integer(IntValues::I64(
                parsed
                    .iter()
                    .map(|v| match v {
                        Some(ParsedNumber::Int(x)) => Some(*x),
                        _ => None,
                    })
                    .collect(),
            ))
        } else {
            TypedValues::Float(FloatValues::F64(
                parsed
                    .iter()
                    .map(|v| match v {
                        Some(ParsedNumber::Int(x)) => Some(*x as f64),
                        Some(ParsedNumber::Float(x)) => Some(*x),
                        None => None,
                    })
                    .collect(),
            ))
        };

        Attempt {
            success_count,
            converted,
        }
    }
}
