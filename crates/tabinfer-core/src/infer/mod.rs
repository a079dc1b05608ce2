//! Column type inference.
//!
//! Untyped columns are resolved by a fixed precedence: the first parse
//! strategy that converts at least one cell wins, and columns no strategy
//! accepts fall through to the categorical/string decision. No column is
//! scored twice.

mod categorical;
mod datetime;
mod downcast;
mod numeric;

pub use categorical::{categorize, unique_ratio};
pub use datetime::{DayMonthYearParse, parse_day_month_year};
pub use downcast::{downcast_column, downcast_values};
pub use numeric::{NumericParse, ParsedNumber, parse_number};

use tabinfer_model::{FloatValues, IntValues, SemanticType, TypedColumn, TypedValues};

use crate::raw::{RawColumn, RawValues};

/// Outcome of running one parse strategy over a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// Cells that converted to a non-null value.
    pub success_count: usize,
    /// Converted column; cells that failed to parse are null.
    pub converted: TypedValues,
}

impl Attempt {
    /// A strategy is accepted when at least one cell converted.
    pub fn accepted(&self) -> bool {
        self.success_count > 0
    }
}

/// A conversion strategy tried against an untyped column.
pub trait ParseAttempt {
    fn name(&self) -> &'static str;

    fn attempt(&self, values: &[Option<String>]) -> Attempt;
}

/// Strategies in precedence order.
const STRATEGIES: [&dyn ParseAttempt; 2] = [&NumericParse, &DayMonthYearParse];

/// Types an untyped column.
pub fn infer_text(values: &[Option<String>], threshold: f64) -> TypedValues {
    for strategy in STRATEGIES {
        let attempt = strategy.attempt(values);
        if attempt.accepted() {
            tracing::trace!(
                strategy = strategy.name(),
                parsed = attempt.success_count,
                total = values.len(),
                "parse strategy accepted"
            );
            return attempt.converted;
        }
    }
    categorize(values, threshold)
}

/// Semantic type an untyped column resolves to.
pub fn classify(values: &[Option<String>], threshold: f64) -> SemanticType {
    infer_text(values, threshold).semantic()
}

/// Types a raw column at full width. Columns that arrive numeric skip the
/// precedence rules.
pub fn infer_column(raw: RawColumn, threshold: f64) -> TypedColumn {
    let before = raw.values.dtype();
    let values = match raw.values {
        RawValues::Text(values) => infer_text(&values, threshold),
        RawValues::Int(values) => TypedValues::Integer(IntValues::I64(values)),
        RawValues::Float(values) => TypedValues::Float(FloatValues::F64(values)),
    };
    TypedColumn {
        name: raw.name,
        before,
        after: values.dtype(),
        values,
    }
}
