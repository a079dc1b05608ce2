//! Strict `DD/MM/YYYY` date parse strategy.

use chrono::{NaiveDate, NaiveDateTime};
use tabinfer_model::TypedValues;

use super::{Attempt, ParseAttempt};

const DAY_MONTH_YEAR: &str = "%d/%m/%Y";

/// Parses exactly `DD/MM/YYYY` (zero-padded) into a midnight timestamp.
///
/// Other layouts are misses even when they describe a valid date.
pub fn parse_day_month_year(text: &str) -> Option<NaiveDateTime> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let shape_ok = bytes.iter().enumerate().all(|(idx, b)| match idx {
        2 | 5 => *b == b'/',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(text, DAY_MONTH_YEAR)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DayMonthYearParse;

impl ParseAttempt for DayMonthYearParse {
    fn name(&self) -> &'static str {
        "day_month_year"
    }

    fn attempt(&self, values: &[Option<String>]) -> Attempt {
        let converted: Vec<Option<NaiveDateTime>> = values
            .iter()
            .map(|v| v.as_deref().and_then(parse_day_month_year))
            .collect();
        Attempt {
            success_count: converted.iter().flatten().count(),
            converted: TypedValues::DateTime(converted),
        }
    }
}
