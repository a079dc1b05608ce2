//! Data model shared by the tabinfer crates.
//!
//! Raw tables live in Polars `DataFrame`s and are owned by the ingest and
//! core crates. This crate holds everything that exists after typing:
//! semantic types and storage widths, typed columns, cleaned cells,
//! per-chunk category sets, type reports and the processing configuration.

pub mod dtype;
pub mod error;
pub mod numeric;
pub mod options;
pub mod processing;
pub mod report;
pub mod table;

pub use dtype::{DType, FloatWidth, IntWidth, SemanticType};
pub use error::{CategoryError, ConfigError};
pub use numeric::{FloatValues, IntValues};
pub use options::{
    DEFAULT_CHUNK_SIZE, DEFAULT_UNIQUE_RATIO_THRESHOLD, DEFAULT_WORKER_COUNT, ExecutionMode,
    ProcessingConfig,
};
pub use processing::{InferenceResponse, ProcessedTable, RowRecord, Rows};
pub use report::{ColumnTypes, TypeReport};
pub use table::{
    CategorySet, Cell, CleanColumn, CleanTable, NA_MARKER, TypedColumn, TypedValues,
    format_numeric,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_maps_use_type_names() {
        let mut report = TypeReport::new();
        report.push("id", DType::Int(IntWidth::I64), DType::Int(IntWidth::I8));
        report.push("flag", DType::Object, DType::String);

        let before = report.before_map();
        let after = report.after_map();
        assert_eq!(before.get("id").map(String::as_str), Some("int64"));
        assert_eq!(after.get("id").map(String::as_str), Some("int8"));
        assert_eq!(before.get("flag").map(String::as_str), Some("object"));
        assert_eq!(after.get("flag").map(String::as_str), Some("string"));
    }

    #[test]
    fn default_config_is_valid() {
        let config = ProcessingConfig::default();
        assert_eq!(config.chunk_size, 10_000);
        assert_eq!(config.worker_count, 4);
        assert!((config.unique_ratio_threshold - 0.5).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }
}
