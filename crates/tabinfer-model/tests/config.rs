//! Integration tests for processing configuration.

use tabinfer_model::{ConfigError, DEFAULT_CHUNK_SIZE, DEFAULT_WORKER_COUNT, ProcessingConfig};

#[test]
fn partial_config_fills_defaults() {
    let config: ProcessingConfig = serde_json::from_str(r#"{"chunk_size": 250}"#).unwrap();
    assert_eq!(config.chunk_size, 250);
    assert_eq!(config.worker_count, DEFAULT_WORKER_COUNT);
    assert!((config.unique_ratio_threshold - 0.5).abs() < f64::EPSILON);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_config_is_default() {
    let config: ProcessingConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
}

#[test]
fn threshold_bounds_are_exclusive() {
    let config: ProcessingConfig =
        serde_json::from_str(r#"{"unique_ratio_threshold": 1.0}"#).unwrap();
    assert_eq!(config.validate(), Err(ConfigError::ThresholdOutOfRange(1.0)));
}
