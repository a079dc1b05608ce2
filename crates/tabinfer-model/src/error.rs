use thiserror::Error;

/// Invalid processing configuration, rejected before any chunk is dispatched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
    #[error("unique ratio threshold must be inside (0, 1), got {0}")]
    ThresholdOutOfRange(f64),
    #[error("worker count must be at least 1")]
    ZeroWorkers,
}

/// A categorical fill that referenced a label outside the category set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("category '{label}' is not a member of the category set")]
pub struct CategoryError {
    pub label: String,
}
