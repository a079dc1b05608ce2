//! Error types for chunk processing.

use tabinfer_model::{CategoryError, ConfigError};
use thiserror::Error;

/// Failure while typing, sanitizing or scheduling a table.
///
/// Per-cell parse misses never surface here; they become nulls. Every
/// variant aborts the whole table.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("invalid processing configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to convert column '{column}': {reason}")]
    Conversion { column: String, reason: String },

    #[error("failed to fill missing values in column '{column}': {source}")]
    Fill {
        column: String,
        #[source]
        source: CategoryError,
    },

    #[error("worker pool failed: {0}")]
    WorkerPool(String),

    #[error("chunk {chunk} cannot be merged: {reason}")]
    Merge { chunk: usize, reason: String },
}

impl ProcessError {
    pub(crate) fn conversion(column: &str, reason: impl std::fmt::Display) -> Self {
        Self::Conversion {
            column: column.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Name of the column that failed, when the failure belongs to one.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Conversion { column, .. } | Self::Fill { column, .. } => Some(column),
            Self::Config(_) | Self::WorkerPool(_) | Self::Merge { .. } => None,
        }
    }
}

/// Result type for processing operations.
pub type Result<T> = std::result::Result<T, ProcessError>;
