//! Configuration options for table processing.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Rows per chunk when no size is given.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Unique ratio below which a text column becomes categorical.
pub const DEFAULT_UNIQUE_RATIO_THRESHOLD: f64 = 0.5;

/// Parallel chunk workers when no count is given.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// How the scheduler runs a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Split into `chunk_size` row ranges and process them on the worker pool.
    #[default]
    Chunked,
    /// Process the whole table as one chunk on the calling thread.
    SingleShot,
}

/// Options controlling type inference and chunked execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Maximum rows per chunk.
    pub chunk_size: usize,

    /// Text columns whose distinct/non-null ratio is strictly below this
    /// value are stored as categorical.
    pub unique_ratio_threshold: f64,

    /// Size of the worker pool used in chunked mode.
    pub worker_count: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            unique_ratio_threshold: DEFAULT_UNIQUE_RATIO_THRESHOLD,
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }
}

impl ProcessingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.unique_ratio_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        let threshold = self.unique_ratio_threshold;
        if !(threshold.is_finite() && threshold > 0.0 && threshold < 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(threshold));
        }
        if self.worker_count == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}
