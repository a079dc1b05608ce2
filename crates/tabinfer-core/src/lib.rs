//! Type inference core for tabinfer.
//!
//! Takes a raw Polars `DataFrame`, types every column, normalizes missing
//! values and returns the cleaned table with a before/after type report.
//!
//! # Pipeline
//!
//! - **Schedule**: split the table into row chunks (or one chunk in
//!   single-shot mode) and run them on a bounded worker pool
//! - **Infer**: numeric, then `DD/MM/YYYY` dates, then categorical or
//!   string; numeric columns are narrowed to the smallest exact width
//! - **Sanitize**: nulls and non-finite floats become `NA`
//! - **Merge**: concatenate chunks in row order, keeping the first chunk's
//!   type report
//!
//! # Example
//!
//! ```ignore
//! use tabinfer_core::process_table;
//! use tabinfer_model::{ExecutionMode, ProcessingConfig};
//!
//! let span = tracing::info_span!("request");
//! let processed = process_table(&frame, ExecutionMode::Chunked, &ProcessingConfig::default(), &span)?;
//! println!("{}", serde_json::to_string(&processed.to_response())?);
//! ```

mod chunk;
mod error;
mod merge;
mod raw;
mod sanitize;
mod schedule;

pub mod infer;

use polars::prelude::DataFrame;
use tabinfer_model::{ExecutionMode, ProcessedTable, ProcessingConfig};
use tracing::Span;

// === Error Types ===
pub use error::{ProcessError, Result};

// === Pipeline Stages ===
pub use chunk::{Chunk, ProcessedChunk, process_chunk};
pub use merge::merge_chunks;
pub use raw::{RawColumn, RawValues, normalize_text, read_column};
pub use sanitize::sanitize_column;
pub use schedule::{partition, run_chunks, split_chunks};

// === Inference ===
pub use infer::{Attempt, ParseAttempt, classify, infer_column};

/// Validates `config`, processes every chunk and merges the results.
///
/// # Errors
///
/// Returns [`ProcessError::Config`] before any work is dispatched when the
/// configuration is invalid, and the first chunk failure otherwise.
pub fn process_table(
    frame: &DataFrame,
    mode: ExecutionMode,
    config: &ProcessingConfig,
    parent: &Span,
) -> Result<ProcessedTable> {
    config.validate()?;

    let span = tracing::info_span!(
        parent: parent,
        "process_table",
        rows = frame.height(),
        columns = frame.width(),
        mode = ?mode
    );

    let chunks = run_chunks(frame, mode, config, &span).inspect_err(|e| {
        tracing::error!(parent: &span, error = %e, "table processing failed");
    })?;
    merge_chunks(chunks, &span)
}
