//! Chunk partitioning and dispatch.
//!
//! Chunked mode runs every chunk on a bounded rayon pool built for the
//! request; results come back indexed by submission order no matter which
//! worker finishes first. Single-shot mode processes the whole table as one
//! chunk on the calling thread.

use std::time::Instant;

use polars::prelude::DataFrame;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use tabinfer_model::{ExecutionMode, ProcessingConfig};
use tracing::Span;

use crate::chunk::{Chunk, ProcessedChunk, process_chunk};
use crate::error::{ProcessError, Result};

/// Row ranges `(offset, len)` of at most `chunk_size` rows covering
/// `height` rows in order. A zero-row table yields one empty range.
pub fn partition(height: usize, chunk_size: usize) -> Vec<(usize, usize)> {
    if height == 0 || chunk_size == 0 {
        return vec![(0, height)];
    }
    (0..height)
        .step_by(chunk_size)
        .map(|offset| (offset, chunk_size.min(height - offset)))
        .collect()
}

/// Slices `frame` into chunks of at most `chunk_size` rows.
pub fn split_chunks(frame: &DataFrame, chunk_size: usize) -> Vec<Chunk> {
    partition(frame.height(), chunk_size)
        .into_iter()
        .enumerate()
        .map(|(index, (offset, len))| Chunk {
            index,
            offset,
            frame: frame.slice(offset as i64, len),
        })
        .collect()
}

/// Processes `frame` according to `mode`, returning chunk results in row
/// order.
///
/// # Errors
///
/// The first failing chunk aborts the run; no partial results are kept.
pub fn run_chunks(
    frame: &DataFrame,
    mode: ExecutionMode,
    config: &ProcessingConfig,
    parent: &Span,
) -> Result<Vec<ProcessedChunk>> {
    let start = Instant::now();
    let threshold = config.unique_ratio_threshold;

    let results = match mode {
        ExecutionMode::SingleShot => {
            let chunk = Chunk {
                index: 0,
                offset: 0,
                frame: frame.clone(),
            };
            vec![process_chunk(&chunk, threshold, parent)?]
        }
        ExecutionMode::Chunked => {
            let chunks = split_chunks(frame, config.chunk_size);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.worker_count)
                .thread_name(|idx| format!("tabinfer-worker-{idx}"))
                .build()
                .map_err(|e| ProcessError::WorkerPool(e.to_string()))?;
            pool.install(|| {
                chunks
                    .par_iter()
                    .map(|chunk| process_chunk(chunk, threshold, parent))
                    .collect::<Result<Vec<_>>>()
            })?
        }
    };

    let workers = match mode {
        ExecutionMode::SingleShot => 1,
        ExecutionMode::Chunked => config.worker_count,
    };
    tracing::info!(
        parent: parent,
        mode = ?mode,
        chunks = results.len(),
        workers,
        duration_ms = start.elapsed().as_millis(),
        "chunks processed"
    );

    Ok(results)
}
