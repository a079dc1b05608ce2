//! Table loading for tabinfer.
//!
//! This crate turns CSV and spreadsheet files into raw Polars `DataFrame`s
//! that the inference core can split into chunks.
//!
//! # Features
//!
//! - **CSV Loading**: full-scan dtype detection, so raw columns arrive as
//!   `Int64`, `Float64` or untyped `String`
//! - **Spreadsheet Loading**: first worksheet of `.xlsx`/`.xls` via calamine
//! - **Validation**: extension, size limit, UTF-16 detection, empty tables
//!   and blank column names are rejected before any processing
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tabinfer_ingest::{LoadOptions, load_table};
//!
//! let loaded = load_table(Path::new("data/orders.csv"), &LoadOptions::default())?;
//! println!("{} rows", loaded.frame.height());
//! ```

mod csv;
mod error;
mod loader;
mod source;
mod spreadsheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use loader::{LoadOptions, LoadedTable, load_table, load_table_from_bytes};
pub use source::FileKind;

// === Format Readers ===
pub use csv::{
    MAX_FILE_SIZE, check_encoding, check_file_size, read_csv_bytes, read_csv_file,
    validate_encoding, validate_frame_shape,
};
pub use spreadsheet::{range_to_frame, read_spreadsheet_bytes, read_spreadsheet_file};
