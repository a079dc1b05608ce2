//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tabinfer_model::ProcessingConfig;

#[derive(Parser)]
#[command(
    name = "tabinfer",
    version,
    about = "Infer column types for CSV and spreadsheet files",
    long_about = "Infer a semantic type for every column of a CSV or spreadsheet file.\n\n\
                  Columns are typed as integer, float, DD/MM/YYYY datetime, categorical\n\
                  or string; missing and invalid values are normalized to \"NA\"."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Type a file and write the cleaned rows with the type report as JSON.
    Infer(InferArgs),

    /// Print the before/after type of every column.
    Schema(SchemaArgs),
}

#[derive(Args)]
pub struct InferArgs {
    /// Input file (.csv, .xlsx or .xls).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the JSON document here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON document.
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// Print the first N cleaned rows to stderr.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,

    #[command(flatten)]
    pub processing: ProcessingArgs,
}

#[derive(Args)]
pub struct SchemaArgs {
    /// Input file (.csv, .xlsx or .xls).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub processing: ProcessingArgs,
}

/// Overrides for the processing defaults.
#[derive(Args, Default)]
pub struct ProcessingArgs {
    /// Rows per chunk for CSV input.
    #[arg(long = "chunk-size", value_name = "ROWS")]
    pub chunk_size: Option<usize>,

    /// Unique-ratio threshold below which text columns become categorical.
    #[arg(long = "threshold", value_name = "RATIO")]
    pub threshold: Option<f64>,

    /// Worker threads used for CSV chunks.
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<usize>,
}

impl ProcessingArgs {
    /// Defaults with any flags applied. Not validated.
    pub fn to_config(&self) -> ProcessingConfig {
        let mut config = ProcessingConfig::default();
        if let Some(size) = self.chunk_size {
            config = config.with_chunk_size(size);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_threshold(threshold);
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        config
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
