//! Subcommand implementations.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tabinfer_core::{ProcessError, process_table};
use tabinfer_ingest::{FileKind, IngestError, LoadOptions, load_table};
use tabinfer_model::{ConfigError, ProcessedTable, ProcessingConfig};
use tracing::info_span;

use crate::cli::{InferArgs, SchemaArgs};

/// Exit code for a processing failure.
pub const EXIT_PROCESSING: i32 = 1;
/// Exit code for an unreadable file or invalid options.
pub const EXIT_INPUT: i32 = 2;

/// A typed table and where it came from.
#[derive(Debug)]
pub struct Outcome {
    pub source: PathBuf,
    pub kind: FileKind,
    pub processed: ProcessedTable,
}

/// Loads, types and writes the JSON document for `args.file`.
pub fn run_infer(args: &InferArgs) -> Result<Outcome> {
    let config = args.processing.to_config();
    let outcome = load_and_process(&args.file, &config)?;

    let response = outcome.processed.to_response();
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_document(BufWriter::new(file), &response, args.pretty)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), rows = outcome.processed.table.height(), "document written");
        }
        None => {
            write_document(io::stdout().lock(), &response, args.pretty)
                .context("failed to write document to stdout")?;
        }
    }

    Ok(outcome)
}

/// Loads and types `args.file` without writing a document.
pub fn run_schema(args: &SchemaArgs) -> Result<Outcome> {
    load_and_process(&args.file, &args.processing.to_config())
}

fn load_and_process(path: &Path, config: &ProcessingConfig) -> Result<Outcome> {
    config.validate().context("invalid processing options")?;

    let span = info_span!("file", path = %path.display());
    let loaded = span
        .in_scope(|| load_table(path, &LoadOptions::default()))
        .with_context(|| format!("failed to load {}", path.display()))?;
    let processed = process_table(&loaded.frame, loaded.kind.execution_mode(), config, &span)
        .with_context(|| format!("failed to process {}", path.display()))?;

    Ok(Outcome {
        source: loaded.source,
        kind: loaded.kind,
        processed,
    })
}

fn write_document<W: Write, T: serde::Serialize>(
    mut writer: W,
    document: &T,
    pretty: bool,
) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, document)?;
    } else {
        serde_json::to_writer(&mut writer, document)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Maps an error chain to the process exit code: load and configuration
/// failures are input errors, everything else is a processing failure.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    let input_error = error.chain().any(|cause| {
        cause.is::<IngestError>()
            || cause.is::<ConfigError>()
            || matches!(cause.downcast_ref::<ProcessError>(), Some(ProcessError::Config(_)))
    });
    if input_error {
        EXIT_INPUT
    } else {
        EXIT_PROCESSING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let load = anyhow::Error::new(IngestError::NoWorksheet {
            path: PathBuf::from("a.xlsx"),
        })
        .context("failed to load a.xlsx");
        assert_eq!(exit_code(&load), EXIT_INPUT);

        let config = anyhow::Error::new(ConfigError::ZeroChunkSize).context("invalid options");
        assert_eq!(exit_code(&config), EXIT_INPUT);

        let conversion = anyhow::Error::new(ProcessError::Conversion {
            column: "a".into(),
            reason: "boom".into(),
        });
        assert_eq!(exit_code(&conversion), EXIT_PROCESSING);
    }

    #[test]
    fn test_write_document_pretty_and_compact() {
        let value = serde_json::json!({"a": 1});
        let mut compact = Vec::new();
        write_document(&mut compact, &value, false).unwrap();
        assert_eq!(String::from_utf8(compact).unwrap(), "{\"a\":1}\n");

        let mut pretty = Vec::new();
        write_document(&mut pretty, &value, true).unwrap();
        assert!(String::from_utf8(pretty).unwrap().contains("\n  \"a\": 1"));
    }
}
