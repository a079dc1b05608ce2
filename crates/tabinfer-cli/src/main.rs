//! tabinfer command-line interface.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tabinfer_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use tabinfer_cli::commands::{EXIT_PROCESSING, exit_code, run_infer, run_schema};
use tabinfer_cli::logging::{LogConfig, LogFormat, init_logging};
use tabinfer_cli::summary::{print_preview, print_type_summary};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_PROCESSING);
    }

    let result = match &cli.command {
        Command::Infer(args) => run_infer(args).map(|outcome| {
            print_type_summary(&outcome);
            if let Some(limit) = args.preview {
                print_preview(&outcome.processed, limit);
            }
        }),
        Command::Schema(args) => run_schema(args).map(|outcome| print_type_summary(&outcome)),
    };

    let code = match result {
        Ok(()) => 0,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "command failed");
            eprintln!("error: {error:#}");
            exit_code(&error)
        }
    };
    std::process::exit(code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
