//! Survey loader CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use survey_cli::commands::{run_check_schema, run_hash, run_load};
use survey_cli::logging::{LogConfig, LogFormat, init_logging};
use survey_ingest::{LoadOptions, ValidationMode};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ModeArg};
use crate::summary::{print_load_summary, print_schema};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let exit_code = match &cli.command {
        Command::Load(args) => {
            let mode = match args.mode {
                ModeArg::FailFast => ValidationMode::FailFast,
                ModeArg::CaptureAllErrors => ValidationMode::CaptureAllErrors,
            };
            let options = LoadOptions::default()
                .with_mode(mode)
                .with_org_separator(args.org_separator);
            match run_load(&args.csv, &args.schema, options) {
                Ok(report) => {
                    print_load_summary(&report);
                    report.exit_code()
                }
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            }
        }
        Command::CheckSchema(args) => match run_check_schema(&args.schema) {
            Ok(schema) => {
                print_schema(&schema);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Hash(args) => match run_hash(&args.file) {
            Ok(digest) => {
                println!("{digest}  {}", args.file.display());
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
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
