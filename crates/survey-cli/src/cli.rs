//! CLI argument definitions for the survey loader.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey-loader",
    version,
    about = "Validate and load survey CSV data against a column schema"
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

    /// Log output format.
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
    /// Load a survey CSV and report header and data problems.
    Load(LoadArgs),

    /// Validate a schema file and list its columns.
    CheckSchema(SchemaArgs),

    /// Print the SHA-256 digest of a file.
    Hash(HashArgs),
}

#[derive(Parser)]
pub struct LoadArgs {
    /// Survey data file (CSV with a header row).
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Schema file (JSON).
    #[arg(long = "schema", value_name = "FILE")]
    pub schema: PathBuf,

    /// How to handle bad cells.
    #[arg(long = "mode", value_enum, default_value = "fail_fast")]
    pub mode: ModeArg,

    /// Separator between levels of the org node column.
    #[arg(long = "org-separator", value_name = "CHAR", default_value = ".")]
    pub org_separator: char,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Schema file (JSON).
    #[arg(long = "schema", value_name = "FILE")]
    pub schema: PathBuf,
}

#[derive(Parser)]
pub struct HashArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Validation mode choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    #[value(name = "fail_fast")]
    FailFast,
    #[value(name = "capture_all_errors")]
    CaptureAllErrors,
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
