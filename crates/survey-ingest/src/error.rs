//! Error types for survey data ingestion.

use std::num::ParseFloatError;
use std::path::PathBuf;

use survey_model::ModelError;
use thiserror::Error;

/// Errors that end a load attempt.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Configuration Errors ===
    /// Validation mode string is not a known mode.
    #[error("invalid schema validation mode '{0}' (expected 'fail_fast' or 'capture_all_errors')")]
    InvalidValidationMode(String),

    /// Schema failed its own consistency checks.
    #[error("invalid schema: {0}")]
    InvalidSchema(#[from] ModelError),

    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// Malformed CSV record (unequal field count, invalid UTF-8, ...).
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// The header names the org column or a schema column more than once.
    #[error("duplicate header columns in {path}: {}", quoted(.columns))]
    DuplicateHeaderColumns { path: PathBuf, columns: Vec<String> },

    // === Data Errors ===
    /// A cell failed conversion while loading in fail-fast mode.
    #[error("line {line} | column {column} | {source}")]
    Cell {
        line: u64,
        column: String,
        #[source]
        source: CellError,
    },
}

fn quoted(columns: &[String]) -> String {
    columns
        .iter()
        .map(|code| format!("'{code}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl IngestError {
    /// Maps an I/O error on `path`, separating the not-found case.
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    pub(crate) fn csv(path: &std::path::Path, err: csv::Error) -> Self {
        IngestError::Csv {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Reasons a single cell cannot become a schema value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CellError {
    /// Text that is not a number.
    #[error("value '{value}' is not numeric: {source}")]
    NotNumeric {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// NaN or infinity.
    #[error("value '{value}' is not a finite number")]
    NotFinite { value: String },

    /// A number with a fractional part where an integer is required.
    #[error("value '{value}' has a fractional part; only whole numbers are allowed")]
    FractionalValue { value: String },

    /// A whole number too large for the value domain.
    #[error("value '{value}' does not fit in a 64-bit integer")]
    IntegerOverflow { value: String },

    /// Empty cell in a column that does not allow nulls.
    #[error("empty value is not allowed")]
    NullNotAllowed,

    /// Converted value falls outside the column bounds.
    #[error("value {value} does not fit into schema bounds [{min}, {max}]")]
    OutOfBounds { value: i64, min: i64, max: i64 },

    /// Org node label could not be parsed.
    #[error("{0}")]
    InvalidOrgNode(ModelError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
