//! Error types for the survey schema model.

use thiserror::Error;

/// Errors raised while constructing or validating schema values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    // === Column construction ===
    /// Column code is empty.
    #[error("column code must not be empty")]
    EmptyColumnCode,

    /// Column text (label) is empty.
    #[error("column text must not be empty (code '{code}')")]
    EmptyColumnText { code: String },

    /// Lower bound is above the upper bound.
    #[error("column '{code}': min value {min} is greater than max value {max}")]
    MinValueGreaterThanMaxValue { code: String, min: i64, max: i64 },

    /// Column type is not one of the supported kinds.
    #[error("invalid column type '{0}' (expected 'question' or 'demographic')")]
    InvalidColumnType(String),

    // === Schema ===
    /// Lookup by code failed.
    #[error("column '{0}' not found in schema")]
    ColumnNotFound(String),

    /// Schema does not name the org node column.
    #[error("schema org node column must not be empty")]
    EmptyOrgNodeColumn,

    /// Two or more columns share a code.
    #[error("duplicate column codes in schema: {}", .codes.join(", "))]
    DuplicateColumnCodes { codes: Vec<String> },

    /// The org node column is also declared as a value column.
    #[error("org node column '{0}' is also declared as a schema column")]
    OrgNodeColumnIsValueColumn(String),

    // === Org nodes ===
    /// A path segment could not be read as a level number.
    #[error("invalid org node string '{value}': segment '{segment}' is not a level number")]
    InvalidOrgNodeString { value: String, segment: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
