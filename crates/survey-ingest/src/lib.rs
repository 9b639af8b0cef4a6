//! Survey data ingestion.
//!
//! Loads a survey CSV against a [`survey_model::Schema`]: the header row is
//! reconciled with the schema, every cell is converted into a bounded
//! integer, and the outcome is reported as a [`DatasetLoadAttempt`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use survey_ingest::{LoadOptions, ValidationMode, load_dataset};
//!
//! let options = LoadOptions::default().with_mode(ValidationMode::CaptureAllErrors);
//! let attempt = load_dataset(Path::new("wave1.csv"), &schema, &options);
//! for error in attempt.data_errors() {
//!     println!("{error}");
//! }
//! ```

mod convert;
mod dataset;
mod error;
mod hashing;
mod header;
mod loader;

// === Error Types ===
pub use error::{CellError, IngestError, Result};

// === Header Reconciliation ===
pub use header::{ParsedHeader, normalize_header, parse_header};

// === Cell Conversion ===
pub use convert::{convert_cell_value, convert_for_column};

// === Loading ===
pub use dataset::{DataError, DataKey, Dataset, DatasetLoadAttempt};
pub use loader::{LoadOptions, ValidationMode, load_dataset, new_dataset_from_csv};

// === File Identity ===
pub use hashing::file_sha256;
