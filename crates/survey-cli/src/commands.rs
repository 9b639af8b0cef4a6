//! Command implementations shared by the binary and its tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use survey_ingest::{DatasetLoadAttempt, LoadOptions, file_sha256, load_dataset};
use survey_model::Schema;
use tracing::info;

use crate::schema_file::load_schema_file;

/// Everything the `load` command reports.
#[derive(Debug)]
pub struct LoadReport {
    pub csv_path: PathBuf,
    pub sha256: String,
    pub options: LoadOptions,
    pub attempt: DatasetLoadAttempt,
}

impl LoadReport {
    /// Process exit code: 0 only for a load without any data error.
    pub fn exit_code(&self) -> i32 {
        if self.attempt.is_clean() { 0 } else { 1 }
    }
}

/// Loads `csv_path` against the schema stored in `schema_path`.
///
/// Schema and hashing problems are returned as errors; everything that
/// happens during the load itself is carried by the report's attempt.
pub fn run_load(csv_path: &Path, schema_path: &Path, options: LoadOptions) -> Result<LoadReport> {
    let schema = load_schema_file(schema_path)?;
    let sha256 =
        file_sha256(csv_path).with_context(|| format!("hash dataset: {}", csv_path.display()))?;
    info!(path = %csv_path.display(), %sha256, "loading dataset");

    let attempt = load_dataset(csv_path, &schema, &options);
    Ok(LoadReport {
        csv_path: csv_path.to_path_buf(),
        sha256,
        options,
        attempt,
    })
}

/// Loads and validates a schema file.
pub fn run_check_schema(schema_path: &Path) -> Result<Schema> {
    load_schema_file(schema_path)
}

/// Hashes a file.
pub fn run_hash(path: &Path) -> Result<String> {
    file_sha256(path).with_context(|| format!("hash file: {}", path.display()))
}
