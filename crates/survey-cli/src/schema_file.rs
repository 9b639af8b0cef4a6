//! Schema files.
//!
//! A schema file is JSON:
//!
//! ```json
//! {
//!   "org_node_col": "OrgNode",
//!   "columns": [
//!     {"code": "Q1", "text": "Overall", "min_value": 1, "max_value": 5,
//!      "nullable": false, "column_type": "question"}
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use survey_model::Schema;
use tracing::debug;

/// Reads, parses and validates a schema file.
pub fn load_schema_file(path: &Path) -> Result<Schema> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read schema: {}", path.display()))?;
    let schema: Schema = serde_json::from_str(&text)
        .with_context(|| format!("parse schema: {}", path.display()))?;
    schema
        .validate()
        .with_context(|| format!("validate schema: {}", path.display()))?;
    debug!(
        path = %path.display(),
        columns = schema.columns().len(),
        "schema loaded"
    );
    Ok(schema)
}
