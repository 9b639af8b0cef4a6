//! Header reconciliation against a schema.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use survey_model::{Schema, duplicates};

/// Observed header row matched against the expected schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedHeader {
    /// Position -> header code.
    pub index_to_code: BTreeMap<usize, String>,
    /// Header code -> position of its first occurrence.
    pub code_to_index: BTreeMap<String, usize>,
    /// Position of the org node column, if present.
    pub org_col_pos: Option<usize>,
    /// Schema column codes absent from the header, in schema order.
    pub missing_columns: Vec<String>,
    /// Header codes that are neither the org column nor a schema column.
    pub extra_columns: Vec<String>,
    /// Header codes that appear more than once.
    pub duplicate_columns: Vec<String>,
}

impl ParsedHeader {
    pub fn org_col_found(&self) -> bool {
        self.org_col_pos.is_some()
    }

    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.code_to_index.get(code).copied()
    }

    pub fn code_at(&self, index: usize) -> Option<&str> {
        self.index_to_code.get(&index).map(String::as_str)
    }

    /// Number of header positions.
    pub fn width(&self) -> usize {
        self.index_to_code.len()
    }

    /// Org column present and no schema column missing.
    pub fn is_complete(&self) -> bool {
        self.org_col_found() && self.missing_columns.is_empty()
    }
}

/// Trims whitespace and a leading byte-order mark from a header cell.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().trim_start_matches('\u{feff}').trim().to_string()
}

/// Reconciles a header row with `schema`.
pub fn parse_header<S: AsRef<str>>(header: &[S], schema: &Schema) -> ParsedHeader {
    let codes: Vec<String> = header.iter().map(|h| normalize_header(h.as_ref())).collect();

    let mut index_to_code = BTreeMap::new();
    let mut code_to_index = BTreeMap::new();
    for (idx, code) in codes.iter().enumerate() {
        index_to_code.insert(idx, code.clone());
        code_to_index.entry(code.clone()).or_insert(idx);
    }

    let org_col_pos = code_to_index.get(schema.org_node_col()).copied();

    let missing_columns = schema
        .columns_names()
        .into_iter()
        .filter(|code| !code_to_index.contains_key(*code))
        .map(str::to_string)
        .collect();

    let known: HashSet<&str> = schema.all_fields_names().into_iter().collect();
    let mut seen_extra = HashSet::new();
    let extra_columns = codes
        .iter()
        .filter(|code| !known.contains(code.as_str()) && seen_extra.insert(code.as_str()))
        .cloned()
        .collect();

    ParsedHeader {
        index_to_code,
        code_to_index,
        org_col_pos,
        missing_columns,
        extra_columns,
        duplicate_columns: duplicates(&codes),
    }
}
