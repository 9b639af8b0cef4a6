//! Loaded survey data and load outcomes.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;
use survey_model::{OrgNode, Schema};

use crate::error::{CellError, IngestError};
use crate::header::ParsedHeader;

/// Address of one converted value: the file line of its row and the column
/// code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DataKey {
    pub line: u64,
    pub code: String,
}

impl DataKey {
    pub fn new(line: u64, code: impl Into<String>) -> Self {
        Self {
            line,
            code: code.into(),
        }
    }
}

/// Survey values that passed the schema, with the org nodes they belong to.
///
/// Only rows whose every cell converted are present. Empty cells in
/// nullable columns have no entry in `data`.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub schema: Schema,
    /// Distinct org nodes in first-seen order.
    pub org_nodes: Vec<OrgNode>,
    /// Org node of each accepted row, keyed by line.
    pub row_org_nodes: BTreeMap<u64, OrgNode>,
    /// Converted values.
    pub data: BTreeMap<DataKey, i64>,
    lines: BTreeSet<u64>,
    #[serde(skip)]
    seen_org_nodes: HashSet<OrgNode>,
}

impl Dataset {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            org_nodes: Vec::new(),
            row_org_nodes: BTreeMap::new(),
            data: BTreeMap::new(),
            lines: BTreeSet::new(),
            seen_org_nodes: HashSet::new(),
        }
    }

    /// Number of accepted rows.
    pub fn row_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines of the accepted rows, ascending.
    pub fn lines(&self) -> impl Iterator<Item = u64> + '_ {
        self.lines.iter().copied()
    }

    pub fn contains_line(&self, line: u64) -> bool {
        self.lines.contains(&line)
    }

    pub fn value(&self, line: u64, code: &str) -> Option<i64> {
        self.data.get(&DataKey::new(line, code)).copied()
    }

    /// Non-null values of one column in line order.
    pub fn column_values(&self, code: &str) -> Vec<i64> {
        self.data
            .iter()
            .filter(|(key, _)| key.code == code)
            .map(|(_, value)| *value)
            .collect()
    }

    pub fn org_node_at(&self, line: u64) -> Option<&OrgNode> {
        self.row_org_nodes.get(&line)
    }

    pub(crate) fn push_row(&mut self, row: ConvertedRow) {
        let ConvertedRow {
            line,
            org_node,
            values,
        } = row;
        self.lines.insert(line);
        if let Some(node) = org_node {
            if self.seen_org_nodes.insert(node.clone()) {
                self.org_nodes.push(node.clone());
            }
            self.row_org_nodes.insert(line, node);
        }
        for (code, value) in values {
            self.data.insert(DataKey { line, code }, value);
        }
    }
}

/// One row whose cells all converted.
#[derive(Debug, Default)]
pub(crate) struct ConvertedRow {
    pub line: u64,
    pub org_node: Option<OrgNode>,
    pub values: Vec<(String, i64)>,
}

impl ConvertedRow {
    pub fn new(line: u64) -> Self {
        Self {
            line,
            ..Self::default()
        }
    }
}

/// One cell that failed validation, captured rather than raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataError {
    /// Physical line in the file; the header is line 1.
    pub line: u64,
    pub column: String,
    pub message: String,
}

impl DataError {
    pub fn new(line: u64, column: impl Into<String>, cause: &CellError) -> Self {
        Self {
            line,
            column: column.into(),
            message: cause.to_string(),
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {} | column {} | {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for DataError {}

/// Outcome of a single load call.
#[derive(Debug)]
pub enum DatasetLoadAttempt {
    /// The whole file was scanned. `data_errors` is empty in fail-fast mode
    /// and lists every rejected cell in capture-all mode.
    Succeeded {
        dataset: Dataset,
        header: ParsedHeader,
        data_errors: Vec<DataError>,
    },
    /// The load stopped on a configuration, I/O, structural or (fail-fast)
    /// cell error.
    Failed { error: IngestError },
}

impl DatasetLoadAttempt {
    pub fn failed(error: IngestError) -> Self {
        DatasetLoadAttempt::Failed { error }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, DatasetLoadAttempt::Succeeded { .. })
    }

    /// Succeeded without any captured data error.
    pub fn is_clean(&self) -> bool {
        matches!(self, DatasetLoadAttempt::Succeeded { data_errors, .. } if data_errors.is_empty())
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            DatasetLoadAttempt::Succeeded { dataset, .. } => Some(dataset),
            DatasetLoadAttempt::Failed { .. } => None,
        }
    }

    pub fn header(&self) -> Option<&ParsedHeader> {
        match self {
            DatasetLoadAttempt::Succeeded { header, .. } => Some(header),
            DatasetLoadAttempt::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&IngestError> {
        match self {
            DatasetLoadAttempt::Succeeded { .. } => None,
            DatasetLoadAttempt::Failed { error } => Some(error),
        }
    }

    pub fn data_errors(&self) -> &[DataError] {
        match self {
            DatasetLoadAttempt::Succeeded { data_errors, .. } => data_errors,
            DatasetLoadAttempt::Failed { .. } => &[],
        }
    }

    /// Splits into the dataset and captured errors, or the fatal error.
    pub fn into_result(self) -> Result<(Dataset, Vec<DataError>), IngestError> {
        match self {
            DatasetLoadAttempt::Succeeded {
                dataset,
                data_errors,
                ..
            } => Ok((dataset, data_errors)),
            DatasetLoadAttempt::Failed { error } => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::Column;

    fn schema() -> Schema {
        Schema::new(
            "OrgNode",
            vec![Column::new("Q1", "Overall", 1, 5, true, "question").unwrap()],
        )
    }

    #[test]
    fn push_row_tracks_nodes_once() {
        let mut dataset = Dataset::new(schema());
        for (line, value) in [(2, 4), (3, 5)] {
            dataset.push_row(ConvertedRow {
                line,
                org_node: Some(OrgNode::new(vec![1, 2])),
                values: vec![("Q1".to_string(), value)],
            });
        }
        dataset.push_row(ConvertedRow::new(4));

        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.org_nodes, vec![OrgNode::new(vec![1, 2])]);
        assert_eq!(dataset.value(3, "Q1"), Some(5));
        assert_eq!(dataset.value(4, "Q1"), None);
        assert!(dataset.contains_line(4));
        assert!(dataset.org_node_at(4).is_none());
        assert_eq!(dataset.column_values("Q1"), vec![4, 5]);
    }

    #[test]
    fn org_nodes_keep_first_seen_order() {
        let mut dataset = Dataset::new(schema());
        let nodes = [vec![2, 1], vec![1, 4], vec![2, 1], vec![1], vec![1, 4]];
        for (line, levels) in (2..).zip(nodes) {
            dataset.push_row(ConvertedRow {
                line,
                org_node: Some(OrgNode::new(levels)),
                values: Vec::new(),
            });
        }

        assert_eq!(
            dataset.org_nodes,
            vec![
                OrgNode::new(vec![2, 1]),
                OrgNode::new(vec![1, 4]),
                OrgNode::new(vec![1]),
            ]
        );
        assert_eq!(dataset.org_node_at(4), Some(&OrgNode::new(vec![2, 1])));
    }

    #[test]
    fn data_error_display() {
        let err = DataError::new(5, "Q1", &CellError::NullNotAllowed);
        insta::assert_snapshot!(err.to_string(), @"line 5 | column Q1 | empty value is not allowed");
    }

    #[test]
    fn failed_attempt_accessors() {
        let attempt =
            DatasetLoadAttempt::failed(IngestError::InvalidValidationMode("bogus".to_string()));
        assert!(!attempt.succeeded());
        assert!(!attempt.is_clean());
        assert!(attempt.dataset().is_none());
        assert!(attempt.header().is_none());
        assert!(attempt.data_errors().is_empty());
        assert!(attempt.error().is_some());
    }
}
