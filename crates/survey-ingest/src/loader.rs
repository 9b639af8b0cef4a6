//! Schema-driven CSV loading.
//!
//! A load runs in four stages: configuration checks (mode, schema, file
//! open), header reconciliation, the row scan, and assembly of the
//! [`DatasetLoadAttempt`]. Cell failures either end the load
//! ([`ValidationMode::FailFast`]) or are collected as [`DataError`]s
//! ([`ValidationMode::CaptureAllErrors`]).

use std::fmt;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use survey_model::{Column, ModelError, OrgNode, Schema};
use tracing::{debug, info, info_span, trace, warn};

use crate::convert::convert_for_column;
use crate::dataset::{ConvertedRow, DataError, Dataset, DatasetLoadAttempt};
use crate::error::{CellError, IngestError, Result};
use crate::header::{ParsedHeader, parse_header};

/// Policy for cell-level failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Abort on the first bad cell.
    #[default]
    FailFast,
    /// Scan the whole file and report every bad cell.
    CaptureAllErrors,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::FailFast => "fail_fast",
            ValidationMode::CaptureAllErrors => "capture_all_errors",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fail_fast" => Ok(ValidationMode::FailFast),
            "capture_all_errors" => Ok(ValidationMode::CaptureAllErrors),
            _ => Err(IngestError::InvalidValidationMode(s.to_string())),
        }
    }
}

/// Options controlling a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    pub mode: ValidationMode,
    /// Separator between levels in org node labels.
    pub org_separator: char,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            mode: ValidationMode::default(),
            org_separator: '.',
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_org_separator(mut self, separator: char) -> Self {
        self.org_separator = separator;
        self
    }
}

/// Loads `path` against `schema`, taking the validation mode as text.
///
/// An unknown mode fails before the file is opened.
pub fn new_dataset_from_csv(path: &Path, schema: &Schema, mode: &str) -> DatasetLoadAttempt {
    match mode.parse::<ValidationMode>() {
        Ok(mode) => load_dataset(path, schema, &LoadOptions::default().with_mode(mode)),
        Err(error) => {
            warn!(%error, "rejected validation mode");
            DatasetLoadAttempt::failed(error)
        }
    }
}

/// Loads `path` against `schema`.
///
/// The schema is validated first; the file is only opened once the
/// configuration is known to be good.
pub fn load_dataset(path: &Path, schema: &Schema, options: &LoadOptions) -> DatasetLoadAttempt {
    let span = info_span!("load_dataset", path = %path.display(), mode = %options.mode);
    let _guard = span.enter();

    match scan_file(path, schema, options) {
        Ok(ScanOutput {
            dataset,
            header,
            data_errors,
        }) => {
            info!(
                rows = dataset.row_count(),
                org_nodes = dataset.org_nodes.len(),
                data_errors = data_errors.len(),
                "dataset loaded"
            );
            DatasetLoadAttempt::Succeeded {
                dataset,
                header,
                data_errors,
            }
        }
        Err(error) => {
            warn!(%error, "dataset load failed");
            DatasetLoadAttempt::failed(error)
        }
    }
}

struct ScanOutput {
    dataset: Dataset,
    header: ParsedHeader,
    data_errors: Vec<DataError>,
}

fn scan_file(path: &Path, schema: &Schema, options: &LoadOptions) -> Result<ScanOutput> {
    schema.validate()?;
    if schema.column_by_code(schema.org_node_col()).is_ok() {
        let clash = ModelError::OrgNodeColumnIsValueColumn(schema.org_node_col().to_string());
        return Err(clash.into());
    }

    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(file);
    let mut records = reader.records();

    let header_record = match records.next() {
        Some(record) => record.map_err(|e| IngestError::csv(path, e))?,
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };
    let header = parse_header(&header_record.iter().collect::<Vec<_>>(), schema);
    check_header(path, schema, &header)?;

    let plan = column_plan(&header, schema);
    let mut scan = RowScan::new(schema, options);
    for record in records {
        let record = record.map_err(|e| IngestError::csv(path, e))?;
        let line = record.position().map_or(0, csv::Position::line);
        scan.process(line, &record, &plan)?;
    }

    let (dataset, data_errors) = scan.finish();
    Ok(ScanOutput {
        dataset,
        header,
        data_errors,
    })
}

/// Logs header discrepancies. Only a repeated org or schema column is
/// fatal, since its values could not be attributed to one position.
fn check_header(path: &Path, schema: &Schema, header: &ParsedHeader) -> Result<()> {
    let ambiguous: Vec<String> = header
        .duplicate_columns
        .iter()
        .filter(|code| {
            code.as_str() == schema.org_node_col() || schema.column_by_code(code).is_ok()
        })
        .cloned()
        .collect();
    if !ambiguous.is_empty() {
        return Err(IngestError::DuplicateHeaderColumns {
            path: path.to_path_buf(),
            columns: ambiguous,
        });
    }
    if !header.duplicate_columns.is_empty() {
        warn!(columns = ?header.duplicate_columns, "duplicate header columns are ignored");
    }
    if !header.org_col_found() {
        warn!(
            column = schema.org_node_col(),
            "org node column not found in header"
        );
    }
    if !header.missing_columns.is_empty() {
        warn!(columns = ?header.missing_columns, "schema columns missing from header");
    }
    if !header.extra_columns.is_empty() {
        warn!(columns = ?header.extra_columns, "header columns not in schema are ignored");
    }
    Ok(())
}

/// What to do with the cell at a header position.
#[derive(Debug, Clone, Copy)]
enum Slot<'a> {
    OrgNode(&'a str),
    Value(&'a Column),
    Ignored,
}

impl Slot<'_> {
    fn name(&self) -> &str {
        match self {
            Slot::OrgNode(name) => *name,
            Slot::Value(column) => column.code(),
            Slot::Ignored => "",
        }
    }
}

fn column_plan<'a>(header: &ParsedHeader, schema: &'a Schema) -> Vec<Slot<'a>> {
    header
        .index_to_code
        .iter()
        .map(|(idx, code)| {
            if header.org_col_pos == Some(*idx) {
                Slot::OrgNode(schema.org_node_col())
            } else if let Ok(column) = schema.column_by_code(code) {
                Slot::Value(column)
            } else {
                Slot::Ignored
            }
        })
        .collect()
}

/// Accumulator for one row scan.
struct RowScan<'a> {
    options: &'a LoadOptions,
    dataset: Dataset,
    errors: Vec<DataError>,
    rejected_rows: usize,
}

impl<'a> RowScan<'a> {
    fn new(schema: &Schema, options: &'a LoadOptions) -> Self {
        Self {
            options,
            dataset: Dataset::new(schema.clone()),
            errors: Vec::new(),
            rejected_rows: 0,
        }
    }

    fn process(&mut self, line: u64, record: &StringRecord, plan: &[Slot<'_>]) -> Result<()> {
        let mut row = ConvertedRow::new(line);
        let mut rejected = false;

        for (slot, raw) in plan.iter().zip(record.iter()) {
            let outcome = match slot {
                Slot::OrgNode(_) => self.convert_org_node(raw).map(|node| row.org_node = node),
                Slot::Value(column) => convert_for_column(raw, column).map(|value| {
                    if let Some(value) = value {
                        row.values.push((column.code().to_string(), value));
                    }
                }),
                Slot::Ignored => continue,
            };

            let Err(source) = outcome else {
                continue;
            };
            match self.options.mode {
                ValidationMode::FailFast => {
                    return Err(IngestError::Cell {
                        line,
                        column: slot.name().to_string(),
                        source,
                    });
                }
                ValidationMode::CaptureAllErrors => {
                    let error = DataError::new(line, slot.name(), &source);
                    debug!(%error, "captured data error");
                    self.errors.push(error);
                    rejected = true;
                }
            }
        }

        if rejected {
            self.rejected_rows += 1;
        } else {
            trace!(line, values = row.values.len(), "row accepted");
            self.dataset.push_row(row);
        }
        Ok(())
    }

    fn convert_org_node(&self, raw: &str) -> std::result::Result<Option<OrgNode>, CellError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        OrgNode::parse(raw, self.options.org_separator)
            .map(Some)
            .map_err(CellError::InvalidOrgNode)
    }

    fn finish(self) -> (Dataset, Vec<DataError>) {
        if self.rejected_rows > 0 {
            warn!(
                rejected_rows = self.rejected_rows,
                data_errors = self.errors.len(),
                "rows with data errors were left out of the dataset"
            );
        }
        (self.dataset, self.errors)
    }
}
