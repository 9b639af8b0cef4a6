//! Expected shape of a survey table.

use serde::{Deserialize, Serialize};

use crate::column::{Column, ColumnType};
use crate::error::{ModelError, Result};
use crate::util::duplicates;

/// Declared survey dataset: the org node column plus the ordered value
/// columns.
///
/// Construction does not validate; call [`Schema::validate`] (or
/// [`validate_schema`]) before loading data against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    org_node_col: String,
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(org_node_col: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            org_node_col: org_node_col.into(),
            columns,
        }
    }

    /// Name of the column holding the organizational path.
    pub fn org_node_col(&self) -> &str {
        &self.org_node_col
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_by_code(&self, code: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|column| column.code() == code)
            .ok_or_else(|| ModelError::ColumnNotFound(code.to_string()))
    }

    pub fn questions(&self) -> Vec<&Column> {
        self.columns_of_type(ColumnType::Question)
    }

    pub fn demographics(&self) -> Vec<&Column> {
        self.columns_of_type(ColumnType::Demographic)
    }

    fn columns_of_type(&self, column_type: ColumnType) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|column| column.column_type() == column_type)
            .collect()
    }

    /// Codes of all value columns, in schema order.
    pub fn columns_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::code).collect()
    }

    /// Every field a complete header carries: the org node column first,
    /// then the value columns.
    pub fn all_fields_names(&self) -> Vec<&str> {
        std::iter::once(self.org_node_col.as_str())
            .chain(self.columns.iter().map(Column::code))
            .collect()
    }

    /// Checks the schema-level invariants.
    pub fn validate(&self) -> Result<()> {
        if self.org_node_col.is_empty() {
            return Err(ModelError::EmptyOrgNodeColumn);
        }
        let dupes = duplicates(&self.columns_names());
        if !dupes.is_empty() {
            return Err(ModelError::DuplicateColumnCodes {
                codes: dupes.into_iter().map(str::to_string).collect(),
            });
        }
        Ok(())
    }
}

/// Free-function form of [`Schema::validate`].
pub fn validate_schema(schema: &Schema) -> Result<()> {
    schema.validate()
}
