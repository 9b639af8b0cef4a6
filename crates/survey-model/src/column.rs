//! Schema columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Kind of survey field a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Answer to a survey question.
    Question,
    /// Respondent attribute (age band, tenure, ...).
    Demographic,
}

impl ColumnType {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Question => "question",
            ColumnType::Demographic => "demographic",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "question" => Ok(ColumnType::Question),
            "demographic" => Ok(ColumnType::Demographic),
            _ => Err(ModelError::InvalidColumnType(s.to_string())),
        }
    }
}

/// One field of a survey dataset.
///
/// Values are only obtainable through [`Column::new`] (deserialization goes
/// through it as well), so every `Column` satisfies `min_value <= max_value`
/// and has a non-empty code and text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColumnSpec", into = "ColumnSpec")]
pub struct Column {
    code: String,
    text: String,
    min_value: i64,
    max_value: i64,
    nullable: bool,
    column_type: ColumnType,
}

impl Column {
    /// Builds a validated column.
    ///
    /// `column_type` is parsed with [`ColumnType::from_str`]; checks run in
    /// the order code, text, type, bounds.
    pub fn new(
        code: impl Into<String>,
        text: impl Into<String>,
        min_value: i64,
        max_value: i64,
        nullable: bool,
        column_type: &str,
    ) -> Result<Self> {
        let code = code.into();
        let text = text.into();
        if code.is_empty() {
            return Err(ModelError::EmptyColumnCode);
        }
        if text.is_empty() {
            return Err(ModelError::EmptyColumnText { code });
        }
        let column_type = column_type.parse::<ColumnType>()?;
        if min_value > max_value {
            return Err(ModelError::MinValueGreaterThanMaxValue {
                code,
                min: min_value,
                max: max_value,
            });
        }
        Ok(Self {
            code,
            text,
            min_value,
            max_value,
            nullable,
            column_type,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn min_value(&self) -> i64 {
        self.min_value
    }

    pub fn max_value(&self) -> i64 {
        self.max_value
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Returns true if `value` lies within the inclusive bounds.
    pub fn accepts(&self, value: i64) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }
}

/// Serialized form of a column, checked on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ColumnSpec {
    code: String,
    text: String,
    min_value: i64,
    max_value: i64,
    #[serde(default)]
    nullable: bool,
    column_type: String,
}

impl TryFrom<ColumnSpec> for Column {
    type Error = ModelError;

    fn try_from(spec: ColumnSpec) -> Result<Self> {
        Column::new(
            spec.code,
            spec.text,
            spec.min_value,
            spec.max_value,
            spec.nullable,
            &spec.column_type,
        )
    }
}

impl From<Column> for ColumnSpec {
    fn from(column: Column) -> Self {
        Self {
            code: column.code,
            text: column.text,
            min_value: column.min_value,
            max_value: column.max_value,
            nullable: column.nullable,
            column_type: column.column_type.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_type_parses_loosely() {
        assert_eq!(
            "Question".parse::<ColumnType>().unwrap(),
            ColumnType::Question
        );
        assert_eq!(
            " demographic ".parse::<ColumnType>().unwrap(),
            ColumnType::Demographic
        );
        assert!("grid".parse::<ColumnType>().is_err());
    }

    #[test]
    fn accepts_is_inclusive() {
        let column = Column::new("Q1", "Satisfaction", 1, 5, false, "question").unwrap();
        assert!(column.accepts(1));
        assert!(column.accepts(5));
        assert!(!column.accepts(0));
        assert!(!column.accepts(6));
    }

    #[test]
    fn single_value_range_is_valid() {
        let column = Column::new("D1", "Consent", 1, 1, true, "demographic").unwrap();
        assert!(column.accepts(1));
        assert_eq!(column.column_type(), ColumnType::Demographic);
    }
}
