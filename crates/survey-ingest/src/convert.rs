//! Cell value conversion.
//!
//! Plain integers are read exactly. Spreadsheet exports often render whole
//! numbers as `3.0`, so anything else is parsed as a float and then
//! required to be integral.

use survey_model::Column;

use crate::error::CellError;

/// Largest magnitude an `f64` can carry while still mapping onto `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63

/// Converts raw cell text into an integer.
pub fn convert_cell_value(raw: &str) -> Result<i64, CellError> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }

    let parsed = trimmed
        .parse::<f64>()
        .map_err(|source| CellError::NotNumeric {
            value: trimmed.to_string(),
            source,
        })?;

    if !parsed.is_finite() {
        return Err(CellError::NotFinite {
            value: trimmed.to_string(),
        });
    }
    if parsed.fract() != 0.0 {
        return Err(CellError::FractionalValue {
            value: trimmed.to_string(),
        });
    }
    if parsed < -I64_BOUND || parsed >= I64_BOUND {
        return Err(CellError::IntegerOverflow {
            value: trimmed.to_string(),
        });
    }

    Ok(parsed as i64)
}

/// Converts a cell for `column`, enforcing nullability and bounds.
///
/// Returns `Ok(None)` for an empty cell in a nullable column.
pub fn convert_for_column(raw: &str, column: &Column) -> Result<Option<i64>, CellError> {
    if raw.trim().is_empty() {
        return if column.nullable() {
            Ok(None)
        } else {
            Err(CellError::NullNotAllowed)
        };
    }

    let value = convert_cell_value(raw)?;
    if !column.accepts(value) {
        return Err(CellError::OutOfBounds {
            value,
            min: column.min_value(),
            max: column.max_value(),
        });
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn likert(nullable: bool) -> Column {
        Column::new("Q1", "Overall satisfaction", 1, 5, nullable, "question").unwrap()
    }

    #[test]
    fn whole_numbers() {
        assert_eq!(convert_cell_value("3"), Ok(3));
        assert_eq!(convert_cell_value("3.0"), Ok(3));
        assert_eq!(convert_cell_value(" -2 "), Ok(-2));
        assert_eq!(convert_cell_value("1e2"), Ok(100));
    }

    #[test]
    fn fractional_rejected() {
        assert_eq!(
            convert_cell_value("3.5"),
            Err(CellError::FractionalValue {
                value: "3.5".to_string()
            })
        );
    }

    #[test]
    fn text_rejected() {
        assert!(matches!(
            convert_cell_value("abc"),
            Err(CellError::NotNumeric { .. })
        ));
        assert!(matches!(
            convert_cell_value(""),
            Err(CellError::NotNumeric { .. })
        ));
    }

    #[test]
    fn non_finite_rejected() {
        assert!(matches!(
            convert_cell_value("NaN"),
            Err(CellError::NotFinite { .. })
        ));
        assert!(matches!(
            convert_cell_value("inf"),
            Err(CellError::NotFinite { .. })
        ));
    }

    #[test]
    fn huge_rejected() {
        assert!(matches!(
            convert_cell_value("1e30"),
            Err(CellError::IntegerOverflow { .. })
        ));
    }

    #[test]
    fn integers_beyond_float_precision_are_exact() {
        assert_eq!(
            convert_cell_value("9007199254740993"),
            Ok(9_007_199_254_740_993)
        );
        assert_eq!(convert_cell_value("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(convert_cell_value("-9223372036854775808"), Ok(i64::MIN));
        assert!(matches!(
            convert_cell_value("9223372036854775808"),
            Err(CellError::IntegerOverflow { .. })
        ));
    }

    #[test]
    fn null_handling() {
        assert_eq!(convert_for_column("", &likert(true)), Ok(None));
        assert_eq!(convert_for_column("  ", &likert(true)), Ok(None));
        assert_eq!(
            convert_for_column("", &likert(false)),
            Err(CellError::NullNotAllowed)
        );
    }

    #[test]
    fn bounds_handling() {
        assert_eq!(convert_for_column("5.0", &likert(false)), Ok(Some(5)));
        assert_eq!(
            convert_for_column("6", &likert(false)),
            Err(CellError::OutOfBounds {
                value: 6,
                min: 1,
                max: 5
            })
        );
        assert_eq!(
            convert_for_column("0", &likert(true)),
            Err(CellError::OutOfBounds {
                value: 0,
                min: 1,
                max: 5
            })
        );
    }
}
