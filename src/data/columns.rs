//! Typed column extraction.
//!
//! Every consumer of the cleaned table pulls plain vectors out of it through
//! these helpers so that "column missing" and "not numeric" surface as the
//! same errors everywhere.

use crate::error::{AnalysisError, Result};
use polars::prelude::*;

/// Look up a column, mapping absence to [`AnalysisError::ColumnNotFound`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| AnalysisError::ColumnNotFound(name.to_string()))
}

/// Column values strictly coerced to `f64`, one entry per row.
///
/// Nulls and NaNs are `None`. Any present value that cannot be read as a
/// number fails the whole column.
pub fn optional_f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let original = require_column(df, name)?.as_materialized_series();
    let series = original
        .cast(&DataType::Float64)
        .map_err(|e| AnalysisError::NonNumericColumn {
            column: name.to_string(),
            reason: e.to_string(),
        })?;
    // a lossy cast turns unreadable values into extra nulls
    let unreadable = series.null_count() - original.null_count();
    if unreadable > 0 {
        return Err(AnalysisError::NonNumericColumn {
            column: name.to_string(),
            reason: format!(
                "{} value(s) of dtype {} cannot be read as numbers",
                unreadable,
                original.dtype()
            ),
        });
    }
    let ca = series.f64()?;

    Ok(ca
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Non-missing column values as `f64`.
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(optional_f64_values(df, name)?.into_iter().flatten().collect())
}

/// Column values rendered as strings, one entry per row.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = require_column(df, name)?;
    let series = column.as_materialized_series().cast(&DataType::String)?;
    let ca = series.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!(
            "region" => ["Italy", "Spain", "Chad"],
            "avgtemp" => [Some(12.5f64), None, Some(f64::NAN)],
            "days" => [1i64, 2, 3],
            "label" => ["1.5", "abc", "2"],
        )
        .unwrap()
    }

    #[test]
    fn test_optional_values_treat_nan_as_missing() {
        let values = optional_f64_values(&frame(), "avgtemp").unwrap();
        assert_eq!(values, vec![Some(12.5), None, None]);
    }

    #[test]
    fn test_integer_column_coerces_to_float() {
        assert_eq!(f64_values(&frame(), "days").unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_non_numeric_text_is_rejected() {
        let err = f64_values(&frame(), "label").unwrap_err();
        assert_eq!(err.error_code(), "NON_NUMERIC_COLUMN");
    }

    #[test]
    fn test_csv_text_column_is_rejected_not_panicking() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        std::io::Write::write_all(&mut file, b"region,avgtemp\nItaly,12.5\nSpain,9.0\nChad,\n")
            .unwrap();
        let df = crate::data::DataLoader::load_csv(file.path()).unwrap();

        let err = optional_f64_values(&df, "region").unwrap_err();
        assert_eq!(err.error_code(), "NON_NUMERIC_COLUMN");
        assert!(err.to_string().contains("3 value(s)"));
    }

    #[test]
    fn test_missing_column() {
        let err = f64_values(&frame(), "humidity").unwrap_err();
        assert!(matches!(err, AnalysisError::ColumnNotFound(name) if name == "humidity"));
    }

    #[test]
    fn test_string_values() {
        let values = string_values(&frame(), "region").unwrap();
        assert_eq!(values[1].as_deref(), Some("Spain"));
    }
}
