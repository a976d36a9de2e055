//! CSV Data Loader Module
//! Handles CSV file loading and column extraction using Polars.

use crate::error::{AnalysisError, Result};
use polars::prelude::*;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Cell texts read as missing values in every column.
pub const NULL_TOKENS: [&str; 13] = [
    "NA", "N/A", "n/a", "#N/A", "<NA>", "NULL", "null", "NaN", "-NaN", "nan", "-nan", "None",
    "#NA",
];

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with a header row.
    pub fn load_csv(file_path: impl AsRef<Path>) -> Result<DataFrame> {
        let file_path = file_path.as_ref();
        if !file_path.is_file() {
            return Err(AnalysisError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("input file {} does not exist", file_path.display()),
            )));
        }

        debug!("Reading CSV from {}", file_path.display());
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_null_values(Some(Self::null_values()))
            .finish()?
            .collect()?;

        info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );
        Ok(df)
    }

    fn null_values() -> NullValues {
        NullValues::AllColumns(NULL_TOKENS.iter().map(|t| (*t).into()).collect())
    }

    /// Whether a dtype can be summarised as a number.
    pub fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    /// Get list of numeric column names.
    pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| Self::is_numeric(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }
}
