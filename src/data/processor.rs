//! Data Processor Module
//! Handles data cleaning: target-missing row removal and date parsing.

use super::columns::{optional_f64_values, require_column, string_values};
use super::diagnostics::{ColumnInfo, DiagnosticReport};
use super::loader::DataLoader;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::stats::{CorrelationMatrix, StatsCalculator};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::{debug, info, warn};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Clean the raw dataset and collect diagnostics along the way.
    ///
    /// The returned frame never has more rows than the input and has no row
    /// with a missing target value.
    pub fn preprocess(
        df: DataFrame,
        config: &AnalysisConfig,
    ) -> Result<(DataFrame, DiagnosticReport)> {
        info!("Preprocessing {} rows...", df.height());

        let rows_before = df.height();
        let head = df.head(Some(config.head_rows));
        let schema = Self::column_info(&df);
        let summary = DataLoader::numeric_columns(&df)
            .iter()
            .map(|name| StatsCalculator::summarize_column(&df, name))
            .collect::<Result<Vec<_>>>()?;

        let mut df = Self::drop_missing_target(&df, &config.target_column)?;
        let dropped = rows_before - df.height();
        if dropped > 0 {
            info!(
                "Dropped {} rows with missing '{}'",
                dropped, config.target_column
            );
        } else {
            debug!("No rows with missing '{}'", config.target_column);
        }

        let date_parse_failures = Self::parse_dates(&mut df, &config.date_column)?;

        let correlation = CorrelationMatrix::from_dataframe(&df, &config.correlation_columns)?;

        let report = DiagnosticReport {
            head,
            schema,
            summary,
            correlation,
            rows_before,
            rows_after: df.height(),
            date_parse_failures,
        };
        Ok((df, report))
    }

    /// Remove every row whose target value is null or NaN.
    pub fn drop_missing_target(df: &DataFrame, target: &str) -> Result<DataFrame> {
        let mask: BooleanChunked = optional_f64_values(df, target)?
            .iter()
            .map(Option::is_some)
            .collect();
        Ok(df.filter(&mask)?)
    }

    /// Convert the date column to `Date` in place.
    ///
    /// Values that match none of the known layouts become null. Returns how
    /// many present values failed to parse.
    pub fn parse_dates(df: &mut DataFrame, date_column: &str) -> Result<usize> {
        let dtype = match require_column(df, date_column) {
            Ok(column) => column.dtype().clone(),
            Err(_) => {
                warn!("Date column '{}' not present, skipping", date_column);
                return Ok(0);
            }
        };
        if matches!(dtype, DataType::Date | DataType::Datetime(_, _)) {
            debug!("'{}' already has dtype {}", date_column, dtype);
            return Ok(0);
        }

        let raw = string_values(df, date_column)?;
        let mut failures = 0usize;
        let days: Vec<Option<i32>> = raw
            .iter()
            .map(|value| {
                let value = value.as_deref()?;
                let parsed = Self::parse_date(value);
                if parsed.is_none() {
                    failures += 1;
                }
                parsed.map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
            })
            .collect();

        let parsed = Series::new(date_column.into(), days).cast(&DataType::Date)?;
        df.with_column(parsed)?;

        if failures > 0 {
            warn!(
                "{} value(s) in '{}' could not be parsed as dates and were set to null",
                failures, date_column
            );
        }
        Ok(failures)
    }

    /// Parse one textual date in any of the accepted layouts.
    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                    .map(|dt| dt.date())
            })
    }

    fn column_info(df: &DataFrame) -> Vec<ColumnInfo> {
        df.get_columns()
            .iter()
            .map(|col| ColumnInfo {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                non_null: col.len() - col.null_count(),
            })
            .collect()
    }
}
