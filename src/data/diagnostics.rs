//! Diagnostic snapshot collected while preprocessing.

use crate::stats::{ColumnSummary, CorrelationMatrix};
use polars::prelude::DataFrame;
use std::fmt;

/// Name, dtype and non-null count of one column of the raw table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
}

/// Everything the preprocessor observed about the dataset.
///
/// Head, schema and summary describe the raw table; the correlation matrix
/// and `rows_after` describe the cleaned one.
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    pub head: DataFrame,
    pub schema: Vec<ColumnInfo>,
    pub summary: Vec<ColumnSummary>,
    pub correlation: CorrelationMatrix,
    pub rows_before: usize,
    pub rows_after: usize,
    pub date_parse_failures: usize,
}

impl DiagnosticReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_before - self.rows_after
    }

    pub fn summary_for(&self, column: &str) -> Option<&ColumnSummary> {
        self.summary.iter().find(|s| s.column == column)
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n Dataset Head ")?;
        writeln!(f, "{}", self.head)?;

        writeln!(f, "\n Dataset Info ")?;
        writeln!(
            f,
            "{} entries, {} columns",
            self.rows_before,
            self.schema.len()
        )?;
        writeln!(f, " #  {:<24} {:>14}  Dtype", "Column", "Non-Null Count")?;
        for (i, info) in self.schema.iter().enumerate() {
            writeln!(
                f,
                "{:>2}  {:<24} {:>14}  {}",
                i, info.name, info.non_null, info.dtype
            )?;
        }

        writeln!(f, "\n Statistical Summary ")?;
        write!(f, "{:<8}", "")?;
        for s in &self.summary {
            write!(f, " {:>14}", truncate(&s.column, 14))?;
        }
        writeln!(f)?;
        let rows: [(&str, fn(&ColumnSummary) -> f64); 8] = [
            ("count", |s| s.count as f64),
            ("mean", |s| s.mean),
            ("std", |s| s.std),
            ("min", |s| s.min),
            ("25%", |s| s.p25),
            ("50%", |s| s.median),
            ("75%", |s| s.p75),
            ("max", |s| s.max),
        ];
        for (label, value) in rows {
            write!(f, "{:<8}", label)?;
            for s in &self.summary {
                write!(f, " {:>14.4}", value(s))?;
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "\n Cleaning: kept {} of {} rows, {} unparseable date(s)",
            self.rows_after, self.rows_before, self.date_parse_failures
        )?;

        writeln!(f, "\n Correlation Matrix ")?;
        write!(f, "{}", self.correlation)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}
