//! Statistics Calculator Module
//! Handles descriptive summaries and per-group aggregation.

use crate::data::columns::{f64_values, optional_f64_values, string_values};
use crate::error::Result;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Describe-style summary of a single numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            column: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            median: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Mean of the target value within one category.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub group: String,
    pub count: usize,
    pub mean: f64,
}

/// Handles statistical calculations over the cleaned table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let variance =
                values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        } else {
            f64::NAN
        };

        ColumnSummary {
            column: String::new(),
            count: n,
            mean,
            std,
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Summarise one numeric column of a frame, ignoring missing values.
    pub fn summarize_column(df: &DataFrame, column: &str) -> Result<ColumnSummary> {
        let values = f64_values(df, column)?;
        let mut summary = Self::compute_descriptive_stats(&values);
        summary.column = column.to_string();
        Ok(summary)
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Mean of `value_col` per distinct `group_col`, in group-name order.
    ///
    /// Rows with a missing group or value are skipped; groups left with no
    /// values are omitted.
    pub fn group_means(df: &DataFrame, group_col: &str, value_col: &str) -> Result<Vec<GroupMean>> {
        let groups = string_values(df, group_col)?;
        let values = optional_f64_values(df, value_col)?;

        let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for (group, value) in groups.into_iter().zip(values) {
            if let (Some(g), Some(v)) = (group, value) {
                let entry = acc.entry(g).or_insert((0.0, 0));
                entry.0 += v;
                entry.1 += 1;
            }
        }

        Ok(acc
            .into_iter()
            .map(|(group, (sum, count))| GroupMean {
                group,
                count,
                mean: sum / count as f64,
            })
            .collect())
    }

    /// The `n` groups with the highest mean, highest first.
    ///
    /// Equal means keep group-name order.
    pub fn top_groups_by_mean(
        df: &DataFrame,
        group_col: &str,
        value_col: &str,
        n: usize,
    ) -> Result<Vec<GroupMean>> {
        let mut means = Self::group_means(df, group_col, value_col)?;
        means.sort_by(|a, b| b.mean.total_cmp(&a.mean));
        means.truncate(n);
        Ok(means)
    }
}
