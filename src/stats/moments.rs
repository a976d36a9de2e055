//! The four descriptive moments of one numeric column.

use crate::data::columns::f64_values;
use crate::error::Result;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::debug;

/// Relative resolution below which the second central moment counts as zero.
const ZERO_VARIANCE_RESOLUTION: f64 = 1e-15;

/// Mean, sample standard deviation, bias-corrected skewness and excess kurtosis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (divisor n - 1).
    pub std_dev: f64,
    pub skewness: f64,
    /// Kurtosis minus 3, so a normal distribution scores about 0.
    pub excess_kurtosis: f64,
}

impl Moments {
    /// Compute the moments of already-cleaned values.
    ///
    /// Skewness is corrected for bias only when n > 2 and kurtosis only when
    /// n > 3; smaller samples get the plain moment ratios. Zero variance
    /// makes both shape statistics NaN.
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        let mean = values.iter().mean();
        let std_dev = values.iter().std_dev();

        let n = count as f64;
        let central = |power: i32| values.iter().map(|x| (x - mean).powi(power)).sum::<f64>() / n;
        let m2 = central(2);
        let m3 = central(3);
        let m4 = central(4);

        let zero_variance = count == 0 || m2 <= (ZERO_VARIANCE_RESOLUTION * mean).powi(2);

        let skewness = if zero_variance {
            f64::NAN
        } else {
            let g1 = m3 / m2.powf(1.5);
            if count > 2 {
                ((n - 1.0) * n).sqrt() / (n - 2.0) * g1
            } else {
                g1
            }
        };

        let kurtosis = if zero_variance {
            f64::NAN
        } else {
            let g2 = m4 / (m2 * m2);
            if count > 3 {
                ((n * n - 1.0) * g2 - 3.0 * (n - 1.0).powi(2)) / ((n - 2.0) * (n - 3.0)) + 3.0
            } else {
                g2
            }
        };

        Self {
            count,
            mean,
            std_dev,
            skewness,
            excess_kurtosis: kurtosis - 3.0,
        }
    }

    /// Drop missing values of `column`, coerce to `f64` and compute.
    pub fn from_column(df: &DataFrame, column: &str) -> Result<Self> {
        let values = f64_values(df, column)?;
        let moments = Self::from_values(&values);
        debug!("Moments of '{}' over {} values: {:?}", column, values.len(), moments);
        Ok(moments)
    }
}
