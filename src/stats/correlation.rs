//! Pearson correlation matrix with pairwise-complete observations.

use crate::data::columns::optional_f64_values;
use crate::error::Result;
use polars::prelude::DataFrame;
use std::fmt;

/// Square matrix of Pearson coefficients, rows and columns in `columns` order.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlate every pair of `columns`.
    ///
    /// Each pair only uses rows where both values are present. Pairs with
    /// fewer than two such rows or with a constant side are NaN.
    pub fn from_dataframe(df: &DataFrame, columns: &[String]) -> Result<Self> {
        let data = columns
            .iter()
            .map(|name| optional_f64_values(df, name))
            .collect::<Result<Vec<_>>>()?;

        let k = columns.len();
        let mut values = vec![vec![f64::NAN; k]; k];
        for i in 0..k {
            for j in i..k {
                let r = pearson(&data[i], &data[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(Self {
            columns: columns.to_vec(),
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient between two named columns.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// Pearson correlation over the rows where both sides are present.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }

    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .columns
            .iter()
            .map(|c| c.len())
            .max()
            .unwrap_or(0)
            .max(9);

        write!(f, "{:<width$}", "")?;
        for c in &self.columns {
            write!(f, " {:>width$}", c)?;
        }
        writeln!(f)?;

        for (name, row) in self.columns.iter().zip(&self.values) {
            write!(f, "{:<width$}", name)?;
            for v in row {
                write!(f, " {:>width$.6}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_perfect_positive_and_negative() {
        let x = some(&[1.0, 2.0, 3.0, 4.0]);
        let up = some(&[2.0, 4.0, 6.0, 8.0]);
        let down = some(&[8.0, 6.0, 4.0, 2.0]);
        assert!((pearson(&x, &up) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pairwise_complete_rows_only() {
        let x = vec![Some(1.0), Some(2.0), None, Some(4.0)];
        let y = vec![Some(1.0), Some(2.0), Some(100.0), Some(4.0)];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_pairs_are_nan() {
        assert!(pearson(&some(&[1.0]), &some(&[2.0])).is_nan());
        assert!(pearson(&some(&[1.0, 1.0, 1.0]), &some(&[1.0, 2.0, 3.0])).is_nan());
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let df = df!(
            "density" => [10.0f64, 50.0, 200.0, 90.0],
            "avgtemp" => [30.0f64, 20.0, 5.0, 12.0],
            "urbanpop" => [20.0f64, 55.0, 80.0, 60.0],
        )
        .unwrap();
        let cols: Vec<String> = ["density", "avgtemp", "urbanpop"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let m = CorrelationMatrix::from_dataframe(&df, &cols).unwrap();

        assert_eq!(m.len(), 3);
        for i in 0..3 {
            assert!((m.values[i][i] - 1.0).abs() < 1e-12);
            for j in 0..3 {
                assert_eq!(m.values[i][j], m.values[j][i]);
            }
        }
        assert!(m.get("density", "avgtemp").unwrap() < 0.0);
        assert!(m.get("density", "cases").is_none());
    }

    #[test]
    fn test_missing_column_fails() {
        let df = df!("density" => [1.0f64, 2.0]).unwrap();
        let err = CorrelationMatrix::from_dataframe(&df, &["medianage".to_string()]).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }
}
