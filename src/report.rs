//! Natural-language interpretation of the four moments.

use crate::config::KurtosisThresholds;
use crate::stats::Moments;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a distribution's asymmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkewShape {
    Symmetric,
    RightSkewed,
    LeftSkewed,
}

impl SkewShape {
    /// `|skew| < threshold` is symmetric, the boundary itself counts as skewed.
    /// An undefined skewness (constant data) and an exact zero are symmetric.
    pub fn classify(skewness: f64, threshold: f64) -> Self {
        if skewness.is_nan() || skewness == 0.0 || skewness.abs() < threshold {
            Self::Symmetric
        } else if skewness > 0.0 {
            Self::RightSkewed
        } else {
            Self::LeftSkewed
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Symmetric => "approximately symmetric",
            Self::RightSkewed => "right (positively) skewed",
            Self::LeftSkewed => "left (negatively) skewed",
        }
    }
}

/// Tail weight relative to a normal distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KurtosisShape {
    Platykurtic,
    Mesokurtic,
    Leptokurtic,
}

impl KurtosisShape {
    /// Strictly outside the thresholds is platy-/leptokurtic; NaN is mesokurtic.
    pub fn classify(excess_kurtosis: f64, thresholds: KurtosisThresholds) -> Self {
        if excess_kurtosis < thresholds.platykurtic {
            Self::Platykurtic
        } else if excess_kurtosis > thresholds.leptokurtic {
            Self::Leptokurtic
        } else {
            Self::Mesokurtic
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Platykurtic => "platykurtic (thin tails)",
            Self::Mesokurtic => "mesokurtic (normal-like tails)",
            Self::Leptokurtic => "leptokurtic (heavy tails)",
        }
    }
}

/// The interpreted moments of one column, printable as prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentsReport {
    pub column: String,
    pub moments: Moments,
    pub skew: SkewShape,
    pub kurtosis: KurtosisShape,
}

impl MomentsReport {
    pub fn new(
        column: impl Into<String>,
        moments: Moments,
        skew_threshold: f64,
        kurtosis_thresholds: KurtosisThresholds,
    ) -> Self {
        Self {
            column: column.into(),
            skew: SkewShape::classify(moments.skewness, skew_threshold),
            kurtosis: KurtosisShape::classify(moments.excess_kurtosis, kurtosis_thresholds),
            moments,
        }
    }

    /// One sentence naming both shape descriptors.
    pub fn interpretation(&self) -> String {
        format!(
            "The data is {} and {}.",
            self.skew.description(),
            self.kurtosis.description()
        )
    }
}

impl fmt::Display for MomentsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.moments;
        writeln!(f, "For the attribute {}:", self.column)?;
        writeln!(
            f,
            "Mean = {:.2}, Standard Deviation = {:.2}, Skewness = {:.2}, Excess Kurtosis = {:.2}.",
            m.mean, m.std_dev, m.skewness, m.excess_kurtosis
        )?;
        write!(f, "{}", self.interpretation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{ContinuousCDF, Exp};

    fn moments(skewness: f64, excess_kurtosis: f64) -> Moments {
        Moments {
            count: 10,
            mean: 12.3456,
            std_dev: 3.0,
            skewness,
            excess_kurtosis,
        }
    }

    #[test]
    fn test_skew_classification() {
        assert_eq!(SkewShape::classify(0.0, 0.5), SkewShape::Symmetric);
        assert_eq!(SkewShape::classify(0.49, 0.5), SkewShape::Symmetric);
        assert_eq!(SkewShape::classify(-0.49, 0.5), SkewShape::Symmetric);
        assert_eq!(SkewShape::classify(1.3, 0.5), SkewShape::RightSkewed);
        assert_eq!(SkewShape::classify(-1.3, 0.5), SkewShape::LeftSkewed);
    }

    #[test]
    fn test_skew_boundaries_are_skewed() {
        assert_eq!(SkewShape::classify(0.5, 0.5), SkewShape::RightSkewed);
        assert_eq!(SkewShape::classify(-0.5, 0.5), SkewShape::LeftSkewed);
    }

    #[test]
    fn test_kurtosis_classification() {
        let t = KurtosisThresholds::default();
        assert_eq!(KurtosisShape::classify(-1.5, t), KurtosisShape::Platykurtic);
        assert_eq!(KurtosisShape::classify(0.0, t), KurtosisShape::Mesokurtic);
        assert_eq!(KurtosisShape::classify(4.0, t), KurtosisShape::Leptokurtic);
    }

    #[test]
    fn test_kurtosis_boundaries_are_mesokurtic() {
        let t = KurtosisThresholds::default();
        assert_eq!(KurtosisShape::classify(-1.0, t), KurtosisShape::Mesokurtic);
        assert_eq!(KurtosisShape::classify(1.0, t), KurtosisShape::Mesokurtic);
    }

    #[test]
    fn test_undefined_shape_statistics() {
        assert_eq!(SkewShape::classify(f64::NAN, 0.5), SkewShape::Symmetric);
        assert_eq!(
            KurtosisShape::classify(f64::NAN, KurtosisThresholds::default()),
            KurtosisShape::Mesokurtic
        );
    }

    #[test]
    fn test_exponential_sample_reads_right_skewed() {
        let exp = Exp::new(0.5).unwrap();
        let n = 2000;
        let values: Vec<f64> = (0..n)
            .map(|i| exp.inverse_cdf((i as f64 + 0.5) / n as f64))
            .collect();

        let report = MomentsReport::new(
            "avgtemp",
            Moments::from_values(&values),
            0.5,
            KurtosisThresholds::default(),
        );

        assert_eq!(report.skew, SkewShape::RightSkewed);
        assert_eq!(report.kurtosis, KurtosisShape::Leptokurtic);
        assert!(report.to_string().contains("right (positively) skewed"));
    }

    #[test]
    fn test_zero_skew_is_never_left_skewed() {
        assert_eq!(SkewShape::classify(0.0, 0.0), SkewShape::Symmetric);
        assert_eq!(SkewShape::classify(-0.0, 0.0), SkewShape::Symmetric);
        assert_eq!(SkewShape::classify(-0.1, 0.0), SkewShape::LeftSkewed);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = KurtosisThresholds {
            platykurtic: -3.0,
            leptokurtic: 3.0,
        };
        let report = MomentsReport::new("avgtemp", moments(0.9, 2.0), 1.0, t);
        assert_eq!(report.skew, SkewShape::Symmetric);
        assert_eq!(report.kurtosis, KurtosisShape::Mesokurtic);
    }

    #[test]
    fn test_display_formats_two_decimals() {
        let report = MomentsReport::new(
            "avgtemp",
            moments(0.7, -1.25),
            0.5,
            KurtosisThresholds::default(),
        );
        let text = report.to_string();
        assert!(text.starts_with("For the attribute avgtemp:"));
        assert!(text.contains(
            "Mean = 12.35, Standard Deviation = 3.00, Skewness = 0.70, Excess Kurtosis = -1.25."
        ));
        assert!(text.ends_with(
            "The data is right (positively) skewed and platykurtic (thin tails)."
        ));
    }

    #[test]
    fn test_report_serializes() {
        let report = MomentsReport::new("avgtemp", moments(0.0, 0.0), 0.5, KurtosisThresholds::default());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"skew\":\"Symmetric\""));
        assert!(json.contains("\"column\":\"avgtemp\""));
    }
}
