//! Analysis configuration.
//!
//! Everything the pipeline used to hardcode (file names, analysed column,
//! interpretation thresholds) lives in [`AnalysisConfig`]. Defaults match the
//! COVID-19 dataset layout.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const RELATIONAL_PLOT_FILE: &str = "relational_plot.png";
pub const CATEGORICAL_PLOT_FILE: &str = "categorical_plot.png";
pub const STATISTICAL_PLOT_FILE: &str = "statistical_plot.png";

/// Cutoffs for classifying excess kurtosis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KurtosisThresholds {
    /// Below this the distribution is platykurtic.
    pub platykurtic: f64,
    /// Above this the distribution is leptokurtic.
    pub leptokurtic: f64,
}

impl Default for KurtosisThresholds {
    fn default() -> Self {
        Self {
            platykurtic: -1.0,
            leptokurtic: 1.0,
        }
    }
}

/// Configuration for a single analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// CSV source file.
    pub input_path: PathBuf,
    /// Directory the three PNG files are written to.
    pub output_dir: PathBuf,
    /// Column that is cleaned on, ranked by and summarised.
    pub target_column: String,
    /// Category column used for line grouping and the top-N ranking.
    pub group_column: String,
    /// X axis of the relational plot.
    pub x_column: String,
    /// Column parsed into a date during preprocessing.
    pub date_column: String,
    /// Columns of the correlation matrix, in display order.
    pub correlation_columns: Vec<String>,
    /// |skew| below this is "approximately symmetric".
    pub skew_threshold: f64,
    pub kurtosis_thresholds: KurtosisThresholds,
    /// Draw a per-region legend on the relational plot.
    pub show_relational_legend: bool,
    /// Number of bars in the categorical plot.
    pub top_n: usize,
    /// Rows captured in the diagnostic head.
    pub head_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data.csv"),
            output_dir: PathBuf::from("."),
            target_column: "avgtemp".to_string(),
            group_column: "Country_Region".to_string(),
            x_column: "days_from_firstcase".to_string(),
            date_column: "Date".to_string(),
            correlation_columns: ["density", "medianage", "urbanpop", "avgtemp", "avghumidity"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            skew_threshold: 0.5,
            kurtosis_thresholds: KurtosisThresholds::default(),
            show_relational_legend: false,
            top_n: 10,
            head_rows: 5,
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn relational_plot_path(&self) -> PathBuf {
        self.output_dir.join(RELATIONAL_PLOT_FILE)
    }

    pub fn categorical_plot_path(&self) -> PathBuf {
        self.output_dir.join(CATEGORICAL_PLOT_FILE)
    }

    pub fn statistical_plot_path(&self) -> PathBuf {
        self.output_dir.join(STATISTICAL_PLOT_FILE)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_column.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "target_column must not be empty".to_string(),
            ));
        }
        if !(self.skew_threshold.is_finite() && self.skew_threshold > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "skew_threshold must be a positive number, got {}",
                self.skew_threshold
            )));
        }
        let k = self.kurtosis_thresholds;
        if !(k.platykurtic.is_finite() && k.leptokurtic.is_finite())
            || k.platykurtic > k.leptokurtic
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "kurtosis thresholds must satisfy platykurtic <= leptokurtic, got {} / {}",
                k.platykurtic, k.leptokurtic
            )));
        }
        if self.top_n == 0 {
            return Err(AnalysisError::InvalidConfig(
                "top_n must be at least 1".to_string(),
            ));
        }
        if self.correlation_columns.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "correlation_columns must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input_path = path.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn target_column(mut self, column: impl Into<String>) -> Self {
        self.config.target_column = column.into();
        self
    }

    pub fn group_column(mut self, column: impl Into<String>) -> Self {
        self.config.group_column = column.into();
        self
    }

    pub fn x_column(mut self, column: impl Into<String>) -> Self {
        self.config.x_column = column.into();
        self
    }

    pub fn date_column(mut self, column: impl Into<String>) -> Self {
        self.config.date_column = column.into();
        self
    }

    pub fn correlation_columns<S: Into<String>>(
        mut self,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.config.correlation_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn skew_threshold(mut self, threshold: f64) -> Self {
        self.config.skew_threshold = threshold;
        self
    }

    pub fn kurtosis_thresholds(mut self, platykurtic: f64, leptokurtic: f64) -> Self {
        self.config.kurtosis_thresholds = KurtosisThresholds {
            platykurtic,
            leptokurtic,
        };
        self
    }

    pub fn show_relational_legend(mut self, show: bool) -> Self {
        self.config.show_relational_legend = show;
        self
    }

    pub fn top_n(mut self, n: usize) -> Self {
        self.config.top_n = n;
        self
    }

    pub fn head_rows(mut self, n: usize) -> Self {
        self.config.head_rows = n;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<AnalysisConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
