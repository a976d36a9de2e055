//! COVID Trends - exploratory analysis of a COVID-19 CSV dataset
//!
//! Loads a CSV of daily per-region records, drops rows without an average
//! temperature, parses the date column and then produces:
//!
//! - **Diagnostics**: head, schema, summary statistics and a correlation matrix
//! - **Charts**: a per-region trend line plot, a top-N bar ranking and an
//!   annotated correlation heatmap, written as PNG files
//! - **Moments**: mean, sample standard deviation, skewness and excess kurtosis
//!   of the target column, with a plain-language reading of its shape
//!
//! # Quick Start
//!
//! ```no_run
//! use covid_trends::{AnalysisConfig, Pipeline};
//!
//! # fn main() -> covid_trends::Result<()> {
//! let config = AnalysisConfig::builder()
//!     .input_path("data.csv")
//!     .output_dir("out")
//!     .build()?;
//!
//! let outcome = Pipeline::new(config)?.run()?;
//! println!("{}", outcome.diagnostics);
//! println!("{}", outcome.report);
//! # Ok(())
//! # }
//! ```

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use config::{AnalysisConfig, AnalysisConfigBuilder, KurtosisThresholds};
pub use data::{DataLoader, DataProcessor, DiagnosticReport};
pub use error::{AnalysisError, Result};
pub use pipeline::{AnalysisOutcome, Pipeline, Stage};
pub use report::{KurtosisShape, MomentsReport, SkewShape};
pub use stats::{CorrelationMatrix, Moments};
