//! Error types for the analysis pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Every failure the pipeline can hit. All of them abort the run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load CSV: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    #[error("Column '{column}' is not numeric: {reason}")]
    NonNumericColumn { column: String, reason: String },

    #[error("Failed to render {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stage '{stage}' needs {missing}, which no earlier stage produced")]
    StageOrder {
        stage: String,
        missing: &'static str,
    },
}

impl AnalysisError {
    /// Stable code for each failure class.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::NonNumericColumn { .. } => "NON_NUMERIC_COLUMN",
            Self::Render { .. } => "RENDER_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Json(_) => "JSON_ERROR",
            Self::StageOrder { .. } => "STAGE_ORDER",
        }
    }

    pub(crate) fn render(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Render {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            AnalysisError::ColumnNotFound("avgtemp".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
        assert_eq!(
            AnalysisError::render("x.png", "disk full").error_code(),
            "RENDER_FAILED"
        );
    }

    #[test]
    fn test_render_message_names_path() {
        let err = AnalysisError::render("out/relational_plot.png", "disk full");
        let msg = err.to_string();
        assert!(msg.contains("relational_plot.png"));
        assert!(msg.contains("disk full"));
    }
}
