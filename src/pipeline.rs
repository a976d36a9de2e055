//! Ordered analysis stages.
//!
//! Each stage is a plain function of the dataset; [`Pipeline::run`] walks
//! [`Stage::ORDER`], dispatching each stage on the artifacts of the ones
//! before it, and collects them into an [`AnalysisOutcome`].
//! Nothing here prints.

use crate::charts::{CategoricalPlot, ChartRenderer, RelationalPlot, StatisticalPlot};
use crate::config::AnalysisConfig;
use crate::data::{DataLoader, DataProcessor, DiagnosticReport};
use crate::error::{AnalysisError, Result};
use crate::report::MomentsReport;
use crate::stats::Moments;
use polars::prelude::DataFrame;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// One step of the analysis, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Preprocess,
    RelationalPlot,
    CategoricalPlot,
    StatisticalPlot,
    Moments,
    Report,
}

impl Stage {
    pub const ORDER: [Stage; 7] = [
        Stage::Load,
        Stage::Preprocess,
        Stage::RelationalPlot,
        Stage::CategoricalPlot,
        Stage::StatisticalPlot,
        Stage::Moments,
        Stage::Report,
    ];

    pub const PLOTS: [Stage; 3] = [
        Stage::RelationalPlot,
        Stage::CategoricalPlot,
        Stage::StatisticalPlot,
    ];

    pub fn is_plot(self) -> bool {
        Self::PLOTS.contains(&self)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Preprocess => "preprocess",
            Stage::RelationalPlot => "relational plot",
            Stage::CategoricalPlot => "categorical plot",
            Stage::StatisticalPlot => "statistical plot",
            Stage::Moments => "moments",
            Stage::Report => "report",
        };
        f.write_str(name)
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub diagnostics: DiagnosticReport,
    /// Written image files, in stage order.
    pub plots: Vec<PathBuf>,
    pub moments: Moments,
    pub report: MomentsReport,
}

/// Runs the stages against one configuration.
pub struct Pipeline {
    config: AnalysisConfig,
}

impl Pipeline {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Execute every stage of [`Stage::ORDER`]. The first failure aborts the
    /// run; images already written stay on disk.
    pub fn run(&self) -> Result<AnalysisOutcome> {
        let mut state = RunState::default();
        for stage in Stage::ORDER {
            info!("Stage: {}", stage);
            self.step(stage, &mut state)?;
        }
        state.into_outcome()
    }

    /// Run one stage against the artifacts produced so far.
    fn step(&self, stage: Stage, state: &mut RunState) -> Result<()> {
        match stage {
            Stage::Load => state.raw = Some(self.load()?),
            Stage::Preprocess => {
                let raw = state.raw.take().ok_or_else(|| missing(stage, "the loaded dataset"))?;
                let (df, diagnostics) = self.preprocess(raw)?;
                debug!(
                    "Preprocessed: {} -> {} rows",
                    diagnostics.rows_before, diagnostics.rows_after
                );
                std::fs::create_dir_all(&self.config.output_dir)?;
                state.cleaned = Some(df);
                state.diagnostics = Some(diagnostics);
            }
            Stage::RelationalPlot | Stage::CategoricalPlot | Stage::StatisticalPlot => {
                let df = state.cleaned(stage)?;
                if let Some(path) = self.plot(stage, df)? {
                    state.plots.push(path);
                }
            }
            Stage::Moments => {
                let moments = self.moments(state.cleaned(stage)?)?;
                state.moments = Some(moments);
            }
            Stage::Report => {
                let moments = state.moments.ok_or_else(|| missing(stage, "the moments"))?;
                state.report = Some(self.report(moments));
            }
        }
        Ok(())
    }

    pub fn load(&self) -> Result<DataFrame> {
        DataLoader::load_csv(&self.config.input_path)
    }

    pub fn preprocess(&self, df: DataFrame) -> Result<(DataFrame, DiagnosticReport)> {
        DataProcessor::preprocess(df, &self.config)
    }

    /// Render the image for a plot stage and return where it was written.
    /// Stages that produce no image return `None`.
    pub fn plot(&self, stage: Stage, df: &DataFrame) -> Result<Option<PathBuf>> {
        let path = match stage {
            Stage::RelationalPlot => {
                let path = self.config.relational_plot_path();
                RelationalPlot::from_dataframe(df, &self.config)?.render(&path)?;
                path
            }
            Stage::CategoricalPlot => {
                let path = self.config.categorical_plot_path();
                CategoricalPlot::from_dataframe(df, &self.config)?.render(&path)?;
                path
            }
            Stage::StatisticalPlot => {
                let path = self.config.statistical_plot_path();
                StatisticalPlot::from_dataframe(df, &self.config)?.render(&path)?;
                path
            }
            _ => return Ok(None),
        };
        Ok(Some(path))
    }

    pub fn moments(&self, df: &DataFrame) -> Result<Moments> {
        Moments::from_column(df, &self.config.target_column)
    }

    pub fn report(&self, moments: Moments) -> MomentsReport {
        MomentsReport::new(
            self.config.target_column.as_str(),
            moments,
            self.config.skew_threshold,
            self.config.kurtosis_thresholds,
        )
    }
}

/// Artifacts accumulated while walking the stages.
#[derive(Default)]
struct RunState {
    raw: Option<DataFrame>,
    cleaned: Option<DataFrame>,
    diagnostics: Option<DiagnosticReport>,
    plots: Vec<PathBuf>,
    moments: Option<Moments>,
    report: Option<MomentsReport>,
}

impl RunState {
    fn cleaned(&self, stage: Stage) -> Result<&DataFrame> {
        self.cleaned
            .as_ref()
            .ok_or_else(|| missing(stage, "the preprocessed dataset"))
    }

    fn into_outcome(self) -> Result<AnalysisOutcome> {
        Ok(AnalysisOutcome {
            diagnostics: self
                .diagnostics
                .ok_or_else(|| missing(Stage::Preprocess, "the diagnostics"))?,
            plots: self.plots,
            moments: self.moments.ok_or_else(|| missing(Stage::Moments, "the moments"))?,
            report: self.report.ok_or_else(|| missing(Stage::Report, "the report"))?,
        })
    }
}

fn missing(stage: Stage, what: &'static str) -> AnalysisError {
    AnalysisError::StageOrder {
        stage: stage.to_string(),
        missing: what,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_loads_first_and_reports_last() {
        assert_eq!(Stage::ORDER.first(), Some(&Stage::Load));
        assert_eq!(Stage::ORDER[1], Stage::Preprocess);
        assert_eq!(Stage::ORDER.last(), Some(&Stage::Report));
        let plots: Vec<Stage> = Stage::ORDER.into_iter().filter(|s| s.is_plot()).collect();
        assert_eq!(plots, Stage::PLOTS.to_vec());
    }

    #[test]
    fn test_non_plot_stage_writes_nothing() {
        let pipeline = Pipeline::new(AnalysisConfig::default()).unwrap();
        let df = polars::df!("avgtemp" => [1.0f64]).unwrap();
        assert!(pipeline.plot(Stage::Moments, &df).unwrap().is_none());
    }

    #[test]
    fn test_stage_without_inputs_is_an_error() {
        let pipeline = Pipeline::new(AnalysisConfig::default()).unwrap();
        let mut state = RunState::default();

        let err = pipeline.step(Stage::Report, &mut state).unwrap_err();
        assert_eq!(err.error_code(), "STAGE_ORDER");
        let err = pipeline.step(Stage::CategoricalPlot, &mut state).unwrap_err();
        assert!(err.to_string().contains("categorical plot"));
    }

    #[test]
    fn test_non_plot_stages_run_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("data.csv");
        std::fs::write(
            &csv,
            "Date,Country_Region,days_from_firstcase,avgtemp,density,medianage,urbanpop,avghumidity\n\
             2020-03-01,Italy,1,10.0,206,47,69,71.0\n\
             2020-03-02,Italy,2,,206,47,69,70.0\n\
             2020-03-01,Chad,0,30.0,9,17,23,24.0\n",
        )
        .unwrap();
        let config = AnalysisConfig::builder()
            .input_path(&csv)
            .output_dir(dir.path().join("out"))
            .build()
            .unwrap();
        let pipeline = Pipeline::new(config).unwrap();
        let mut state = RunState::default();

        for stage in Stage::ORDER.into_iter().filter(|s| !s.is_plot()) {
            pipeline.step(stage, &mut state).unwrap();
        }
        let outcome = state.into_outcome().unwrap();

        assert!(outcome.plots.is_empty());
        assert_eq!(outcome.diagnostics.rows_after, 2);
        assert_eq!(outcome.moments.count, 2);
        assert_eq!(outcome.report.column, "avgtemp");
        assert!(dir.path().join("out").is_dir());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            top_n: 0,
            ..AnalysisConfig::default()
        };
        assert!(Pipeline::new(config).is_err());
    }

    #[test]
    fn test_missing_input_fails_on_load() {
        let config = AnalysisConfig::builder()
            .input_path("no/such/data.csv")
            .build()
            .unwrap();
        let err = Pipeline::new(config).unwrap().run().unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
