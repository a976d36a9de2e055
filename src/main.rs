//! COVID Trends - runs the full analysis on `data.csv` in the working directory.

use anyhow::{Context, Result};
use covid_trends::{AnalysisConfig, Pipeline};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_FILE: &str = "analysis.json";

fn main() -> Result<()> {
    init_logging("info");

    let config = load_config()?;
    info!("Analyzing {}", config.input_path.display());

    let outcome = Pipeline::new(config)
        .context("Invalid analysis configuration")?
        .run()
        .context("Analysis failed")?;

    println!("{}", outcome.diagnostics);
    println!("{}", outcome.report);

    info!("Wrote {} plot(s)", outcome.plots.len());
    Ok(())
}

fn load_config() -> Result<AnalysisConfig> {
    let path = Path::new(CONFIG_FILE);
    if path.is_file() {
        info!("Loading configuration from {}", path.display());
        AnalysisConfig::from_json_file(path)
            .with_context(|| format!("Failed to read {}", path.display()))
    } else {
        Ok(AnalysisConfig::default())
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
