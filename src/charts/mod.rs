//! Charts module - static PNG rendering with plotters

mod categorical;
mod heatmap;
pub mod palette;
mod relational;

pub use categorical::CategoricalPlot;
pub use heatmap::StatisticalPlot;
pub use relational::{RegionSeries, RelationalPlot};

use crate::error::{AnalysisError, Result};
use std::path::Path;
use tracing::info;

pub(crate) type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

pub(crate) const FONT_FAMILY: &str = "sans-serif";

/// A chart that can be drawn into a single image file.
pub trait ChartRenderer {
    /// Draw onto a bitmap at `path`.
    ///
    /// Implementations own their drawing area for the duration of the call;
    /// it is released when this returns, whether or not presenting succeeded.
    fn draw(&self, path: &Path) -> DrawResult;

    /// Draw and save, overwriting any existing file.
    fn render(&self, path: &Path) -> Result<()> {
        self.draw(path)
            .map_err(|e| AnalysisError::render(path, e))?;
        info!("Saved {}", path.display());
        Ok(())
    }
}

/// Axis range covering `values`, padded by 5% and never empty.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}
