//! Categorical ranking plot: top regions by mean target value.

use super::palette::SKY_BLUE;
use super::{padded_range, ChartRenderer, DrawResult, FONT_FAMILY};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::stats::{GroupMean, StatsCalculator};
use plotters::prelude::*;
use polars::prelude::DataFrame;
use std::path::Path;

const X_DESC: &str = "Average Temperature (°C)";
const SIZE: (u32, u32) = (800, 500);

/// Prepared data for the horizontal bar chart, highest mean first.
#[derive(Debug, Clone)]
pub struct CategoricalPlot {
    pub bars: Vec<GroupMean>,
}

impl CategoricalPlot {
    pub fn from_dataframe(df: &DataFrame, config: &AnalysisConfig) -> Result<Self> {
        let bars = StatsCalculator::top_groups_by_mean(
            df,
            &config.group_column,
            &config.target_column,
            config.top_n,
        )?;
        Ok(Self { bars })
    }

    pub fn title(&self) -> String {
        format!("Top {} Countries by Average Temperature", self.bars.len())
    }

    /// Bar labels from top to bottom.
    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.group.as_str()).collect()
    }

    /// Vertical slot of the bar at `rank`; slot 0 is the bottom of the chart.
    fn slot(&self, rank: usize) -> usize {
        self.bars.len() - 1 - rank
    }
}

impl ChartRenderer for CategoricalPlot {
    fn draw(&self, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let n = self.bars.len();
        // bars grow from zero so the axis must include it
        let (lo, x_max) = padded_range(
            self.bars
                .iter()
                .map(|b| b.mean)
                .chain(std::iter::once(0.0)),
        );
        let x_min = if self.bars.iter().all(|b| b.mean >= 0.0) {
            0.0
        } else {
            lo
        };

        let labels = self.labels();
        let label_of = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(slot) if *slot < n => labels[n - 1 - *slot].to_string(),
            _ => String::new(),
        };

        let mut chart = ChartBuilder::on(&root)
            .caption(self.title(), (FONT_FAMILY, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(150)
            .build_cartesian_2d(x_min..x_max, (0..n.max(1)).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(X_DESC)
            .y_labels(n.max(1))
            .y_label_formatter(&label_of)
            .draw()?;

        chart.draw_series(self.bars.iter().enumerate().map(|(rank, bar)| {
            let slot = self.slot(rank);
            let mut rect = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(slot)),
                    (bar.mean, SegmentValue::Exact(slot + 1)),
                ],
                SKY_BLUE.filled(),
            );
            rect.set_margin(4, 4, 0, 0);
            rect
        }))?;

        root.present()?;
        Ok(())
    }
}
