//! Statistical plot: annotated correlation heatmap with a colour bar.

use super::palette::{coolwarm, needs_light_text};
use super::{ChartRenderer, DrawResult, FONT_FAMILY};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::stats::CorrelationMatrix;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use polars::prelude::DataFrame;
use std::path::Path;

const TITLE: &str = "Correlation Between Key Numeric Features";
const SIZE: (u32, u32) = (800, 600);
const COLOR_BAR_WIDTH: u32 = 110;
const COLOR_BAR_STEPS: usize = 100;

/// Prepared data for the heatmap.
#[derive(Debug, Clone)]
pub struct StatisticalPlot {
    pub matrix: CorrelationMatrix,
}

impl StatisticalPlot {
    pub fn from_dataframe(df: &DataFrame, config: &AnalysisConfig) -> Result<Self> {
        Ok(Self {
            matrix: CorrelationMatrix::from_dataframe(df, &config.correlation_columns)?,
        })
    }

    /// Cell annotations, row-major, two decimals.
    pub fn annotations(&self) -> Vec<Vec<String>> {
        self.matrix
            .values
            .iter()
            .map(|row| row.iter().map(|v| format_cell(*v)).collect())
            .collect()
    }
}

fn format_cell(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.2}", value)
    }
}

impl ChartRenderer for StatisticalPlot {
    fn draw(&self, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(TITLE, (FONT_FAMILY, 22))?;
        let (grid_area, bar_area) = root.split_horizontally((SIZE.0 - COLOR_BAR_WIDTH) as i32);

        let k = self.matrix.len();
        let names = &self.matrix.columns;
        // first matrix row is drawn at the top
        let x_label = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(j) if *j < k => names[*j].clone(),
            _ => String::new(),
        };
        let y_label = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(slot) if *slot < k => names[k - 1 - *slot].clone(),
            _ => String::new(),
        };

        let mut chart = ChartBuilder::on(&grid_area)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(100)
            .build_cartesian_2d((0..k.max(1)).into_segmented(), (0..k.max(1)).into_segmented())?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(k.max(1))
            .y_labels(k.max(1))
            .x_label_formatter(&x_label)
            .y_label_formatter(&y_label)
            .draw()?;

        let cells: Vec<(usize, usize, f64)> = self
            .matrix
            .values
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, v)| (i, j, *v)))
            .collect();

        chart.draw_series(cells.iter().map(|&(i, j, v)| {
            let slot = k - 1 - i;
            Rectangle::new(
                [
                    (SegmentValue::Exact(j), SegmentValue::Exact(slot)),
                    (SegmentValue::Exact(j + 1), SegmentValue::Exact(slot + 1)),
                ],
                coolwarm(v).filled(),
            )
        }))?;

        chart.draw_series(cells.iter().map(|&(i, j, v)| {
            let slot = k - 1 - i;
            let color = if needs_light_text(v) { WHITE } else { BLACK };
            let style = (FONT_FAMILY, 16)
                .into_font()
                .color(&color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            Text::new(
                format_cell(v),
                (SegmentValue::CenterOf(j), SegmentValue::CenterOf(slot)),
                style,
            )
        }))?;

        draw_color_bar(&bar_area)?;

        root.present()?;
        Ok(())
    }
}

/// Vertical legend of the cool-warm scale over [-1, 1].
fn draw_color_bar(area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>) -> DrawResult {
    let mut bar = ChartBuilder::on(area)
        .margin_top(10)
        .margin_bottom(50)
        .margin_right(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..1.0, -1.0..1.0)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_label_formatter(&|v| format!("{:.1}", v))
        .draw()?;

    let step = 2.0 / COLOR_BAR_STEPS as f64;
    bar.draw_series((0..COLOR_BAR_STEPS).map(|i| {
        let lo = -1.0 + i as f64 * step;
        Rectangle::new([(0.0, lo), (1.0, lo + step)], coolwarm(lo + step / 2.0).filled())
    }))?;
    Ok(())
}
