//! Relational trend plot: one line per region over days since first case.

use super::palette::series_color;
use super::{padded_range, ChartRenderer, DrawResult, FONT_FAMILY};
use crate::config::AnalysisConfig;
use crate::data::columns::{optional_f64_values, string_values};
use crate::error::Result;
use plotters::prelude::*;
use polars::prelude::DataFrame;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

const TITLE: &str = "Days from First Case vs Average Temperature";
const X_DESC: &str = "Days from First Case";
const Y_DESC: &str = "Average Temperature (°C)";
const SIZE: (u32, u32) = (800, 500);

/// Points of one region, sorted by x, one point per distinct x.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSeries {
    pub region: String,
    pub points: Vec<(f64, f64)>,
}

/// Prepared data for the relational plot.
#[derive(Debug, Clone)]
pub struct RelationalPlot {
    pub series: Vec<RegionSeries>,
    pub show_legend: bool,
}

impl RelationalPlot {
    /// Group rows by region; rows of one region sharing an x are averaged.
    pub fn from_dataframe(df: &DataFrame, config: &AnalysisConfig) -> Result<Self> {
        let regions = string_values(df, &config.group_column)?;
        let xs = optional_f64_values(df, &config.x_column)?;
        let ys = optional_f64_values(df, &config.target_column)?;

        // region -> x -> (sum, count)
        let mut grouped: BTreeMap<String, BTreeMap<OrderedX, (f64, usize)>> = BTreeMap::new();
        for ((region, x), y) in regions.into_iter().zip(xs).zip(ys) {
            if let (Some(region), Some(x), Some(y)) = (region, x, y) {
                let cell = grouped
                    .entry(region)
                    .or_default()
                    .entry(OrderedX(x))
                    .or_insert((0.0, 0));
                cell.0 += y;
                cell.1 += 1;
            }
        }

        let series: Vec<RegionSeries> = grouped
            .into_iter()
            .map(|(region, by_x)| RegionSeries {
                region,
                points: by_x
                    .into_iter()
                    .map(|(x, (sum, count))| (x.0, sum / count as f64))
                    .collect(),
            })
            .collect();
        debug!("Relational plot: {} region lines", series.len());

        Ok(Self {
            series,
            show_legend: config.show_relational_legend,
        })
    }

    fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let points = || self.series.iter().flat_map(|s| s.points.iter());
        (
            padded_range(points().map(|p| p.0)),
            padded_range(points().map(|p| p.1)),
        )
    }
}

impl ChartRenderer for RelationalPlot {
    fn draw(&self, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let ((x_min, x_max), (y_min, y_max)) = self.bounds();
        let mut chart = ChartBuilder::on(&root)
            .caption(TITLE, (FONT_FAMILY, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .draw()?;

        for (i, s) in self.series.iter().enumerate() {
            let color = series_color(i);
            let anno = chart.draw_series(LineSeries::new(
                s.points.iter().copied(),
                color.stroke_width(2),
            ))?;
            if self.show_legend {
                anno.label(s.region.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }

        if self.show_legend && !self.series.is_empty() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

/// f64 key with a total order, for grouping by x.
#[derive(Debug, Clone, Copy)]
struct OrderedX(f64);

impl PartialEq for OrderedX {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for OrderedX {}

impl PartialOrd for OrderedX {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedX {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    fn frame() -> DataFrame {
        df!(
            "Country_Region" => [Some("Italy"), Some("Italy"), Some("Italy"), Some("Chad"), None],
            "days_from_firstcase" => [Some(2i64), Some(1), Some(2), Some(0), Some(5)],
            "avgtemp" => [10.0f64, 8.0, 14.0, 30.0, 99.0],
        )
        .unwrap()
    }

    #[test]
    fn test_series_grouped_sorted_and_averaged() {
        let plot = RelationalPlot::from_dataframe(&frame(), &AnalysisConfig::default()).unwrap();

        assert_eq!(
            plot.series,
            vec![
                RegionSeries {
                    region: "Chad".to_string(),
                    points: vec![(0.0, 30.0)],
                },
                RegionSeries {
                    region: "Italy".to_string(),
                    points: vec![(1.0, 8.0), (2.0, 12.0)],
                },
            ]
        );
        assert!(!plot.show_legend);
    }

    #[test]
    fn test_legend_follows_config() {
        let config = AnalysisConfig::builder()
            .show_relational_legend(true)
            .build()
            .unwrap();
        let plot = RelationalPlot::from_dataframe(&frame(), &config).unwrap();
        assert!(plot.show_legend);
    }

    #[test]
    fn test_missing_x_column() {
        let config = AnalysisConfig::builder().x_column("week").build().unwrap();
        let err = RelationalPlot::from_dataframe(&frame(), &config).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relational_plot.png");
        let plot = RelationalPlot::from_dataframe(&frame(), &AnalysisConfig::default()).unwrap();
        plot.render(&path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
