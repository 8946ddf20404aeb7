//! Line chart of predicted average daily temperature.

use std::path::Path;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::forecast::ChartSeries;

const CHART_SIZE: (u32, u32) = (960, 540);
const CAPTION: &str = "Predicted average daily temperature (°C)";

/// Chart state owned by a session. Dropping it is the "destroy" step; a new
/// search builds a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastChart {
    series: ChartSeries,
}

impl ForecastChart {
    pub fn new(series: ChartSeries) -> Self {
        Self { series }
    }

    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    pub fn render_svg(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), points = self.series.len(), "Rendering chart");
        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        draw(&root, &self.series)
    }

    pub fn to_svg_string(&self) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
            draw(&root, &self.series)?;
        }
        Ok(svg)
    }
}

fn draw<DB>(root: &DrawingArea<DB, Shift>, series: &ChartSeries) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (lo, hi) = series.value_range().unwrap_or((0.0, 0.0));
    let x_max = (series.len() as u32).saturating_sub(1).max(1);

    let mut chart = ChartBuilder::on(root)
        .caption(CAPTION, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0u32..x_max, (lo - 1.0)..(hi + 1.0))?;

    let labels = &series.labels;
    chart
        .configure_mesh()
        .x_labels(series.len().max(2))
        .x_label_formatter(&|x: &u32| labels.get(*x as usize).cloned().unwrap_or_default())
        .y_desc("°C")
        .draw()?;

    let points: Vec<(u32, f64)> = series
        .data
        .iter()
        .enumerate()
        .map(|(i, v)| (i as u32, *v))
        .collect();

    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::DailyAggregate;

    fn series() -> ChartSeries {
        ChartSeries::from_aggregates(&[
            DailyAggregate::new("2024-05-01", 14.2),
            DailyAggregate::new("2024-05-02", 16.75),
            DailyAggregate::new("2024-05-03", 12.0),
        ])
    }

    #[test]
    fn test_svg_contains_labels() {
        let svg = ForecastChart::new(series()).to_svg_string().unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("2024-05-01"));
    }

    #[test]
    fn test_empty_series_still_renders() {
        let svg = ForecastChart::new(ChartSeries::default())
            .to_svg_string()
            .unwrap();
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_render_svg_writes_file() {
        let path = std::env::temp_dir().join("city_weather_test_chart.svg");
        let _ = std::fs::remove_file(&path);

        ForecastChart::new(series()).render_svg(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("</svg>"));
        std::fs::remove_file(&path).unwrap();
    }
}
