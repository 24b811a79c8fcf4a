//! Chart rendering.
//!
//! [`ChartRenderer`] is the seam between the aggregation pipeline and the
//! drawing backend. [`PngRenderer`] draws line charts with `plotters`.

use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::FontStyle;
use tracing::debug;

use crate::aggregation::assemble::ChartPayload;
use crate::error::{PlotError, Result};

/// Writes one chart payload to an image file.
pub trait ChartRenderer {
    fn render(&self, payload: &ChartPayload, path: &Path) -> Result<()>;
}

/// Renders payloads as PNG line charts.
#[derive(Debug, Clone)]
pub struct PngRenderer {
    width: u32,
    height: u32,
}

impl PngRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self::new(800, 400)
    }
}

impl ChartRenderer for PngRenderer {
    fn render(&self, payload: &ChartPayload, path: &Path) -> Result<()> {
        debug!(path = %path.display(), width = self.width, height = self.height, "Rendering chart");

        draw_line_chart(payload, path, (self.width, self.height)).map_err(|e| PlotError::Render {
            path: path.to_path_buf(),
            reason: format!("{e:#}"),
        })
    }
}

fn draw_line_chart(payload: &ChartPayload, path: &Path, size: (u32, u32)) -> anyhow::Result<()> {
    let (x_range, y_range) = axis_ranges(payload);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&payload.y_axis_label, ("sans-serif", 30).into_font().style(FontStyle::Bold))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(payload.x_axis_label.as_str())
        .y_desc(payload.y_axis_label.as_str())
        .light_line_style(&WHITE)
        .bold_line_style(&RGBColor(128, 128, 128))
        .label_style(("sans-serif", 15).into_font().style(FontStyle::Bold))
        .draw()?;

    for member in &payload.series {
        let color = RGBColor(member.color.0, member.color.1, member.color.2);

        chart.draw_series(LineSeries::new(
            member.series.points().iter().map(|p| (p.time_offset, p.value)),
            color.stroke_width(3),
        ))?;
    }

    root.present()?;
    Ok(())
}

/// Data bounds over every series of the payload; degenerate spans are widened
/// so the chart always has a drawable area.
fn axis_ranges(payload: &ChartPayload) -> (Range<f64>, Range<f64>) {
    let points = payload.series.iter().flat_map(|s| s.series.points());

    let (mut x_min, mut x_max, mut y_min, mut y_max) =
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);

    for p in points {
        x_min = x_min.min(p.time_offset);
        x_max = x_max.max(p.time_offset);
        y_min = y_min.min(p.value);
        y_max = y_max.max(p.value);
    }

    if !x_min.is_finite() || !x_max.is_finite() {
        return (0.0..1.0, 0.0..1.0);
    }

    let y_pad = ((y_max - y_min) * 0.05).max(if y_max == y_min { 1.0 } else { 0.0 });
    let x_max = if x_max > x_min { x_max } else { x_min + 1.0 };

    (x_min..x_max, (y_min - y_pad)..(y_max + y_pad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::assemble::ChartSeries;
    use crate::aggregation::color::Rgb;
    use crate::aggregation::types::{Point, Series};

    fn payload(points: Vec<Point>) -> ChartPayload {
        ChartPayload {
            index: 0,
            plot_name: "Plot_p_01".to_string(),
            x_axis_label: String::new(),
            y_axis_label: String::new(),
            series: vec![ChartSeries {
                series: Series::new("run", points),
                color: Rgb(0, 255, 0),
            }],
        }
    }

    #[test]
    fn test_axis_ranges_cover_points() {
        let (x, y) = axis_ranges(&payload(vec![
            Point { time_offset: 0.0, value: 10.0 },
            Point { time_offset: 500.0, value: 30.0 },
        ]));

        assert_eq!(x, 0.0..500.0);
        assert_eq!(y, 9.0..31.0);
    }

    #[test]
    fn test_axis_ranges_single_point() {
        let (x, y) = axis_ranges(&payload(vec![Point { time_offset: 0.0, value: 5.0 }]));

        assert_eq!(x, 0.0..1.0);
        assert_eq!(y, 4.0..6.0);
    }
}
