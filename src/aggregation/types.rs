//! Data types used by the aggregation pipeline.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::stats::SeriesStats;

/// One sample: milliseconds since the file's first record, and the measured value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub time_offset: f64,
    pub value: f64,
}

/// A finalized, immutable series of points in file row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    points: Vec<Point>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Run label of the series (the parent folder name of its source file).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeriesLabels {
    pub plot_name: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
}

/// A parsed value column: the series plus the labels it is charted under.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub series: Series,
    pub labels: SeriesLabels,
}

/// Statistics and assigned color of one series in a rendered chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotInfo {
    pub name: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub color: String,
}

impl PlotInfo {
    pub fn new(stats: SeriesStats, color: String) -> Self {
        Self {
            name: stats.name,
            mean: stats.mean,
            min: stats.min,
            max: stats.max,
            std_dev: stats.std_dev,
            color,
        }
    }
}

/// Chart file path to the ordered info of the series drawn in it.
pub type ChartInfo = BTreeMap<PathBuf, Vec<PlotInfo>>;
