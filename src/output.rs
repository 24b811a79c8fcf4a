//! Report hand-off for rendered charts.
//!
//! Supports pretty-printing the collected chart info and writing it as a CSV
//! summary next to the charts.

use std::fs::File;
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregation::types::ChartInfo;
use crate::error::{PlotError, Result};

/// File name of the summary written into each report folder.
pub const SUMMARY_FILE_NAME: &str = "chart_summary.csv";

/// Receives the chart table of one finished output folder.
pub trait ReportSink {
    fn generate(&self, folder: &Path, info: &ChartInfo) -> Result<()>;
}

/// One CSV row: a series drawn in a chart.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    chart: String,
    series: &'a str,
    mean: f64,
    min: f64,
    max: f64,
    std_dev: f64,
    color: &'a str,
}

/// Writes `chart_summary.csv` into the report folder.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvReportWriter;

impl ReportSink for CsvReportWriter {
    fn generate(&self, folder: &Path, info: &ChartInfo) -> Result<()> {
        let path = folder.join(SUMMARY_FILE_NAME);
        write_summary(&path, info)?;

        info!(path = %path.display(), charts = info.len(), "Chart summary written");
        Ok(())
    }
}

/// Writes the chart table to `path`, one row per series, charts in path order.
pub fn write_summary(path: &Path, info: &ChartInfo) -> Result<()> {
    let file = File::create(path).map_err(|e| PlotError::io(path, e))?;

    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for (chart, rows) in info {
        for row in rows {
            writer
                .serialize(SummaryRow {
                    chart: chart.display().to_string(),
                    series: &row.name,
                    mean: row.mean,
                    min: row.min,
                    max: row.max,
                    std_dev: row.std_dev,
                    color: &row.color,
                })
                .map_err(|e| csv_error(path, e))?;
        }
    }

    writer.flush().map_err(|e| PlotError::io(path, e))?;
    Ok(())
}

/// Logs chart info as pretty-printed JSON.
pub fn print_json(info: &ChartInfo) -> anyhow::Result<()> {
    debug!("{}", serde_json::to_string_pretty(info)?);
    Ok(())
}

fn csv_error(path: &Path, e: csv::Error) -> PlotError {
    match e.into_kind() {
        csv::ErrorKind::Io(source) => PlotError::io(path, source),
        other => PlotError::Report {
            path: path.to_path_buf(),
            reason: format!("{other:?}"),
        },
    }
}
