//! Parser for probe measurement files.
//!
//! A probe file holds optional `--` comment lines, an optional metadata line
//! carrying axis labels, and data rows of the form
//! `timestamp,value1[,value2,...]`. Each value column becomes one series.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::aggregation::types::{PlotData, Point, Series, SeriesLabels};
use crate::error::{PlotError, Result};

/// Extension of files picked up by the directory scan.
pub const INPUT_FILE_EXTENSION: &str = ".csv";

/// Lines starting with this marker are ignored.
pub const COMMENT_PREFIX: &str = "--";

/// Marker of the metadata line holding the axis labels.
pub const META_INFO_PREFIX: &str = "**";

/// Separator between quoted label tokens on the metadata line.
pub const META_INFO_SEPARATOR: &str = ",";

/// Reads a probe file from disk into one [`PlotData`] per value column.
///
/// # Errors
///
/// Returns [`PlotError::Io`] if the file cannot be read,
/// [`PlotError::MalformedInput`] if it has no data rows, no value columns, or
/// a row shorter than the first one, and [`PlotError::Parse`] for
/// non-numeric fields.
pub fn read_data(path: &Path) -> Result<Vec<PlotData>> {
    let file = File::open(path).map_err(|e| PlotError::io(path, e))?;
    parse_reader(path, BufReader::new(file))
}

/// Parses probe data from any buffered source. `path` supplies the plot name
/// (file stem), the series name (parent folder name) and error context.
pub fn parse_reader<R: BufRead>(path: &Path, reader: R) -> Result<Vec<PlotData>> {
    let mut builder: Option<SeriesBuilder> = None;
    let mut meta_info: Vec<String> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| PlotError::io(path, e))?;
        let line_no = idx + 1;

        if line.starts_with(COMMENT_PREFIX) || line.trim().is_empty() {
            continue;
        }

        if let Some(meta) = line.strip_prefix(META_INFO_PREFIX) {
            meta_info = parse_meta_info(meta);
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        let time = parse_timestamp(path, line_no, fields[0])?;

        if builder.is_none() {
            builder = Some(SeriesBuilder::start(path, time, fields.len() - 1, &meta_info)?);
        }

        if let Some(b) = builder.as_mut() {
            b.push_row(path, line_no, time, &fields[1..])?;
        }
    }

    match builder {
        Some(b) => {
            let data = b.finish();
            debug!(path = %path.display(), series = data.len(), "Probe file parsed");
            Ok(data)
        }
        None => Err(PlotError::MalformedInput {
            path: path.to_path_buf(),
            reason: "no data rows".to_string(),
        }),
    }
}

/// Splits the metadata payload (text after the marker) into label tokens.
fn parse_meta_info(meta: &str) -> Vec<String> {
    let separator = format!("\"{META_INFO_SEPARATOR}\"");

    meta.split(separator.as_str())
        .map(|token| token.replace('"', ""))
        .collect()
}

fn parse_timestamp(path: &Path, line: usize, field: &str) -> Result<i64> {
    field.trim().parse::<i64>().map_err(|e| PlotError::Parse {
        path: path.to_path_buf(),
        line,
        reason: format!("invalid timestamp '{field}': {e}"),
    })
}

/// Accumulates rows of one file until [`SeriesBuilder::finish`] turns the
/// column buffers into immutable series.
#[derive(Debug)]
pub struct SeriesBuilder {
    init_time: i64,
    columns: Vec<Vec<Point>>,
    labels: Vec<SeriesLabels>,
    series_name: String,
}

impl SeriesBuilder {
    /// Allocates one column per value field of the first data row.
    pub fn start(path: &Path, init_time: i64, value_columns: usize, meta_info: &[String]) -> Result<Self> {
        if value_columns < 1 {
            return Err(PlotError::MalformedInput {
                path: path.to_path_buf(),
                reason: "first data row has no value columns".to_string(),
            });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = file_name
            .strip_suffix(INPUT_FILE_EXTENSION)
            .unwrap_or(&file_name);

        let series_name = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let x_axis_label = meta_info.first().cloned().unwrap_or_default();

        let labels = (0..value_columns)
            .map(|i| SeriesLabels {
                plot_name: format!("Plot_{}_{:02}", stem, i + 1),
                x_axis_label: x_axis_label.clone(),
                y_axis_label: meta_info.get(i + 1).cloned().unwrap_or_default(),
            })
            .collect();

        Ok(Self {
            init_time,
            columns: vec![Vec::new(); value_columns],
            labels,
            series_name,
        })
    }

    /// Appends one point per allocated column. Extra trailing fields are
    /// ignored; missing ones fail the file.
    pub fn push_row(&mut self, path: &Path, line: usize, time: i64, values: &[&str]) -> Result<()> {
        if values.len() < self.columns.len() {
            return Err(PlotError::MalformedInput {
                path: path.to_path_buf(),
                reason: format!(
                    "line {line} has {} value columns, expected {}",
                    values.len(),
                    self.columns.len()
                ),
            });
        }

        let time_offset = time.checked_sub(self.init_time).ok_or_else(|| PlotError::Parse {
            path: path.to_path_buf(),
            line,
            reason: format!("timestamp {time} is out of range of the first record"),
        })? as f64;

        for (column, raw) in self.columns.iter_mut().zip(values) {
            let value = raw.trim().parse::<f64>().map_err(|e| PlotError::Parse {
                path: path.to_path_buf(),
                line,
                reason: format!("invalid value '{raw}': {e}"),
            })?;

            column.push(Point { time_offset, value });
        }

        Ok(())
    }

    /// Consumes the builder, releasing the row buffers into finalized series.
    pub fn finish(self) -> Vec<PlotData> {
        let series_name = self.series_name;

        self.columns
            .into_iter()
            .zip(self.labels)
            .map(|(mut points, labels)| {
                points.shrink_to_fit();
                PlotData {
                    series: Series::new(series_name.clone(), points),
                    labels,
                }
            })
            .collect()
    }
}
