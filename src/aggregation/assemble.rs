use std::path::Path;

use tracing::{error, info};

use crate::aggregation::color::{ColorAssigner, Rgb};
use crate::aggregation::types::{ChartInfo, PlotData, PlotInfo, Series};
use crate::render::ChartRenderer;
use crate::stats::SeriesStats;

/// Extension of rendered chart files.
pub const CHART_FILE_EXTENSION: &str = "png";

/// A series placed in a chart with its assigned color.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub series: Series,
    pub color: Rgb,
}

/// Everything needed to draw one chart: the i-th series of every file in a group.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPayload {
    pub index: usize,
    pub plot_name: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub series: Vec<ChartSeries>,
}

impl ChartPayload {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.plot_name, CHART_FILE_EXTENSION)
    }
}

/// Aligns the parsed files of one group by column position.
///
/// Payload `i` holds the `i`-th series of every file that has one, in file
/// order. Labels come from the last contributing file. Assembly stops at the
/// first index no file reaches.
pub fn assemble_payloads(files: Vec<Vec<PlotData>>, colors: &ColorAssigner) -> Vec<ChartPayload> {
    let mut columns: Vec<_> = files.into_iter().map(Vec::into_iter).collect();
    let mut payloads = Vec::new();

    for index in 0.. {
        let members: Vec<PlotData> = columns.iter_mut().filter_map(Iterator::next).collect();

        let Some(last) = members.last() else {
            break;
        };
        let labels = last.labels.clone();

        let series = members
            .into_iter()
            .enumerate()
            .map(|(pos, data)| ChartSeries {
                series: data.series,
                color: colors.color(pos),
            })
            .collect();

        payloads.push(ChartPayload {
            index,
            plot_name: labels.plot_name,
            x_axis_label: labels.x_axis_label,
            y_axis_label: labels.y_axis_label,
            series,
        });
    }

    payloads
}

/// Summarizes every series of a payload for the report table.
pub fn payload_info(payload: &ChartPayload) -> Vec<PlotInfo> {
    payload
        .series
        .iter()
        .map(|s| PlotInfo::new(SeriesStats::summarize(&s.series), s.color.hex()))
        .collect()
}

/// Assembles the group's charts, renders each into `folder` and records the
/// per-series info of every chart written.
///
/// A chart that fails to render is logged and left out of `info_map`.
pub fn process_plots(
    folder: &Path,
    files: Vec<Vec<PlotData>>,
    renderer: &dyn ChartRenderer,
    colors: &ColorAssigner,
    info_map: &mut ChartInfo,
) {
    for payload in assemble_payloads(files, colors) {
        let path = folder.join(payload.file_name());

        if let Err(e) = renderer.render(&payload, &path) {
            error!(path = %path.display(), error = %e, "Chart rendering failed");
            continue;
        }

        info!(path = %path.display(), series = payload.series.len(), "Resulted chart saved");
        info_map.insert(path, payload_info(&payload));
    }
}
