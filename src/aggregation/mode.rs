use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::aggregation::assemble::process_plots;
use crate::aggregation::color::ColorAssigner;
use crate::aggregation::types::{ChartInfo, PlotData};
use crate::config::GenerationMode;
use crate::error::{PlotError, Result};
use crate::grouper::{FileGroups, merge_groups, scan, sorted_subdirs};
use crate::naming::{comparison_parent_name, comparison_run_name, compound_folder_name, folder_name};
use crate::output::{ReportSink, print_json};
use crate::parser::read_data;
use crate::render::ChartRenderer;

/// Collaborators shared by every mode: where charts and reports go.
pub struct PlotContext<'a> {
    pub renderer: &'a dyn ChartRenderer,
    pub report: &'a dyn ReportSink,
    pub colors: ColorAssigner<'a>,
}

/// Runs one generation mode over the input folders.
///
/// Failures on single files are logged and skipped. An error is returned only
/// when no input folders are given or the mode's output folder can not be
/// created.
pub fn run_mode(mode: GenerationMode, roots: &[PathBuf], ctx: &PlotContext) -> Result<()> {
    if roots.is_empty() {
        return Err(PlotError::Config("Input folders are not defined.".to_string()));
    }

    info!(mode = %mode, roots = roots.len(), "Starting chart generation");

    match mode {
        GenerationMode::Standard => process_standard_mode(roots, ctx),
        GenerationMode::Compound => process_compound_mode(roots, ctx),
        GenerationMode::Comparison => process_comparison_mode(roots, ctx),
    }
}

/// Charts every file on its own, into the folder holding the file. One report
/// is produced per input folder.
#[tracing::instrument(skip_all, fields(roots = roots.len()))]
fn process_standard_mode(roots: &[PathBuf], ctx: &PlotContext) -> Result<()> {
    for root in roots {
        let mut info_map = ChartInfo::new();

        for files in scan(root).into_values() {
            for file in files {
                let Some(data) = parse_file(&file) else {
                    continue;
                };

                let folder = file.parent().unwrap_or(root);
                process_plots(folder, vec![data], ctx.renderer, &ctx.colors, &mut info_map);
            }
        }

        generate_report(ctx, root, &info_map);
    }

    Ok(())
}

/// Merges the files of all input folders and draws same-named files on
/// shared charts under `compound_results_<T>`.
#[tracing::instrument(skip_all, fields(roots = roots.len()))]
fn process_compound_mode(roots: &[PathBuf], ctx: &PlotContext) -> Result<()> {
    let mut groups = FileGroups::new();

    for root in roots {
        merge_groups(&mut groups, scan(root));
    }

    let run_folders: Vec<String> = groups
        .values()
        .flatten()
        .filter_map(|file| file.parent())
        .map(folder_name)
        .collect();

    let name = compound_folder_name(run_folders.iter().map(String::as_str));
    let folder = output_parent(&roots[0]).join(name);

    ensure_folder(&folder)?;

    process_files_per_probe(groups, &folder, ctx);
    Ok(())
}

/// Walks the runs of every input folder in lockstep: the i-th run of each
/// input is charted together under `comparison_results_<S>/<NNN>_<T>`.
#[tracing::instrument(skip_all, fields(roots = roots.len()))]
fn process_comparison_mode(roots: &[PathBuf], ctx: &PlotContext) -> Result<()> {
    let mut runs_per_root: Vec<Vec<PathBuf>> = Vec::new();
    let mut root_names: Vec<String> = Vec::new();

    for root in roots {
        let runs = match sorted_subdirs(root) {
            Ok(runs) => runs,
            Err(e) => {
                warn!(folder = %root.display(), error = %e, "Folder can not be listed");
                continue;
            }
        };

        if runs.is_empty() {
            continue;
        }

        runs_per_root.push(runs);
        root_names.push(folder_name(root));
    }

    let parent_name = comparison_parent_name(root_names.iter().map(String::as_str));
    let parent_folder = output_parent(&roots[0]).join(parent_name);

    ensure_folder(&parent_folder)?;

    for idx in 0.. {
        let runs: Vec<&PathBuf> = runs_per_root.iter().filter_map(|r| r.get(idx)).collect();

        if runs.is_empty() {
            break;
        }

        let mut groups = FileGroups::new();

        for run in &runs {
            merge_groups(&mut groups, scan(run));
        }

        let run_names: Vec<String> = runs.iter().map(|r| folder_name(r)).collect();
        let folder = parent_folder.join(comparison_run_name(idx, run_names.iter().map(String::as_str)));

        if ensure_folder(&folder).is_err() {
            continue;
        }

        info!(run = idx + 1, inputs = runs.len(), folder = %folder.display(), "Comparing runs");
        process_files_per_probe(groups, &folder, ctx);
    }

    Ok(())
}

/// Parses every group and renders its aligned charts into `folder`. The
/// report is generated only if at least one chart was written.
fn process_files_per_probe(groups: FileGroups, folder: &Path, ctx: &PlotContext) {
    let mut info_map = ChartInfo::new();

    for files in groups.into_values() {
        let parsed: Vec<Vec<PlotData>> = files.iter().filter_map(|f| parse_file(f)).collect();

        process_plots(folder, parsed, ctx.renderer, &ctx.colors, &mut info_map);
    }

    if !info_map.is_empty() {
        generate_report(ctx, folder, &info_map);
    }
}

fn parse_file(file: &Path) -> Option<Vec<PlotData>> {
    info!(path = %file.display(), "Processing file");

    match read_data(file) {
        Ok(data) => Some(data),
        Err(e) => {
            error!(path = %file.display(), error = %e, "File processing failed");
            None
        }
    }
}

fn generate_report(ctx: &PlotContext, folder: &Path, info_map: &ChartInfo) {
    if let Err(e) = print_json(info_map) {
        error!(folder = %folder.display(), error = %e, "Chart info could not be printed");
    }

    if let Err(e) = ctx.report.generate(folder, info_map) {
        error!(folder = %folder.display(), error = %e, "Report generation failed");
    }
}

/// Output folders are created next to the first input folder.
fn output_parent(root: &Path) -> &Path {
    root.parent().unwrap_or(root)
}

/// Creates `folder` unless it already is a directory. A regular file in its
/// place is an error.
fn ensure_folder(folder: &Path) -> Result<()> {
    if folder.is_dir() {
        return Ok(());
    }

    fs::create_dir(folder).map_err(|e| {
        error!(folder = %folder.display(), error = %e, "Can not create folder");
        PlotError::io(folder, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_parent() {
        assert_eq!(output_parent(Path::new("/data/results_a")), Path::new("/data"));
        assert_eq!(output_parent(Path::new("/")), Path::new("/"));
    }

    #[test]
    fn test_ensure_folder_existing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        ensure_folder(dir.path()).unwrap();
    }

    #[test]
    fn test_ensure_folder_rejects_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, "x").unwrap();

        let err = ensure_folder(&file).unwrap_err();
        assert!(matches!(err, PlotError::Io { .. }));
    }

    #[test]
    fn test_ensure_folder_fails_without_parent() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_folder(&dir.path().join("a/b")).unwrap_err();

        assert!(matches!(err, PlotError::Io { .. }));
    }
}
