//! CLI entry point for the probe plotter.
//!
//! Reads benchmark probe files from one or more result folders and renders
//! them as PNG charts with a CSV summary, in standard, compound or comparison
//! mode.

use anyhow::Result;
use clap::Parser;
use probe_plotter::aggregation::color::ColorAssigner;
use probe_plotter::aggregation::{PlotContext, run_mode};
use probe_plotter::config::{GenerationMode, PlotterConfig};
use probe_plotter::error::PlotError;
use probe_plotter::output::CsvReportWriter;
use probe_plotter::render::PngRenderer;
use std::ffi::OsStr;
use std::path::Path;
use std::str::FromStr;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "probe_plotter")]
#[command(about = "Renders charts from benchmark probe results", long_about = None)]
struct Cli {
    /// Comma-separated list of result folders
    #[arg(short, long, value_name = "FOLDERS")]
    input_folders: Option<String>,

    /// How files from the input folders are combined into charts
    #[arg(
        short,
        long,
        default_value_t = GenerationMode::Standard,
        value_parser = GenerationMode::from_str
    )]
    generation_mode: GenerationMode,

    /// Chart width in pixels
    #[arg(long, default_value_t = PlotterConfig::DEFAULT_CHART_WIDTH)]
    chart_width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = PlotterConfig::DEFAULT_CHART_HEIGHT)]
    chart_height: u32,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/probe_plotter.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("probe_plotter.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = match PlotterConfig::new(cli.input_folders.as_deref(), cli.generation_mode) {
        Ok(config) => config.with_chart_size(cli.chart_width, cli.chart_height),
        Err(PlotError::Config(msg)) => {
            // Missing or nonexistent folders are reported, not treated as failures.
            println!("{msg}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let renderer = PngRenderer::new(config.chart_width, config.chart_height);
    let report = CsvReportWriter;
    let ctx = PlotContext {
        renderer: &renderer,
        report: &report,
        colors: ColorAssigner::default(),
    };

    if let Err(e) = run_mode(config.mode, &config.input_folders, &ctx) {
        error!(mode = %config.mode, error = %e, "Chart generation aborted");
        return Err(e.into());
    }

    info!(mode = %config.mode, "Chart generation finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_mode_flag_is_case_insensitive() {
        let cli = Cli::try_parse_from(["probe_plotter", "-g", "Comparison"]).unwrap();
        assert_eq!(cli.generation_mode, GenerationMode::Comparison);
    }

    #[test]
    fn test_generation_mode_defaults_to_standard() {
        let cli = Cli::try_parse_from(["probe_plotter", "-i", "results_a"]).unwrap();
        assert_eq!(cli.generation_mode, GenerationMode::Standard);
        assert_eq!(cli.input_folders.as_deref(), Some("results_a"));
    }

    #[test]
    fn test_unknown_generation_mode_is_rejected() {
        assert!(Cli::try_parse_from(["probe_plotter", "-g", "sideways"]).is_err());
    }
}
