//! Run configuration: input folders, generation mode and chart size.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{PlotError, Result};

/// How probe files from the input folders are combined into charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Every file is charted on its own, next to the file.
    #[default]
    Standard,
    /// Same-named files from all inputs are drawn on shared charts.
    Compound,
    /// The i-th run of every input is compared side by side.
    Comparison,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Standard => "standard",
            GenerationMode::Compound => "compound",
            GenerationMode::Comparison => "comparison",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(GenerationMode::Standard),
            "compound" => Ok(GenerationMode::Compound),
            "comparison" => Ok(GenerationMode::Comparison),
            other => Err(PlotError::Config(format!("Unknown generation mode: {other}."))),
        }
    }
}

/// Validated settings for one plotter invocation.
#[derive(Debug, Clone)]
pub struct PlotterConfig {
    pub input_folders: Vec<PathBuf>,
    pub mode: GenerationMode,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl PlotterConfig {
    pub const DEFAULT_CHART_WIDTH: u32 = 800;
    pub const DEFAULT_CHART_HEIGHT: u32 = 400;

    /// Builds a config from a comma-separated folder list.
    ///
    /// Folders are made absolute and must exist.
    pub fn new(input_folders: Option<&str>, mode: GenerationMode) -> Result<Self> {
        let Some(raw) = input_folders else {
            return Err(PlotError::Config("Input folders are not defined.".to_string()));
        };

        let mut folders = Vec::new();

        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let folder = std::path::absolute(part)
                .map_err(|e| PlotError::Config(format!("Folder '{part}' is invalid: {e}.")))?;

            if !folder.exists() {
                return Err(PlotError::Config(format!(
                    "Folder '{}' does not exist.",
                    folder.display()
                )));
            }

            folders.push(folder);
        }

        if folders.is_empty() {
            return Err(PlotError::Config("Input folders are not defined.".to_string()));
        }

        Ok(Self {
            input_folders: folders,
            mode,
            chart_width: Self::DEFAULT_CHART_WIDTH,
            chart_height: Self::DEFAULT_CHART_HEIGHT,
        })
    }

    pub fn with_chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_width = width;
        self.chart_height = height;
        self
    }
}
