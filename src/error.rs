//! Error type shared by the aggregation pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while reading probe files or writing charts.
///
/// File-level variants (`MalformedInput`, `Parse`, `Io` on a single file) are
/// caught by the mode handlers, logged, and the file is skipped.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid data file '{}': {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("failed to parse '{}' at line {line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to render chart '{}': {reason}", path.display())]
    Render { path: PathBuf, reason: String },

    #[error("failed to write report '{}': {reason}", path.display())]
    Report { path: PathBuf, reason: String },
}

impl PlotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlotError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
