//! Error types for loading projects and chart options.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for fallible chart operations.
pub type Result<T> = std::result::Result<T, GanttError>;

/// Errors raised at the edges of the chart (files, options).
///
/// Layout itself never fails; degenerate geometry is represented instead.
#[derive(Error, Debug)]
pub enum GanttError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid chart options: {message}")]
    InvalidOptions { message: String },
}

impl GanttError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
