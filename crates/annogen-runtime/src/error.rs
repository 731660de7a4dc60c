//! Runtime error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while running a generation build.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Aggregation or rendering failed.
    #[error(transparent)]
    Generate(#[from] annogen_core::GenerateError),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An entry of the annotation feed could not be decoded.
    #[error("Invalid annotation event #{index}: {source}")]
    Feed {
        /// Zero-based position of the event in the feed.
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Reading the feed or writing a generated file failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `check` mode found generated files that differ from the fresh output.
    #[error("{} generated file(s) out of date: {}", paths.len(), display_paths(paths))]
    StaleOutput {
        /// Out-of-date files.
        paths: Vec<PathBuf>,
    },
}

impl RuntimeError {
    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
