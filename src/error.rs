//! Error types for the sokoban-rl crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the sokoban-rl crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("level file not found: {}", path.display())]
    LevelNotFound { path: PathBuf },

    #[error("malformed level: {reason}")]
    MalformedLevel { reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid action index {index} (must be 0-3)")]
    InvalidAction { index: usize },

    #[error("failed to write trace to {} after {attempts} attempts: {source}", path.display())]
    TraceWrite {
        path: PathBuf,
        attempts: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
