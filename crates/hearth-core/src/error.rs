//! Error types for the Hearth command palette.

use std::time::Duration;
use thiserror::Error;

/// Search service errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The search backend reported a failure.
    #[error("Search backend error: {0}")]
    Backend(String),

    /// The backend answered with something we could not decode.
    #[error("Search decode error: {0}")]
    Decode(String),

    /// The search backend is not reachable.
    #[error("Search service unavailable")]
    Unavailable,
}

/// Backend errors - surfaced to the palette controller.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Search failed.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Search did not finish in time.
    #[error("Search timeout after {duration:?}")]
    Timeout { duration: Duration },

    /// No async runtime to run the search on.
    #[error("Async runtime unavailable")]
    RuntimeUnavailable,
}

/// Key-value storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialize(e.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}
