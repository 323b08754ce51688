use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rendering or writing a graph
#[derive(Error, Debug)]
pub enum WriterError {
    /// Failed to read a template file
    #[error("Failed to read template {0}: {1}")]
    Template(PathBuf, #[source] std::io::Error),

    /// A module allow-list entry is not a valid glob
    #[error("Invalid module pattern {0:?}: {1}")]
    Filter(String, #[source] globset::Error),

    /// Failed to write the output file
    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, #[source] std::io::Error),

    /// JSON serialization failed
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for writer operations
pub type WriterResult<T> = Result<T, WriterError>;
