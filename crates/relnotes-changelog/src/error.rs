//! Report error types

use thiserror::Error;

/// Report generation errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Failed to open an output file
    #[error("Failed to create {path}: {source}")]
    CreateFailed {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    /// IO error while writing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ChangelogError>;
