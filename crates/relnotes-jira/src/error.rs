//! JIRA error types

use thiserror::Error;

/// Errors raised while talking to the tracker or reading its records
#[derive(Debug, Error)]
pub enum JiraError {
    /// The search endpoint reported errors
    #[error("Tracker returned errors: {}", .0.join("; "))]
    Search(Vec<String>),

    /// Non-success HTTP status without a recognizable error payload
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// A configured field name is not known to the tracker
    #[error("Field '{0}' is not defined by the tracker")]
    UnknownField(String),

    /// An issue record lacks a field every record is expected to carry
    #[error("Issue {issue} is missing field '{field}'")]
    MissingField { issue: String, field: String },

    /// Pagination made no progress
    #[error("Search stalled at offset {start_at} of {total}")]
    Stalled { start_at: u64, total: u64 },

    /// Invalid tracker URL
    #[error("Invalid tracker URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for tracker operations
pub type Result<T> = std::result::Result<T, JiraError>;
