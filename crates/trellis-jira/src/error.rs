//! Error types for trellis-jira operations.

use thiserror::Error;

/// The error type for tracker client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("tracker returned HTTP {status} for {context}")]
    Status {
        /// HTTP status code from the response.
        status: u16,
        /// What was being requested when the status came back.
        context: String,
    },

    /// The requested item does not exist.
    #[error("item not found: {0}")]
    NotFound(String),

    /// The response body did not match the expected wire format.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A specialized Result type for tracker client operations.
pub type Result<T> = std::result::Result<T, Error>;
