//! Error types for trellis operations.

use std::io;
use thiserror::Error;

/// The error type for trellis operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The tracker client failed.
    #[error("Tracker error: {0}")]
    Client(#[from] trellis_jira::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for trellis operations.
pub type Result<T> = std::result::Result<T, Error>;
