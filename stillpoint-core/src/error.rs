//! Error types for stillpoint-core

use thiserror::Error;

/// Main error type for the stillpoint-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid caller input (bad year, month format, view mode, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for stillpoint-core
pub type Result<T> = std::result::Result<T, Error>;
