//! Error types for bookworm-core

use thiserror::Error;

/// Main error type for the bookworm-core library
///
/// Collectors never surface these; only configuration, logging setup and the
/// final snapshot write can fail.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// External script could not be run or returned unusable output
    #[error("external script {script}: {message}")]
    External { script: String, message: String },
}

/// Result type alias for bookworm-core
pub type Result<T> = std::result::Result<T, Error>;
