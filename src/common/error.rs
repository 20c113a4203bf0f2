//! Error types for the probe runner
//!
//! These cover failures that stop the runner itself (bad configuration,
//! unwritable reports). A check that fails against the backend is not an
//! error here: it is recorded as data in the run report.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the probe runner
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    // === Check Suite Errors ===
    #[error("Invalid check suite '{path}': {reason}")]
    SuiteParse { path: String, reason: String },

    // === HTTP Client Errors ===
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to write file '{path}': {error}")]
    FileWrite { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid base URL error
    pub fn invalid_base_url(url: &str, reason: &str) -> Self {
        Self::InvalidBaseUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a file write error
    pub fn file_write(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        Self::FileWrite {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
