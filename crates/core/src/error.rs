//! Error types for the BPE library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
///
/// Training outcomes (running out of mergeable pairs, an unreachable
/// vocabulary target) are not errors; they are reported through
/// `TrainerState`. Only persistence and configuration can fail.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Error loading a trained model
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a trained model
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
