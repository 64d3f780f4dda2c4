//! Error types for the player pool

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for player pool operations
pub type Result<T> = std::result::Result<T, PoolError>;

/// Errors that can occur while loading or assembling players
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Required file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Unknown role: '{0}'")]
    UnknownRole(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
