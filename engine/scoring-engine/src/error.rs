//! Error types for the scoring engine

use thiserror::Error;

/// Result type alias for scoring operations
pub type Result<T> = std::result::Result<T, ScoringError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
