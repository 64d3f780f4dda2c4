//! Error types for the team optimizer

use player_pool::Role;
use thiserror::Error;

/// Result type alias for optimizer operations
pub type Result<T> = std::result::Result<T, OptimizerError>;

/// Errors raised by the optimizer
///
/// Running out of candidates or budget is not an error; see
/// [`crate::OptimizationStatus`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("Unknown metric '{0}'")]
    UnknownMetric(String),

    #[error("Team has no {missing} player")]
    IncompleteTeam { missing: Role },

    #[error("Team has more than one {0} player")]
    DuplicateRole(Role),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
