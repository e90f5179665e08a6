//! Error types for the policy gate

use thiserror::Error;

/// Result alias for policy operations
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Errors raised while configuring or querying the matrix
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    #[error("threshold {0} is outside (0, 1]")]
    InvalidThreshold(f64),

    #[error("entropy threshold {0} is outside [0, 1]")]
    InvalidEntropyThreshold(f64),
}
