//! Error types for the pattern engine

use thiserror::Error;

/// Result alias for pattern operations
pub type PatternResult<T> = Result<T, PatternError>;

/// Errors raised while registering rules
///
/// Only the left side can fail: a right side that does not compile is
/// demoted to a literal template, never an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    #[error("left pattern '{pattern}' does not compile: {message}")]
    BadLeftPattern { pattern: String, message: String },
}
