//! Error types for the RIFT core substrate

use thiserror::Error;

/// Result alias for token operations
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors raised while governing a token
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenError {
    #[error("token was never allocated")]
    NotAllocated,

    #[error("token has no memory span")]
    MissingSpan,

    #[error("span alignment {0} is not a power of two")]
    BadAlignment(u64),

    #[error("numeric token is not initialized")]
    Uninitialized,

    #[error("superposition has no states")]
    EmptySuperposition,

    #[error("amplitudes not normalized: sum of squares is {0}")]
    NotNormalized(f64),

    #[error("entanglement lists no peers")]
    NoPeers,
}

/// Errors raised by span construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpanError {
    #[error("alignment {0} is not a power of two")]
    InvalidAlignment(u64),

    #[error("unknown span kind '{0}'")]
    UnknownKind(String),
}

/// Errors raised by the recursive-owner lock
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LockError {
    #[error("unlock refused: calling thread does not own the lock")]
    NotOwner,

    #[error("lock is not held")]
    NotHeld,
}
