//! Error types for quantum token operations

use thiserror::Error;

/// Result alias for quantum operations
pub type QuantumResult<T> = Result<T, QuantumError>;

/// Errors raised by superposition and entanglement operators
///
/// Every failure leaves the touched tokens unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    #[error("no states to superpose")]
    NoStates,

    #[error("amplitude mismatch: {states} states but {amplitudes} amplitudes")]
    AmplitudeMismatch { states: usize, amplitudes: usize },

    #[error("amplitudes not normalized: sum of squares is {0}")]
    NotNormalized(f64),

    #[error("token is not in superposition")]
    NotSuperposed,

    #[error("collapse index {index} out of range for {len} states")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot entangle a token with itself")]
    SelfEntanglement,

    #[error("token is not entangled")]
    NotEntangled,
}
