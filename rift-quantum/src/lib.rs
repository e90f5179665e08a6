//! # RIFT Quantum Operations
//!
//! Superposition, entanglement, collapse, measurement and entropy over
//! `rift-core` tokens. The semantics are modeled, not realized: no
//! quantum hardware is involved.
//!
//! ## Responsibilities
//! - Put tokens into superposition with normalized amplitudes
//! - Link token pairs symmetrically through the entanglement registry
//! - Collapse a superposition into one concrete (type, value)
//! - Measure probabilistically and compute Shannon entropy
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use rift_core::prelude::*;
//! use rift_quantum::{entropy, superpose};
//!
//! let mut token = Token::new(TokenType::QInt, Span::new(SpanKind::Superposed, 32));
//! let states = vec![
//!     Arc::new(Token::new(TokenType::Int, Span::new(SpanKind::Fixed, 8))),
//!     Arc::new(Token::new(TokenType::Int, Span::new(SpanKind::Fixed, 8))),
//! ];
//! superpose(&mut token, states, None).unwrap();
//! assert!((entropy(&token).unwrap() - 1.0).abs() < 1e-9);
//! ```

pub mod entanglement;
pub mod error;
pub mod superposition;

pub use entanglement::{is_symmetric, EntanglementRegistry};
pub use error::{QuantumError, QuantumResult};
pub use superposition::{collapse, entropy, measure, phasors, probabilities, superpose, Measurement};

#[cfg(test)]
mod tests;
