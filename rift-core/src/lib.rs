//! # RIFT Core
//!
//! Substrate for the RIFT governance discipline: memory spans, governed
//! tokens, and the validation bitfield that gates every operation.
//!
//! ## The governance contract
//!
//! 1. Every token is a **(type, value, span)** triplet
//! 2. The span is a **memory contract**, declared before any value
//! 3. An eight-bit **validation bitfield** tracks the lifecycle
//! 4. Quantum linkage (superposition, entanglement) rides on the same
//!    token shell as tagged data, never as extra flag soup
//!
//! ## Modules
//!
//! - [`span`]: memory span contracts, alignment and access masks
//! - [`token`]: the governed token shell and its lifecycle
//! - [`bits`]: the eight-flag validation bitfield
//! - [`lock`]: the recursive-owner lock
//! - [`value`]: token types and value payloads
//! - [`quantum`]: superposition and entanglement linkage data
//! - [`mode`]: classical / quantum / hybrid governance modes
//!
//! ## Quick start
//!
//! ```
//! use rift_core::prelude::*;
//!
//! let span = Span::new(SpanKind::Fixed, 64);
//! let mut token = Token::new(TokenType::Int, span);
//! token.set_value(TokenValue::Int(42));
//! token.validate().unwrap();
//! assert!(token.bits().contains(ValidationBits::GOVERNED));
//! ```

pub mod bits;
pub mod error;
pub mod lock;
pub mod mode;
pub mod prelude;
pub mod quantum;
pub mod span;
pub mod token;
pub mod value;

pub use bits::ValidationBits;
pub use error::{LockError, SpanError, TokenError, TokenResult};
pub use lock::OwnerLock;
pub use mode::GovernMode;
pub use quantum::{Entanglement, Superposition};
pub use span::{AccessMask, Direction, Span, SpanKind};
pub use token::{SourceLocation, Token, TokenId};
pub use value::{TokenType, TokenValue};
