//! Convenience re-exports for downstream crates

pub use crate::bits::ValidationBits;
pub use crate::error::{LockError, SpanError, TokenError, TokenResult};
pub use crate::lock::OwnerLock;
pub use crate::mode::GovernMode;
pub use crate::quantum::{Entanglement, Superposition, NORMALIZATION_TOLERANCE};
pub use crate::span::{AccessMask, Direction, Span, SpanKind, DEFAULT_SPAN_BYTES};
pub use crate::token::{SourceLocation, Token, TokenId};
pub use crate::value::{TokenType, TokenValue};
