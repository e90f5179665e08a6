//! Memory span contracts
//!
//! A span is a governance contract over a region of memory, not an
//! allocation. Tokens are created over a span and inherit its alignment
//! and access discipline.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::SpanError;

/// Default byte count when a span block omits `bytes:`
pub const DEFAULT_SPAN_BYTES: u64 = 4096;

/// Memory layout discipline of a span
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SpanKind {
    /// Fixed-size region, classical alignment
    Fixed = 0,
    /// Row-major region
    Row = 1,
    /// Contiguous stream region
    Continuous = 2,
    /// Region backing superposed tokens
    Superposed = 3,
    /// Region backing entangled tokens
    Entangled = 4,
    /// Region spread over multiple nodes
    Distributed = 5,
}

impl SpanKind {
    /// Default alignment contract for this kind
    pub const fn default_alignment(self) -> u64 {
        match self {
            SpanKind::Fixed | SpanKind::Row | SpanKind::Continuous => 4096,
            SpanKind::Superposed | SpanKind::Entangled => 8,
            SpanKind::Distributed => 64,
        }
    }

    /// Lowercase source-level name
    pub const fn name(self) -> &'static str {
        match self {
            SpanKind::Fixed => "fixed",
            SpanKind::Row => "row",
            SpanKind::Continuous => "continuous",
            SpanKind::Superposed => "superposed",
            SpanKind::Entangled => "entangled",
            SpanKind::Distributed => "distributed",
        }
    }
}

impl FromStr for SpanKind {
    type Err = SpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(SpanKind::Fixed),
            "row" => Ok(SpanKind::Row),
            "continuous" => Ok(SpanKind::Continuous),
            "superposed" => Ok(SpanKind::Superposed),
            "entangled" => Ok(SpanKind::Entangled),
            "distributed" => Ok(SpanKind::Distributed),
            other => Err(SpanError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// CRUD access mask carried by a span
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessMask(u8);

impl AccessMask {
    pub const CREATE: AccessMask = AccessMask(0x01);
    pub const READ: AccessMask = AccessMask(0x02);
    pub const UPDATE: AccessMask = AccessMask(0x04);
    pub const DELETE: AccessMask = AccessMask(0x08);

    /// Full CRUD access
    pub const fn full() -> Self {
        AccessMask(0x0F)
    }

    /// No access at all
    pub const fn none() -> Self {
        AccessMask(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn allows(self, other: AccessMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for AccessMask {
    fn default() -> Self {
        AccessMask::full()
    }
}

impl std::ops::BitOr for AccessMask {
    type Output = AccessMask;

    fn bitor(self, rhs: AccessMask) -> AccessMask {
        AccessMask(self.0 | rhs.0)
    }
}

/// Fill direction of a span
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Values grow from the high address downward
    #[default]
    RightToLeft,
    /// Values grow from the low address upward
    LeftToRight,
}

/// A memory governance contract
///
/// Direction and the open flag are advisory metadata for the codec but
/// participate in structural equality.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    kind: SpanKind,
    bytes: u64,
    alignment: u64,
    access: AccessMask,
    direction: Direction,
    open: bool,
}

impl Span {
    /// Create a span with the kind's default alignment and full access
    pub fn new(kind: SpanKind, bytes: u64) -> Self {
        Self {
            kind,
            bytes,
            alignment: kind.default_alignment(),
            access: AccessMask::full(),
            direction: Direction::default(),
            open: true,
        }
    }

    /// Override the alignment; rejects anything that is not a power of two
    pub fn with_alignment(mut self, alignment: u64) -> Result<Self, SpanError> {
        if !alignment.is_power_of_two() {
            return Err(SpanError::InvalidAlignment(alignment));
        }
        self.alignment = alignment;
        Ok(self)
    }

    /// Restrict the access mask
    pub fn with_access(mut self, access: AccessMask) -> Self {
        self.access = access;
        self
    }

    /// Override the fill direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Mark the span closed (immutable)
    pub fn sealed(mut self) -> Self {
        self.open = false;
        self
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn alignment(&self) -> u64 {
        self.alignment
    }

    pub fn access(&self) -> AccessMask {
        self.access
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True when the alignment contract is well formed
    pub fn is_aligned(&self) -> bool {
        self.alignment.is_power_of_two()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classical_kinds_default_to_page_alignment() {
        assert_eq!(Span::new(SpanKind::Fixed, 64).alignment(), 4096);
        assert_eq!(Span::new(SpanKind::Row, 64).alignment(), 4096);
        assert_eq!(Span::new(SpanKind::Continuous, 64).alignment(), 4096);
    }

    #[test]
    fn quantum_kinds_default_to_word_alignment() {
        assert_eq!(Span::new(SpanKind::Superposed, 16).alignment(), 8);
        assert_eq!(Span::new(SpanKind::Entangled, 16).alignment(), 8);
        assert_eq!(Span::new(SpanKind::Distributed, 16).alignment(), 64);
    }

    #[test]
    fn alignment_must_be_power_of_two() {
        let span = Span::new(SpanKind::Fixed, 64);
        assert!(span.clone().with_alignment(1024).is_ok());
        assert_eq!(
            span.with_alignment(1000),
            Err(SpanError::InvalidAlignment(1000))
        );
    }

    #[test]
    fn new_span_has_full_access_and_defaults() {
        let span = Span::new(SpanKind::Fixed, 128);
        assert_eq!(span.access(), AccessMask::full());
        assert_eq!(span.direction(), Direction::RightToLeft);
        assert!(span.is_open());
        assert!(span.is_aligned());
    }

    #[test]
    fn direction_and_open_participate_in_equality() {
        let a = Span::new(SpanKind::Fixed, 64);
        let b = Span::new(SpanKind::Fixed, 64).sealed();
        let c = Span::new(SpanKind::Fixed, 64).with_direction(Direction::LeftToRight);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, Span::new(SpanKind::Fixed, 64));
    }

    #[test]
    fn kind_parses_from_source_names() {
        assert_eq!("fixed".parse::<SpanKind>().unwrap(), SpanKind::Fixed);
        assert_eq!("SUPERPOSED".parse::<SpanKind>().unwrap(), SpanKind::Superposed);
        assert!("pages".parse::<SpanKind>().is_err());
    }
}
