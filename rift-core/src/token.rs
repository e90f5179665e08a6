//! Governed tokens
//!
//! A token is the (type, value, span) triplet plus the machinery that
//! governs it: the validation bitfield, a recursive-owner lock, and the
//! optional quantum linkage.
//!
//! Lifecycle: `Allocated → Initialized → Governed → {Superposed,
//! Entangled}?`. Destruction releases a held lock and zeroes the
//! bitfield before the shell is freed.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use serde::{Deserialize, Serialize};
use crate::bits::ValidationBits;
use crate::error::{LockError, TokenError, TokenResult};
use crate::lock::OwnerLock;
use crate::quantum::{Entanglement, Superposition};
use crate::span::Span;
use crate::value::{TokenType, TokenValue};

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique token handle
///
/// Entanglement peers are tracked by handle, so a destroyed peer can
/// never dangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Where in the `.rift` source a token was born
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A governed (type, value, span) triplet
#[derive(Debug)]
pub struct Token {
    id: TokenId,
    token_type: TokenType,
    value: TokenValue,
    span: Option<Span>,
    bits: ValidationBits,
    lock: OwnerLock,
    superposition: Option<Superposition>,
    entanglement: Option<Entanglement>,
    location: SourceLocation,
}

impl Token {
    /// Create a token over an existing span; starts Allocated
    pub fn new(token_type: TokenType, span: Span) -> Self {
        Self {
            id: TokenId(NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed)),
            token_type,
            value: TokenValue::None,
            span: Some(span),
            bits: ValidationBits::ALLOCATED,
            lock: OwnerLock::new(),
            superposition: None,
            entanglement: None,
            location: SourceLocation::default(),
        }
    }

    /// Create a token with no span; it can never become Governed
    pub fn detached(token_type: TokenType) -> Self {
        Self {
            id: TokenId(NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed)),
            token_type,
            value: TokenValue::None,
            span: None,
            bits: ValidationBits::ALLOCATED,
            lock: OwnerLock::new(),
            superposition: None,
            entanglement: None,
            location: SourceLocation::default(),
        }
    }

    /// Tag the token with its source position
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    /// Set the value; marks the token Initialized
    pub fn set_value(&mut self, value: TokenValue) {
        self.value = value;
        self.bits.insert(ValidationBits::INITIALIZED);
    }

    /// Overwrite type and value together, as a collapse does
    pub fn adopt(&mut self, token_type: TokenType, value: TokenValue) {
        self.token_type = token_type;
        self.set_value(value);
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn superposition(&self) -> Option<&Superposition> {
        self.superposition.as_ref()
    }

    pub fn entanglement(&self) -> Option<&Entanglement> {
        self.entanglement.as_ref()
    }

    /// Current bitfield; the Locked flag is composed from the live lock
    pub fn bits(&self) -> ValidationBits {
        let mut bits = self.bits;
        if self.lock.is_locked() {
            bits.insert(ValidationBits::LOCKED);
        } else {
            bits.remove(ValidationBits::LOCKED);
        }
        bits
    }

    /// Validate the governance contract; sets Governed on success
    ///
    /// Checks: Allocated, span present, power-of-two alignment, and the
    /// type-specific preconditions (numeric requires Initialized,
    /// Superposed requires normalized amplitudes, Entangled requires
    /// peers). Calling twice returns the same result and leaves the
    /// bitfield unchanged.
    pub fn validate(&mut self) -> TokenResult<()> {
        if !self.bits.contains(ValidationBits::ALLOCATED) {
            return Err(TokenError::NotAllocated);
        }
        let span = self.span.as_ref().ok_or(TokenError::MissingSpan)?;
        if !span.is_aligned() {
            return Err(TokenError::BadAlignment(span.alignment()));
        }
        if self.token_type.is_numeric() && !self.bits.contains(ValidationBits::INITIALIZED) {
            return Err(TokenError::Uninitialized);
        }
        if self.bits.contains(ValidationBits::SUPERPOSED) {
            let sp = self
                .superposition
                .as_ref()
                .ok_or(TokenError::EmptySuperposition)?;
            if sp.states.is_empty() {
                return Err(TokenError::EmptySuperposition);
            }
            if !sp.is_normalized() {
                return Err(TokenError::NotNormalized(sp.norm_sum()));
            }
        }
        if self.bits.contains(ValidationBits::ENTANGLED) {
            let link = self.entanglement.as_ref().ok_or(TokenError::NoPeers)?;
            if link.peers.is_empty() {
                return Err(TokenError::NoPeers);
            }
        }
        self.bits.insert(ValidationBits::GOVERNED);
        Ok(())
    }

    /// Acquire the owner lock; blocks while a foreign thread holds it
    pub fn lock(&self) {
        self.lock.acquire();
    }

    /// Acquire without blocking
    pub fn try_lock(&self) -> bool {
        self.lock.try_acquire()
    }

    /// Release one lock acquisition; refused from a non-owner thread
    pub fn unlock(&self) -> Result<(), LockError> {
        self.lock.release()
    }

    /// Live lock count
    pub fn lock_count(&self) -> u32 {
        self.lock.count()
    }

    /// Attach a superposition and set the Superposed flag
    pub fn attach_superposition(&mut self, superposition: Superposition) {
        self.superposition = Some(superposition);
        self.bits.insert(ValidationBits::SUPERPOSED);
    }

    /// Detach the superposition and clear the Superposed flag
    pub fn clear_superposition(&mut self) -> Option<Superposition> {
        self.bits.remove(ValidationBits::SUPERPOSED);
        self.superposition.take()
    }

    /// Attach an entanglement link and set the Entangled flag
    pub fn attach_entanglement(&mut self, link: Entanglement) {
        self.entanglement = Some(link);
        self.bits.insert(ValidationBits::ENTANGLED);
    }

    /// Detach the entanglement link and clear the Entangled flag
    pub fn clear_entanglement(&mut self) -> Option<Entanglement> {
        self.bits.remove(ValidationBits::ENTANGLED);
        self.entanglement.take()
    }

    /// Mark the token as surviving scope exit
    pub fn set_persistent(&mut self) {
        self.bits.insert(ValidationBits::PERSISTENT);
    }
}

/// Clones copy the classical triplet only: the clone gets a fresh
/// identity, an unlocked lock, and no quantum linkage.
impl Clone for Token {
    fn clone(&self) -> Self {
        let mut bits = self.bits;
        bits.remove(
            ValidationBits::LOCKED | ValidationBits::SUPERPOSED | ValidationBits::ENTANGLED,
        );
        Self {
            id: TokenId(NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed)),
            token_type: self.token_type,
            value: self.value.clone(),
            span: self.span.clone(),
            bits,
            lock: OwnerLock::new(),
            superposition: None,
            entanglement: None,
            location: self.location,
        }
    }
}

/// Structural equality over the (type, value, span) triplet
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.token_type == other.token_type
            && self.value == other.value
            && self.span == other.span
    }
}

impl Drop for Token {
    fn drop(&mut self) {
        // Release first, then zero the security-sensitive bitfield.
        self.lock.release_all_if_owner();
        self.bits.clear();
    }
}
