//! Validation bitfield
//!
//! Eight flags describing where a token sits in its lifecycle. The set
//! grows monotonically under normal operation; only Locked toggles, and
//! the quantum flags clear on collapse.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Eight-bit token lifecycle state set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationBits(u8);

impl ValidationBits {
    /// Shell exists on the heap
    pub const ALLOCATED: ValidationBits = ValidationBits(0x01);
    /// Value has been set at least once
    pub const INITIALIZED: ValidationBits = ValidationBits(0x02);
    /// Owner lock count > 0
    pub const LOCKED: ValidationBits = ValidationBits(0x04);
    /// Passed full validation against its span
    pub const GOVERNED: ValidationBits = ValidationBits(0x08);
    /// Carries a superposition
    pub const SUPERPOSED: ValidationBits = ValidationBits(0x10);
    /// Member of an entanglement group
    pub const ENTANGLED: ValidationBits = ValidationBits(0x20);
    /// Survives scope exit
    pub const PERSISTENT: ValidationBits = ValidationBits(0x40);
    /// Shadow copy of another token
    pub const SHADOW: ValidationBits = ValidationBits(0x80);

    /// Empty set
    pub const fn empty() -> Self {
        ValidationBits(0)
    }

    /// Construct from a raw byte
    pub const fn from_bits(bits: u8) -> Self {
        ValidationBits(bits)
    }

    /// Raw byte value
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True when every flag in `other` is set
    pub const fn contains(self, other: ValidationBits) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set the given flags
    pub fn insert(&mut self, other: ValidationBits) {
        self.0 |= other.0;
    }

    /// Clear the given flags
    pub fn remove(&mut self, other: ValidationBits) {
        self.0 &= !other.0;
    }

    /// Zero the whole field
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// True when no flag is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Union without mutation
    pub const fn with(self, other: ValidationBits) -> Self {
        ValidationBits(self.0 | other.0)
    }
}

impl std::ops::BitOr for ValidationBits {
    type Output = ValidationBits;

    fn bitor(self, rhs: ValidationBits) -> ValidationBits {
        ValidationBits(self.0 | rhs.0)
    }
}

impl fmt::Display for ValidationBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(u8, &str); 8] = [
            (0x01, "Allocated"),
            (0x02, "Initialized"),
            (0x04, "Locked"),
            (0x08, "Governed"),
            (0x10, "Superposed"),
            (0x20, "Entangled"),
            (0x40, "Persistent"),
            (0x80, "Shadow"),
        ];

        if self.is_empty() {
            return write!(f, "0x00");
        }

        let mut first = true;
        for (mask, name) in NAMES {
            if self.0 & mask != 0 {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_start_empty() {
        let bits = ValidationBits::empty();
        assert!(bits.is_empty());
        assert_eq!(bits.bits(), 0);
    }

    #[test]
    fn insert_and_contains() {
        let mut bits = ValidationBits::empty();
        bits.insert(ValidationBits::ALLOCATED);
        bits.insert(ValidationBits::INITIALIZED);

        assert!(bits.contains(ValidationBits::ALLOCATED));
        assert!(bits.contains(ValidationBits::ALLOCATED | ValidationBits::INITIALIZED));
        assert!(!bits.contains(ValidationBits::GOVERNED));
        assert_eq!(bits.bits(), 0x03);
    }

    #[test]
    fn remove_is_targeted() {
        let mut bits = ValidationBits::from_bits(0x33);
        bits.remove(ValidationBits::SUPERPOSED | ValidationBits::ENTANGLED);
        assert_eq!(bits.bits(), 0x03);
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut bits = ValidationBits::from_bits(0xFF);
        bits.clear();
        assert!(bits.is_empty());
    }

    #[test]
    fn display_names_flags() {
        let bits = ValidationBits::ALLOCATED | ValidationBits::GOVERNED;
        assert_eq!(bits.to_string(), "Allocated|Governed");
    }
}
