//! Token types and values

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::token::Token;

/// Classification of a token
///
/// Classical types carry ordinary values; quantum types participate in
/// superposition and entanglement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    // Classical
    Int,
    Float,
    String,
    Role,
    Mask,
    Op,
    Array,
    Vector,
    Map,
    Tuple,
    Dsa,
    // Quantum
    QByte,
    QRole,
    QMatrix,
    QInt,
    QFloat,
}

impl TokenType {
    /// True for the quantum variants
    pub const fn is_quantum(self) -> bool {
        matches!(
            self,
            TokenType::QByte
                | TokenType::QRole
                | TokenType::QMatrix
                | TokenType::QInt
                | TokenType::QFloat
        )
    }

    /// True for types whose validation requires an initialized value
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            TokenType::Int | TokenType::Float | TokenType::QInt | TokenType::QFloat
        )
    }

    /// Lowercase display name
    pub const fn name(self) -> &'static str {
        match self {
            TokenType::Int => "int",
            TokenType::Float => "float",
            TokenType::String => "string",
            TokenType::Role => "role",
            TokenType::Mask => "mask",
            TokenType::Op => "op",
            TokenType::Array => "array",
            TokenType::Vector => "vector",
            TokenType::Map => "map",
            TokenType::Tuple => "tuple",
            TokenType::Dsa => "dsa",
            TokenType::QByte => "qbyte",
            TokenType::QRole => "qrole",
            TokenType::QMatrix => "qmatrix",
            TokenType::QInt => "qint",
            TokenType::QFloat => "qfloat",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Value payload, a sum over the token type
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TokenValue {
    /// Allocated but never initialized
    #[default]
    None,
    Int(i64),
    Float(f64),
    Text(String),
    Mask(u32),
    /// Array / Vector / Tuple payloads
    List(Vec<Token>),
    Map(Vec<(String, Token)>),
    /// QByte / Dsa payloads
    Bytes(Vec<u8>),
    /// Row-major QMatrix payload
    Matrix { rows: usize, cols: usize, data: Vec<f64> },
}

impl TokenValue {
    /// True when a value has been set
    pub const fn is_set(&self) -> bool {
        !matches!(self, TokenValue::None)
    }

    /// Integer view, when the payload is an Int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TokenValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Float view, when the payload is a Float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            TokenValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view, when the payload is textual
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(v) => Some(v),
            _ => None,
        }
    }
}
