//! Error types for the RIFT translator

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Consensus violation found while linking
    Consensus { message: String },

    /// Emission refused or failed
    Codec { message: String },

    /// Manifest (rift.toml) error
    Manifest(String),

    /// I/O error
    IoError { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Consensus { message } => {
                write!(f, "Consensus error: {}", message)
            }
            Error::Codec { message } => {
                write!(f, "Codec error: {}", message)
            }
            Error::Manifest(message) => {
                write!(f, "Manifest error: {}", message)
            }
            Error::IoError { message } => {
                write!(f, "I/O error: {}", message)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError {
            message: err.to_string(),
        }
    }
}
