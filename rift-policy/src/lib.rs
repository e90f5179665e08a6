//! # RIFT Policy Gate
//!
//! The 2x2 decision matrix that gates every governed operation: rows
//! are input validity, columns output validity, each cell one of
//! Allow / Deny / Defer.
//!
//! ## Responsibilities
//! - Classify (input_valid, output_valid) pairs
//! - Track passed / failed / deferred counters
//! - Enforce the validation-ratio threshold (default 0.85)
//!
//! ## Usage
//!
//! ```
//! use rift_policy::{Decision, ResultMatrix};
//!
//! let mut matrix = ResultMatrix::new();
//! assert_eq!(matrix.validate(true, true), Decision::Allow);
//! assert_eq!(matrix.validate(true, false), Decision::Deny);
//! ```

pub mod error;
pub mod matrix;

pub use error::{PolicyError, PolicyResult};
pub use matrix::{
    Decision, MatrixCounters, ResultMatrix, DEFAULT_ENTROPY_THRESHOLD, DEFAULT_THRESHOLD,
};
