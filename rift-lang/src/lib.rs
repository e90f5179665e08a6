//! # RIFT Translator Core
//!
//! Single-pass translation of `.rift` governance-annotated programs
//! into C, Go, JavaScript, Python, Lua or WebAssembly text.
//!
//! ## Architecture
//!
//! ```text
//! RIFT Source (.rift)
//!     ↓ linker (single forward pass, consensus rules)
//! CIR (flat ordered node array)
//!     ↓ codec (per-target emitter)
//! Target source (.c / .go / .js / .py / .lua / .wat)
//! ```
//!
//! The linker enforces the memory-first discipline: a span declaration
//! must precede every type definition and assignment. A program that
//! violates consensus is never emitted.
//!
//! The pattern-engine surface pass ([`surface`]) is the shallow
//! line-by-line alternative with no consensus checking.
//!
//! ## Example
//!
//! ```
//! use rift_lang::{translate, Target};
//!
//! let source = "align span<fixed> { bytes: 64 }\ncounter := 0\n";
//! let output = translate(source, Target::Python).unwrap();
//! assert!(output.contains("counter = 0"));
//! ```

pub mod cir;
pub mod codec;
pub mod error;
pub mod linker;
pub mod manifest;
pub mod surface;

pub use cir::{CirKind, CirNode, CirProgram, MAX_NODES, MAX_TRACKED_VARS};
pub use codec::{emit, Target};
pub use error::{Error, Result};
pub use linker::link;
pub use manifest::{BuildConfig, GovernanceConfig, Manifest, Package};
pub use surface::{default_engine, transform};

/// Link a source and emit it for one target
pub fn translate(source: &str, target: Target) -> Result<String> {
    let program = link(source);
    emit(&program, target)
}
