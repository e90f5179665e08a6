//! Multi-target codec
//!
//! Walks CIR nodes in order and emits syntactically valid text for one
//! of six targets. Emission is deterministic: the same program yields
//! byte-identical output.

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::cir::CirProgram;
use crate::error::{Error, Result};

mod c;
mod go;
mod js;
mod lua;
mod python;
mod wat;

/// Output language
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    C,
    Go,
    JavaScript,
    Python,
    Lua,
    Wat,
}

impl Target {
    /// Map a file extension to its target; `.c` is the default
    pub fn from_extension(ext: &str) -> Option<Target> {
        match ext.to_ascii_lowercase().as_str() {
            "c" => Some(Target::C),
            "go" => Some(Target::Go),
            "js" | "cjs" | "mjs" => Some(Target::JavaScript),
            "py" => Some(Target::Python),
            "lua" => Some(Target::Lua),
            "wat" | "wasm" => Some(Target::Wat),
            _ => None,
        }
    }

    /// Target for an output path, defaulting to C
    pub fn from_path(path: &Path) -> Target {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Target::from_extension)
            .unwrap_or(Target::C)
    }

    /// Single-line comment prefix
    pub const fn comment_prefix(self) -> &'static str {
        match self {
            Target::C => "/*",
            Target::Go | Target::JavaScript => "//",
            Target::Python => "#",
            Target::Lua => "--",
            Target::Wat => ";;",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Target::C => "c",
            Target::Go => "go",
            Target::JavaScript => "javascript",
            Target::Python => "python",
            Target::Lua => "lua",
            Target::Wat => "wat",
        }
    }
}

/// Emit a linked program for one target
///
/// A program whose consensus flag is down is refused.
pub fn emit(program: &CirProgram, target: Target) -> Result<String> {
    if !program.consensus_ok {
        return Err(Error::Consensus {
            message: program
                .error
                .clone()
                .unwrap_or_else(|| "consensus violated".to_string()),
        });
    }

    Ok(match target {
        Target::C => c::emit(program),
        Target::Go => go::emit(program),
        Target::JavaScript => js::emit(program),
        Target::Python => python::emit(program),
        Target::Lua => lua::emit(program),
        Target::Wat => wat::emit(program),
    })
}

/// Indentation-managing line writer shared by every target
pub(crate) struct Emitter {
    buffer: String,
    indent_unit: &'static str,
    depth: usize,
}

impl Emitter {
    pub(crate) fn new(indent_unit: &'static str, depth: usize) -> Self {
        Self {
            buffer: String::new(),
            indent_unit,
            depth,
        }
    }

    /// Write one line at the current depth
    pub(crate) fn line(&mut self, s: &str) {
        if !s.is_empty() {
            for _ in 0..self.depth {
                self.buffer.push_str(self.indent_unit);
            }
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.buffer.push('\n');
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub(crate) fn finish(self) -> String {
        self.buffer
    }
}
