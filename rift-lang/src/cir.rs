//! Canonical intermediate representation
//!
//! The linker flattens a `.rift` source into an ordered node array; the
//! codec walks it front to back. Node order is always source-line
//! order.

use serde::{Deserialize, Serialize};
use rift_core::{GovernMode, SpanKind};

/// Hard cap on CIR nodes per program
pub const MAX_NODES: usize = 1024;

/// Hard cap on tracked variable names per program
pub const MAX_TRACKED_VARS: usize = 64;

/// One classified construct
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CirKind {
    /// `!govern <mode>` directive
    Govern { mode: GovernMode },

    /// Committed span block
    Span { kind: SpanKind, bytes: u64 },

    /// Record definition header
    TypeDef { name: String },

    /// One field of the enclosing record
    TypeField {
        type_name: String,
        name: String,
        field_type: String,
        is_last_field: bool,
    },

    /// `name := expr` (or deferred `name =: expr`)
    Assign {
        name: String,
        expr: String,
        is_first_use: bool,
    },

    /// `policy_fn on NAME`; the body is discarded at link time
    Policy { name: String },

    /// `while (condition)` with the condition text extracted
    While { condition: String },

    /// `if (condition)` with the condition text extracted
    If { condition: String },

    /// Lone `}` closing a control-flow block
    BlockClose,

    /// `validate(arg)` checkpoint
    Validate { arg: String },

    /// Source comment, markers stripped
    Comment { text: String },

    /// Anything the classifier could not place; re-emitted as a comment
    Unknown { text: String },
}

/// A node plus where it came from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CirNode {
    pub kind: CirKind,
    pub source_line: usize,
}

impl CirNode {
    pub fn new(kind: CirKind, source_line: usize) -> Self {
        Self { kind, source_line }
    }
}

/// The linked program
///
/// A program with `consensus_ok = false` must never reach the codec;
/// emission refuses it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CirProgram {
    pub nodes: Vec<CirNode>,
    pub mode: GovernMode,
    pub consensus_ok: bool,
    pub error: Option<String>,
}

impl CirProgram {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Index of the first Span node, when any
    pub fn first_span_index(&self) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| matches!(n.kind, CirKind::Span { .. }))
    }

    /// Index of the first Assign node, when any
    pub fn first_assign_index(&self) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| matches!(n.kind, CirKind::Assign { .. }))
    }

    /// Index of the first TypeDef node, when any
    pub fn first_typedef_index(&self) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| matches!(n.kind, CirKind::TypeDef { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_index_helpers() {
        let program = CirProgram {
            nodes: vec![
                CirNode::new(CirKind::Govern { mode: GovernMode::Classical }, 1),
                CirNode::new(CirKind::Span { kind: SpanKind::Fixed, bytes: 64 }, 2),
                CirNode::new(
                    CirKind::Assign {
                        name: "x".into(),
                        expr: "0".into(),
                        is_first_use: true,
                    },
                    3,
                ),
            ],
            mode: GovernMode::Classical,
            consensus_ok: true,
            error: None,
        };

        assert_eq!(program.first_span_index(), Some(1));
        assert_eq!(program.first_assign_index(), Some(2));
        assert_eq!(program.first_typedef_index(), None);
    }
}
