//! JavaScript emitter

use crate::cir::{CirKind, CirProgram};
use super::Emitter;

pub(crate) fn emit(program: &CirProgram) -> String {
    let mut em = Emitter::new("    ", 0);

    em.line("'use strict';");
    em.blank();
    em.line("const rift = require('./rift_binding');");
    em.blank();

    for node in &program.nodes {
        match &node.kind {
            CirKind::Govern { mode } => {
                em.line(&format!("// govern {}", mode));
            }
            CirKind::Span { kind, bytes } => {
                em.line(&format!("// span {} ({} bytes)", kind, bytes));
            }
            CirKind::TypeDef { name } => {
                em.line(&format!("// type {}", name));
            }
            CirKind::TypeField { .. } => {}
            CirKind::Assign { name, expr, is_first_use } => {
                if *is_first_use {
                    em.line(&format!("let {} = {};", name, expr));
                } else {
                    em.line(&format!("{} = {};", name, expr));
                }
            }
            CirKind::Policy { name } => {
                em.line(&format!("// policy {}", name));
            }
            CirKind::While { condition } => {
                em.line(&format!("while ({}) {{", condition));
                em.indent();
            }
            CirKind::If { condition } => {
                em.line(&format!("if ({}) {{", condition));
                em.indent();
            }
            CirKind::BlockClose => {
                em.dedent();
                em.line("}");
            }
            CirKind::Validate { arg } => {
                em.line(&format!("rift.validate('{}');", arg));
            }
            CirKind::Comment { text } => {
                em.line(&format!("// {}", text));
            }
            CirKind::Unknown { text } => {
                em.line(&format!("// {}", text));
            }
        }
    }

    em.finish()
}
