//! WebAssembly text emitter
//!
//! Two passes: the first declares `(local $name i32)` for every
//! first-use assignment, the second emits the body. Numeric-literal
//! expressions become `(i32.const N)`; anything else is acknowledged
//! with a comment and a zero-set.

use crate::cir::{CirKind, CirProgram};
use super::Emitter;

/// What a pending BlockClose must close
enum OpenConstruct {
    /// `(block (loop` from a while
    Loop,
    /// `(block` from an if
    Block,
}

pub(crate) fn emit(program: &CirProgram) -> String {
    let mut em = Emitter::new("  ", 0);

    em.line("(module");
    em.indent();
    em.line("(import \"rift\" \"validate\" (func $rift_validate (param i32)))");
    em.line("(func $main (export \"main\")");
    em.indent();

    // Pass 1: every first-use assignment becomes a local.
    for node in &program.nodes {
        if let CirKind::Assign { name, is_first_use: true, .. } = &node.kind {
            em.line(&format!("(local ${} i32)", name));
        }
    }

    // Pass 2: the body.
    let mut open = Vec::new();
    for node in &program.nodes {
        match &node.kind {
            CirKind::Govern { mode } => {
                em.line(&format!(";; govern {}", mode));
            }
            CirKind::Span { kind, bytes } => {
                em.line(&format!(";; span {} ({} bytes)", kind, bytes));
            }
            CirKind::TypeDef { name } => {
                em.line(&format!(";; type {}", name));
            }
            CirKind::TypeField { .. } => {}
            CirKind::Assign { name, expr, .. } => match expr.parse::<i64>() {
                Ok(value) => {
                    em.line(&format!("(local.set ${} (i32.const {}))", name, value));
                }
                Err(_) => {
                    em.line(&format!(";; expr: {}", expr));
                    em.line(&format!("(local.set ${} (i32.const 0))", name));
                }
            },
            CirKind::Policy { name } => {
                em.line(&format!(";; policy {}", name));
            }
            CirKind::While { condition } => {
                em.line(&format!(";; while {}", condition));
                em.line("(block (loop");
                em.indent();
                open.push(OpenConstruct::Loop);
            }
            CirKind::If { condition } => {
                em.line(&format!(";; if {}", condition));
                em.line("(block");
                em.indent();
                open.push(OpenConstruct::Block);
            }
            CirKind::BlockClose => match open.pop() {
                Some(OpenConstruct::Loop) => {
                    em.dedent();
                    em.line("))");
                }
                Some(OpenConstruct::Block) => {
                    em.dedent();
                    em.line(")");
                }
                None => {}
            },
            CirKind::Validate { arg } => {
                em.line(&format!("(call $rift_validate (local.get ${}))", arg));
            }
            CirKind::Comment { text } => {
                em.line(&format!(";; {}", text));
            }
            CirKind::Unknown { text } => {
                em.line(&format!(";; {}", text));
            }
        }
    }

    em.dedent();
    em.line(")");
    em.dedent();
    em.line(")");
    em.finish()
}

#[cfg(test)]
mod tests {
    use crate::linker::link;

    #[test]
    fn locals_precede_the_body() {
        let source = "align span<fixed> { bytes: 64 }\na := 1\nb := 2\na := 3\n";
        let output = super::emit(&link(source));

        let local_a = output.find("(local $a i32)").unwrap();
        let local_b = output.find("(local $b i32)").unwrap();
        let first_set = output.find("(local.set").unwrap();
        assert!(local_a < first_set);
        assert!(local_b < first_set);

        // Reassignment adds no second declaration.
        assert_eq!(output.matches("(local $a i32)").count(), 1);
    }

    #[test]
    fn while_closes_both_parens() {
        let source = "align span<fixed> { bytes: 64 }\nx := 0\nwhile (x < 1) {\nx := 1\n}\n";
        let output = super::emit(&link(source));
        assert!(output.contains("(block (loop"));
        assert!(output.contains("))"));
    }

    #[test]
    fn module_parens_balance() {
        let source = "align span<fixed> { bytes: 64 }\nx := 0\nwhile (x < 3) { x := x + 1 }\nvalidate(x)\n";
        let output = super::emit(&link(source));

        let opens = output.matches('(').count();
        let closes = output.matches(')').count();
        assert_eq!(opens, closes);
    }
}
