//! Python emitter
//!
//! Four-space indentation; blocks close by dedent, never by brace.

use crate::cir::{CirKind, CirProgram};
use super::Emitter;

pub(crate) fn emit(program: &CirProgram) -> String {
    let mut em = Emitter::new("    ", 0);

    em.line("import sys");
    em.line("sys.path.insert(0, '.')");
    em.line("import rift_binding as rift");
    em.blank();

    for node in &program.nodes {
        match &node.kind {
            CirKind::Govern { mode } => {
                em.line(&format!("# govern {}", mode));
            }
            CirKind::Span { kind, bytes } => {
                em.line(&format!("# span {} ({} bytes)", kind, bytes));
            }
            CirKind::TypeDef { name } => {
                em.line(&format!("# type {}", name));
            }
            CirKind::TypeField { .. } => {}
            CirKind::Assign { name, expr, .. } => {
                em.line(&format!("{} = {}", name, expr));
            }
            CirKind::Policy { name } => {
                em.line(&format!("# policy {}", name));
            }
            CirKind::While { condition } => {
                em.line(&format!("while {}:", condition));
                em.indent();
            }
            CirKind::If { condition } => {
                em.line(&format!("if {}:", condition));
                em.indent();
            }
            CirKind::BlockClose => {
                em.dedent();
            }
            CirKind::Validate { arg } => {
                em.line(&format!("rift.validate({})", arg));
            }
            CirKind::Comment { text } => {
                em.line(&format!("# {}", text));
            }
            CirKind::Unknown { text } => {
                em.line(&format!("# {}", text));
            }
        }
    }

    em.finish()
}

#[cfg(test)]
mod tests {
    use crate::linker::link;

    #[test]
    fn blocks_close_by_dedent() {
        let source = "align span<fixed> { bytes: 64 }\nx := 0\nif (x < 1) {\nx := 1\n}\nvalidate(x)\n";
        let output = super::emit(&link(source));

        assert!(output.contains("if x < 1:"));
        assert!(output.contains("    x = 1"));
        // The validate call is back at column zero after the dedent.
        assert!(output.contains("\nrift.validate(x)"));
        assert!(!output.contains('}'));
    }

    #[test]
    fn assignments_never_carry_a_keyword() {
        let output = super::emit(&link("align span<fixed> { bytes: 64 }\nx := 0\nx := 1\n"));
        assert!(output.contains("\nx = 0\n"));
        assert!(output.contains("\nx = 1\n"));
    }
}
