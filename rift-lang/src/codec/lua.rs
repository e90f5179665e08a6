//! Lua emitter

use crate::cir::{CirKind, CirProgram};
use super::Emitter;

pub(crate) fn emit(program: &CirProgram) -> String {
    let mut em = Emitter::new("    ", 0);

    em.line("local rift = dofile('rift_binding.lua')");
    em.blank();

    for node in &program.nodes {
        match &node.kind {
            CirKind::Govern { mode } => {
                em.line(&format!("-- govern {}", mode));
            }
            CirKind::Span { kind, bytes } => {
                em.line(&format!("-- span {} ({} bytes)", kind, bytes));
            }
            CirKind::TypeDef { name } => {
                em.line(&format!("-- type {}", name));
            }
            CirKind::TypeField { .. } => {}
            CirKind::Assign { name, expr, is_first_use } => {
                if *is_first_use {
                    em.line(&format!("local {} = {}", name, expr));
                } else {
                    em.line(&format!("{} = {}", name, expr));
                }
            }
            CirKind::Policy { name } => {
                em.line(&format!("-- policy {}", name));
            }
            CirKind::While { condition } => {
                em.line(&format!("while {} do", condition));
                em.indent();
            }
            CirKind::If { condition } => {
                em.line(&format!("if {} then", condition));
                em.indent();
            }
            CirKind::BlockClose => {
                em.dedent();
                em.line("end");
            }
            CirKind::Validate { arg } => {
                em.line(&format!("rift.validate({})", arg));
            }
            CirKind::Comment { text } => {
                em.line(&format!("-- {}", text));
            }
            CirKind::Unknown { text } => {
                em.line(&format!("-- {}", text));
            }
        }
    }

    em.finish()
}

#[cfg(test)]
mod tests {
    use crate::linker::link;

    #[test]
    fn blocks_close_with_end() {
        let source = "align span<fixed> { bytes: 64 }\nx := 0\nwhile (x < 2) {\nx := x + 1\n}\n";
        let output = super::emit(&link(source));

        assert!(output.contains("local x = 0"));
        assert!(output.contains("while x < 2 do"));
        assert!(output.contains("\nend"));
        assert!(!output.contains('{'));
    }
}
