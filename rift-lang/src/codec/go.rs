//! Go emitter
//!
//! Tabs, `:=` on first use, `for` as the loop keyword. Go permits type
//! declarations inside function bodies, so records emit inline.

use crate::cir::{CirKind, CirProgram};
use super::Emitter;

pub(crate) fn emit(program: &CirProgram) -> String {
    let mut em = Emitter::new("\t", 0);

    em.line("package main");
    em.blank();
    em.line("import \"fmt\"");
    em.blank();
    em.line("func main() {");
    em.indent();

    for node in &program.nodes {
        match &node.kind {
            CirKind::Govern { mode } => {
                em.line(&format!("// govern {}", mode));
            }
            CirKind::Span { kind, bytes } => {
                em.line(&format!("// span {} ({} bytes)", kind, bytes));
            }
            CirKind::TypeDef { name } => {
                em.line(&format!("type {} struct {{", name));
                em.indent();
            }
            CirKind::TypeField { name, field_type, is_last_field, .. } => {
                em.line(&format!("{} {}", name, go_type(field_type)));
                if *is_last_field {
                    em.dedent();
                    em.line("}");
                }
            }
            CirKind::Assign { name, expr, is_first_use } => {
                if *is_first_use {
                    em.line(&format!("{} := {}", name, expr));
                } else {
                    em.line(&format!("{} = {}", name, expr));
                }
            }
            CirKind::Policy { name } => {
                em.line(&format!("// policy {}", name));
            }
            CirKind::While { condition } => {
                em.line(&format!("for {} {{", condition));
                em.indent();
            }
            CirKind::If { condition } => {
                em.line(&format!("if {} {{", condition));
                em.indent();
            }
            CirKind::BlockClose => {
                em.dedent();
                em.line("}");
            }
            CirKind::Validate { arg } => {
                em.line(&format!("rift.Validate({})", arg));
            }
            CirKind::Comment { text } => {
                em.line(&format!("// {}", text));
            }
            CirKind::Unknown { text } => {
                em.line(&format!("// {}", text));
            }
        }
    }

    em.dedent();
    em.line("}");
    em.finish()
}

/// Field-type mapping pinned by the translation contract
fn go_type(field_type: &str) -> &'static str {
    match field_type.to_ascii_uppercase().as_str() {
        "INT" => "int32",
        "FLOAT" => "float64",
        "STRING" => "string",
        _ => "interface{}",
    }
}

#[cfg(test)]
mod tests {
    use crate::linker::link;

    #[test]
    fn type_mapping_is_pinned() {
        assert_eq!(super::go_type("INT"), "int32");
        assert_eq!(super::go_type("FLOAT"), "float64");
        assert_eq!(super::go_type("STRING"), "string");
        assert_eq!(super::go_type("TUPLE"), "interface{}");
    }

    #[test]
    fn while_emits_as_for() {
        let source = "align span<fixed> { bytes: 64 }\nx := 0\nwhile (x < 2) {\nx := x + 1\n}\n";
        let output = super::emit(&link(source));

        assert!(output.contains("x := 0"));
        assert!(output.contains("for x < 2 {"));
        assert!(output.contains("\t\tx = x + 1"));
    }

    #[test]
    fn body_indents_with_tabs() {
        let output = super::emit(&link("align span<fixed> { bytes: 64 }\n"));
        assert!(output.contains("\t// span fixed (64 bytes)"));
    }
}
