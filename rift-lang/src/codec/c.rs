//! C emitter
//!
//! Inline full-program emission: every statement lives inside `main`,
//! framed by the policy bootstrap and a cleanup epilogue.

use crate::cir::{CirKind, CirProgram};
use super::Emitter;

pub(crate) fn emit(program: &CirProgram) -> String {
    let mut em = Emitter::new("    ", 0);

    em.line("#include \"riftlang.h\"");
    em.blank();
    em.line("static void rift_init_policy(void) {");
    em.indent();
    em.line("rift_policy_init(RIFT_POLICY_THRESHOLD_DEFAULT);");
    em.dedent();
    em.line("}");
    em.blank();
    em.line("int main(int argc, char **argv) {");
    em.indent();
    em.line("(void)argc;");
    em.line("(void)argv;");
    em.line("rift_init_policy();");
    em.blank();

    for node in &program.nodes {
        match &node.kind {
            CirKind::Govern { mode } => {
                em.line(&format!("/* govern {} */", mode));
            }
            CirKind::Span { kind, bytes } => {
                em.line(&format!(
                    "RIFT_DECLARE_MEMORY(span, RIFT_SPAN_{}, {});",
                    kind.name().to_ascii_uppercase(),
                    bytes
                ));
            }
            CirKind::TypeDef { .. } => {
                em.line("typedef struct {");
                em.indent();
            }
            CirKind::TypeField { type_name, name, field_type, is_last_field } => {
                em.line(&format!("{} {};", c_type(field_type), name));
                if *is_last_field {
                    em.dedent();
                    em.line(&format!("}} {};", type_name));
                }
            }
            CirKind::Assign { name, expr, is_first_use } => {
                if *is_first_use {
                    em.line(&format!("int {} = {};", name, expr));
                } else {
                    em.line(&format!("{} = {};", name, expr));
                }
            }
            CirKind::Policy { name } => {
                em.line(&format!("/* policy {} */", name));
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
                em.line(&format!("rift_policy_validate(\"{}\");", arg));
            }
            CirKind::Comment { text } => {
                em.line(&format!("/* {} */", text));
            }
            CirKind::Unknown { text } => {
                em.line(&format!("/* {} */", text));
            }
        }
    }

    em.blank();
    em.line("rift_cleanup();");
    em.line("return 0;");
    em.dedent();
    em.line("}");
    em.finish()
}

/// Field-type mapping for record emission
fn c_type(field_type: &str) -> &'static str {
    match field_type.to_ascii_uppercase().as_str() {
        "INT" => "int",
        "FLOAT" => "double",
        "STRING" => "const char *",
        _ => "void *",
    }
}
