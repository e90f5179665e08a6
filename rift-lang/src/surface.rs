//! Surface-level transformation
//!
//! The line-oriented path: a default rule catalogue per target, applied
//! through the pattern engine one line at a time. No consensus checking
//! happens here; the linker/codec pipeline is the governed path.

use rift_core::GovernMode;
use rift_pattern::{EngineMetrics, PatternEngine};
use crate::codec::Target;

/// Build the default rule catalogue for one target
pub fn default_engine(target: Target, mode: GovernMode) -> PatternEngine {
    let engine = PatternEngine::new(mode);
    let rules = [
        (r"!govern\s+(?P<mode>\w+)", comment_template(target, "govern {mode}")),
        (
            r"align\s+span<(?P<kind>\w+)>.*",
            comment_template(target, "span {kind}"),
        ),
        (r"validate\((?P<name>\w+)\)", validate_template(target)),
        (
            r"(?P<name>[A-Za-z_]\w*)\s*:=\s*(?P<expr>.+)",
            assign_template(target),
        ),
        (r"while\s*\((?P<cond>[^)]*)\).*", while_template(target)),
        (r"if\s*\((?P<cond>[^)]*)\).*", if_template(target)),
        (r"\}", close_template(target)),
        (r"//\s*(?P<text>.*)", comment_template(target, "{text}")),
    ];

    for (left, right) in rules {
        // Every left side is a fixed catalogue pattern; none can fail.
        engine
            .register(left, &right, 10, true)
            .expect("default rule must compile");
    }
    engine
}

/// Run the surface pass over a whole source
///
/// Unmatched lines pass through unchanged and count as engine failures.
pub fn transform(source: &str, target: Target, mode: GovernMode) -> (String, EngineMetrics) {
    let engine = default_engine(target, mode);
    let mut lines = Vec::new();

    for raw in source.lines() {
        let line = raw.trim();
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }
        match engine.apply(line) {
            Some(outcome) => lines.push(outcome.output),
            None => lines.push(raw.to_string()),
        }
    }

    let mut output = lines.join("\n");
    output.push('\n');
    (output, engine.metrics())
}

fn comment_template(target: Target, body: &str) -> String {
    match target {
        Target::C => format!("/* {} */", body),
        _ => format!("{} {}", target.comment_prefix(), body),
    }
}

fn validate_template(target: Target) -> String {
    match target {
        Target::C => "rift_policy_validate(\"{name}\");".to_string(),
        Target::Go => "rift.Validate({name})".to_string(),
        Target::JavaScript => "rift.validate('{name}');".to_string(),
        Target::Python | Target::Lua => "rift.validate({name})".to_string(),
        Target::Wat => "(call $rift_validate (local.get ${name}))".to_string(),
    }
}

fn assign_template(target: Target) -> String {
    match target {
        Target::C | Target::JavaScript => "{name} = {expr};".to_string(),
        Target::Go | Target::Python | Target::Lua => "{name} = {expr}".to_string(),
        Target::Wat => ";; {name} := {expr}".to_string(),
    }
}

fn while_template(target: Target) -> String {
    match target {
        Target::C | Target::JavaScript => "while ({cond}) {".to_string(),
        Target::Go => "for {cond} {".to_string(),
        Target::Python => "while {cond}:".to_string(),
        Target::Lua => "while {cond} do".to_string(),
        Target::Wat => ";; while {cond}".to_string(),
    }
}

fn if_template(target: Target) -> String {
    match target {
        Target::C | Target::JavaScript => "if ({cond}) {".to_string(),
        Target::Go => "if {cond} {".to_string(),
        Target::Python => "if {cond}:".to_string(),
        Target::Lua => "if {cond} then".to_string(),
        Target::Wat => ";; if {cond}".to_string(),
    }
}

fn close_template(target: Target) -> String {
    match target {
        Target::C | Target::JavaScript | Target::Go => "}".to_string(),
        Target::Python => String::new(),
        Target::Lua => "end".to_string(),
        Target::Wat => ";; end".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_surface_pass() {
        let source = "!govern classical\ncounter := 0\nwhile (counter < 3) {\ncounter := counter + 1\n}\nvalidate(counter)\n";
        let (output, metrics) = transform(source, Target::Python, GovernMode::Classical);

        assert!(output.contains("# govern classical"));
        assert!(output.contains("counter = 0"));
        assert!(output.contains("while counter < 3:"));
        assert!(output.contains("rift.validate(counter)"));
        assert_eq!(metrics.total_failures, 0);
    }

    #[test]
    fn unmatched_lines_pass_through_and_count() {
        let source = "mystery directive\n";
        let (output, metrics) = transform(source, Target::Go, GovernMode::Classical);
        assert!(output.contains("mystery directive"));
        assert_eq!(metrics.total_failures, 1);
        assert_eq!(metrics.total_matches, 0);
    }

    #[test]
    fn go_surface_pass_uses_for_loops() {
        let (output, _) = transform("while (x < 2) {\n}\n", Target::Go, GovernMode::Classical);
        assert!(output.contains("for x < 2 {"));
        assert!(output.contains("}"));
    }

    #[test]
    fn c_validate_quotes_the_name() {
        let (output, _) = transform("validate(counter)\n", Target::C, GovernMode::Classical);
        assert!(output.contains("rift_policy_validate(\"counter\");"));
    }
}
