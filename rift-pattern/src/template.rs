//! Right-template expansion
//!
//! `$N` substitutes positional capture groups and `{name}` named ones;
//! everything else passes through. A reference to a group that did not
//! participate in the match passes through verbatim.

use regex::Captures;

/// Expand a right template against the captures of a left match
pub fn expand(template: &str, caps: &Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '$' => {
                let digits: String = template[idx + 1..]
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                if digits.is_empty() {
                    out.push('$');
                    continue;
                }
                for _ in 0..digits.len() {
                    chars.next();
                }
                let group: usize = digits.parse().unwrap_or(0);
                match caps.get(group) {
                    Some(m) => out.push_str(m.as_str()),
                    None => {
                        out.push('$');
                        out.push_str(&digits);
                    }
                }
            }
            '{' => {
                let rest = &template[idx + 1..];
                let name: String = rest
                    .chars()
                    .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                    .collect();
                let closes = rest[name.len()..].starts_with('}');
                if name.is_empty() || !closes {
                    out.push('{');
                    continue;
                }
                match caps.name(&name) {
                    Some(m) => {
                        out.push_str(m.as_str());
                        for _ in 0..name.len() + 1 {
                            chars.next();
                        }
                    }
                    None => out.push('{'),
                }
            }
            other => out.push(other),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn caps<'a>(pattern: &str, input: &'a str) -> Captures<'a> {
        Regex::new(pattern).unwrap().captures(input).unwrap()
    }

    #[test]
    fn positional_groups_substitute() {
        let caps = caps(r"(\w+)\s*:=\s*(.+)", "x := 1 + 2");
        assert_eq!(expand("$1 = $2;", &caps), "x = 1 + 2;");
    }

    #[test]
    fn named_groups_substitute() {
        let caps = caps(r"validate\((?P<name>\w+)\)", "validate(counter)");
        assert_eq!(expand("rift.validate({name})", &caps), "rift.validate(counter)");
    }

    #[test]
    fn unknown_references_pass_through() {
        let caps = caps(r"(\w+)", "x");
        assert_eq!(expand("$1 $9 {missing}", &caps), "x $9 {missing}");
    }

    #[test]
    fn literal_text_is_untouched() {
        let caps = caps(r"(\w+)", "loop");
        assert_eq!(expand("while ($1) { $ }", &caps), "while (loop) { $ }");
    }
}
