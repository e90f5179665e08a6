//! Bipartite pattern pairs
//!
//! Left is always a regex, compiled eagerly at registration. Right is a
//! template: literal when it carries no regex metacharacters, otherwise
//! compiled opportunistically (a right side that fails to compile is
//! demoted to a literal).

use regex::Regex;
use crate::error::{PatternError, PatternResult};

const META_CHARACTERS: &[char] = &['\\', '^', '$', '.', '|', '?', '*', '+', '(', ')', '[', ']'];

/// Right half of a pair: emission template plus its classification
#[derive(Debug, Clone)]
pub struct RightSide {
    template: String,
    is_literal: bool,
    compiled: Option<Regex>,
}

impl RightSide {
    fn from_template(template: &str) -> Self {
        let has_meta = template.chars().any(|c| META_CHARACTERS.contains(&c));
        let compiled = if has_meta { Regex::new(template).ok() } else { None };
        Self {
            template: template.to_string(),
            is_literal: !has_meta,
            compiled,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn is_literal(&self) -> bool {
        self.is_literal
    }

    pub fn compiled(&self) -> Option<&Regex> {
        self.compiled.as_ref()
    }
}

/// One transformation rule: a left match regex and a right template
///
/// Immutable after registration.
#[derive(Debug, Clone)]
pub struct PatternPair {
    left_pattern: String,
    left: Regex,
    anchored: bool,
    priority: u32,
    right: RightSide,
}

impl PatternPair {
    /// Compile a pair; fails only when the left side does not compile
    pub fn new(left: &str, right: &str, priority: u32, anchored: bool) -> PatternResult<Self> {
        let effective = if anchored {
            format!("^(?:{})$", left)
        } else {
            left.to_string()
        };
        let compiled = Regex::new(&effective).map_err(|e| PatternError::BadLeftPattern {
            pattern: left.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            left_pattern: left.to_string(),
            left: compiled,
            anchored,
            priority,
            right: RightSide::from_template(right),
        })
    }

    pub fn left_pattern(&self) -> &str {
        &self.left_pattern
    }

    pub fn left(&self) -> &Regex {
        &self.left
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn right(&self) -> &RightSide {
        &self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_right_side_is_literal() {
        let pair = PatternPair::new(r"^!govern", "mode directive", 10, false).unwrap();
        assert!(pair.right().is_literal());
        assert!(pair.right().compiled().is_none());
    }

    #[test]
    fn metacharacter_right_side_compiles_when_it_can() {
        let pair = PatternPair::new(r"(\w+)", r"value: $1", 10, false).unwrap();
        assert!(!pair.right().is_literal());
        assert!(pair.right().compiled().is_some());
    }

    #[test]
    fn uncompilable_right_side_is_demoted_not_fatal() {
        let pair = PatternPair::new(r"(\w+)", r"open [paren (", 10, false).unwrap();
        assert!(!pair.right().is_literal());
        assert!(pair.right().compiled().is_none());
    }

    #[test]
    fn bad_left_side_is_fatal() {
        let result = PatternPair::new(r"unclosed (", "out", 10, false);
        assert!(matches!(result, Err(PatternError::BadLeftPattern { .. })));
    }

    #[test]
    fn anchoring_wraps_the_left_pattern() {
        let pair = PatternPair::new(r"\d+", "num", 1, true).unwrap();
        assert!(pair.left().is_match("123"));
        assert!(!pair.left().is_match("x123"));
    }
}
