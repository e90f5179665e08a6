//! Governance execution modes

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Program-wide execution mode, set by the `!govern` directive
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GovernMode {
    /// Immediate assignment, no quantum operators
    #[default]
    Classical,
    /// Deferred assignment, quantum operators enabled
    Quantum,
    /// Both disciplines side by side
    Hybrid,
}

impl GovernMode {
    /// Lowercase source-level name
    pub const fn name(self) -> &'static str {
        match self {
            GovernMode::Classical => "classical",
            GovernMode::Quantum => "quantum",
            GovernMode::Hybrid => "hybrid",
        }
    }
}

impl FromStr for GovernMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classical" => Ok(GovernMode::Classical),
            "quantum" => Ok(GovernMode::Quantum),
            "hybrid" => Ok(GovernMode::Hybrid),
            other => Err(format!("unknown governance mode '{}'", other)),
        }
    }
}

impl fmt::Display for GovernMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("classical".parse::<GovernMode>().unwrap(), GovernMode::Classical);
        assert_eq!("Quantum".parse::<GovernMode>().unwrap(), GovernMode::Quantum);
        assert_eq!("HYBRID".parse::<GovernMode>().unwrap(), GovernMode::Hybrid);
        assert!("entangled".parse::<GovernMode>().is_err());
    }

    #[test]
    fn default_mode_is_classical() {
        assert_eq!(GovernMode::default(), GovernMode::Classical);
    }
}
