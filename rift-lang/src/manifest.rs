//! RIFT project manifest (rift.toml)
//!
//! Carries the project defaults the CLI applies when the input is a
//! project directory: governance mode, policy threshold, entry point
//! and output path.

use std::path::Path;
use serde::{Deserialize, Serialize};
use rift_core::GovernMode;
use rift_policy::DEFAULT_THRESHOLD;
use crate::codec::Target;
use crate::error::{Error, Result};

/// RIFT project manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Package metadata
    pub package: Package,

    /// Governance defaults
    #[serde(default)]
    pub governance: GovernanceConfig,

    /// Build configuration
    #[serde(default)]
    pub build: BuildConfig,
}

/// Package metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Package name
    pub name: String,

    /// Package version
    pub version: String,

    /// Package authors
    #[serde(default)]
    pub authors: Vec<String>,

    /// Package description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Governance defaults section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Execution mode (default: classical)
    #[serde(default)]
    pub mode: GovernMode,

    /// Policy validation threshold (default: 0.85)
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            mode: GovernMode::default(),
            threshold: default_threshold(),
        }
    }
}

/// Build configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Entry point file (default: src/main.rift)
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Output path; the extension drives the target (default: out/main.c)
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            output: default_output(),
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_entry() -> String {
    "src/main.rift".to_string()
}

fn default_output() -> String {
    "out/main.c".to_string()
}

impl Manifest {
    /// Parse a manifest from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(text).map_err(|e| Error::Manifest(e.to_string()))?;
        if !(manifest.governance.threshold > 0.0 && manifest.governance.threshold <= 1.0) {
            return Err(Error::Manifest(format!(
                "threshold {} is outside (0, 1]",
                manifest.governance.threshold
            )));
        }
        Ok(manifest)
    }

    /// Load a manifest from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Manifest for a freshly scaffolded project
    pub fn scaffold(name: &str, authors: Vec<String>) -> Self {
        Self {
            package: Package {
                name: name.to_string(),
                version: "0.1.0".to_string(),
                authors,
                description: None,
            },
            governance: GovernanceConfig::default(),
            build: BuildConfig::default(),
        }
    }

    /// Serialize back to TOML text
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Manifest(e.to_string()))
    }

    /// Target implied by the configured output path
    pub fn target(&self) -> Target {
        Target::from_path(Path::new(&self.build.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_manifest_gets_defaults() {
        let manifest = Manifest::parse(
            r#"
[package]
name = "demo"
version = "0.1.0"
"#,
        )
        .unwrap();

        assert_eq!(manifest.governance.mode, GovernMode::Classical);
        assert_eq!(manifest.governance.threshold, 0.85);
        assert_eq!(manifest.build.entry, "src/main.rift");
        assert_eq!(manifest.target(), Target::C);
    }

    #[test]
    fn explicit_sections_parse() {
        let manifest = Manifest::parse(
            r#"
[package]
name = "demo"
version = "0.1.0"

[governance]
mode = "quantum"
threshold = 0.9

[build]
entry = "main.rift"
output = "build/demo.py"
"#,
        )
        .unwrap();

        assert_eq!(manifest.governance.mode, GovernMode::Quantum);
        assert_eq!(manifest.governance.threshold, 0.9);
        assert_eq!(manifest.target(), Target::Python);
    }

    #[test]
    fn scaffold_round_trips() {
        let manifest = Manifest::scaffold("demo", vec!["A <a@example.com>".to_string()]);
        let text = manifest.to_toml().unwrap();
        let parsed = Manifest::parse(&text).unwrap();

        assert_eq!(parsed.package.name, "demo");
        assert_eq!(parsed.package.authors.len(), 1);
        assert_eq!(parsed.governance.threshold, 0.85);
    }

    #[test]
    fn out_of_range_threshold_is_refused() {
        let result = Manifest::parse(
            r#"
[package]
name = "demo"
version = "0.1.0"

[governance]
threshold = 1.5
"#,
        );
        assert!(matches!(result, Err(Error::Manifest(_))));
    }
}
