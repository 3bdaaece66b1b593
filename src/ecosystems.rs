//! Ecosystem identification and manifest file mapping
//!
//! This module defines the supported package ecosystems and provides
//! mappings to their manifest filenames and update-config identifiers.

use serde::{Deserialize, Serialize};

/// Supported package ecosystems.
///
/// Each variant corresponds to a specific package manager and determines
/// which manifest files are scanned, which parser runs, and which
/// signature table drives framework detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// JavaScript/Node.js packages (package.json)
    Npm,
    /// Python packages (requirements.txt, pyproject.toml)
    Pip,
    /// Rust packages (Cargo.toml)
    Cargo,
    /// Ruby gems (Gemfile)
    Bundler,
}

/// The four ecosystems in the fixed order used for the assembled output.
pub const ALL_ECOSYSTEMS: [Ecosystem; 4] = [
    Ecosystem::Npm,
    Ecosystem::Pip,
    Ecosystem::Cargo,
    Ecosystem::Bundler,
];

impl Ecosystem {
    /// Manifest filenames recognized for this ecosystem, in read order.
    ///
    /// When more than one file exists, all are parsed and merged; files
    /// later in the list take precedence on key collision (pip:
    /// pyproject.toml overrides requirements.txt).
    pub fn manifest_files(self) -> &'static [&'static str] {
        match self {
            Ecosystem::Npm => &["package.json"],
            Ecosystem::Pip => &["requirements.txt", "pyproject.toml"],
            Ecosystem::Cargo => &["Cargo.toml"],
            Ecosystem::Bundler => &["Gemfile"],
        }
    }

    /// Identifier used in the generated update configuration
    /// (dependabot `package-ecosystem` values).
    pub fn config_id(self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Pip => "pip",
            Ecosystem::Cargo => "cargo",
            Ecosystem::Bundler => "bundler",
        }
    }

    /// Human-readable name for reports and logs.
    pub fn display_name(self) -> &'static str {
        match self {
            Ecosystem::Npm => "Node.js (npm)",
            Ecosystem::Pip => "Python (pip)",
            Ecosystem::Cargo => "Rust (cargo)",
            Ecosystem::Bundler => "Ruby (bundler)",
        }
    }

    /// Commit-message prefix for update pull requests.
    pub fn commit_prefix(self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Pip => "pip",
            Ecosystem::Cargo => "cargo",
            Ecosystem::Bundler => "bundler",
        }
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.config_id())
    }
}
