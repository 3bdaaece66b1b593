//! Output document types for the generated update configuration
//!
//! The serialized shape follows the dependency-update-service convention
//! (`version: 2` with an ordered `updates` list). Serialization itself is
//! left to the caller; these types only guarantee deterministic content.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::detect::DetectionResult;
use crate::ecosystems::Ecosystem;
use crate::grouping::GroupSpec;

/// Update schedule, supplied by the caller rather than computed here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub interval: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitMessage {
    pub prefix: String,
}

/// One entry in the `updates` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EcosystemUpdate {
    pub package_ecosystem: String,
    pub directory: String,
    pub schedule: Schedule,
    pub open_pull_requests_limit: u32,
    pub labels: Vec<String>,
    pub commit_message: CommitMessage,
    /// Omitted entirely when no groups were generated (ungrouped bucket).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub groups: BTreeMap<String, GroupSpec>,
}

impl EcosystemUpdate {
    /// Entry for one detected package ecosystem.
    pub fn for_ecosystem(
        eco: Ecosystem,
        schedule: Schedule,
        pr_limit: u32,
        labels: Vec<String>,
        groups: BTreeMap<String, GroupSpec>,
    ) -> Self {
        Self {
            package_ecosystem: eco.config_id().to_string(),
            directory: "/".to_string(),
            schedule,
            open_pull_requests_limit: pr_limit,
            labels,
            commit_message: CommitMessage {
                prefix: eco.commit_prefix().to_string(),
            },
            groups,
        }
    }

    /// The fixed CI-pipeline entry, appended unconditionally after all
    /// ecosystem entries regardless of detection.
    pub fn ci_pipeline(schedule: Schedule, pr_limit: u32) -> Self {
        Self {
            package_ecosystem: "github-actions".to_string(),
            directory: "/".to_string(),
            schedule,
            open_pull_requests_limit: pr_limit,
            labels: vec!["dependencies".to_string(), "ci".to_string()],
            commit_message: CommitMessage {
                prefix: "ci".to_string(),
            },
            groups: BTreeMap::new(),
        }
    }
}

/// Per-ecosystem detection outcome, kept for reporting only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionSummary {
    pub ecosystem: Ecosystem,
    pub dependency_count: usize,
    pub detection: DetectionResult,
    pub group_names: Vec<String>,
}

/// The final assembled document: one entry per detected ecosystem in the
/// fixed order, followed by the CI-pipeline entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectConfig {
    pub version: u32,
    pub updates: Vec<EcosystemUpdate>,
    /// Reporting data; not part of the serialized config document.
    #[serde(skip)]
    pub summaries: Vec<DetectionSummary>,
}

impl ProjectConfig {
    pub fn new(updates: Vec<EcosystemUpdate>, summaries: Vec<DetectionSummary>) -> Self {
        Self {
            version: 2,
            updates,
            summaries,
        }
    }

    /// Serialize the config document to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Serialize the config document to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
