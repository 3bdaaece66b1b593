//! Configuration for the update-config generator

use serde::Deserialize;

use crate::model::Schedule;

/// Default pull-request limit per ecosystem entry.
const DEFAULT_PR_LIMIT: u32 = 10;

/// Default update interval.
const DEFAULT_INTERVAL: &str = "weekly";

/// Generator configuration.
///
/// Schedule parameters are supplied by the caller (CLI flags or a JSON
/// options value); this subsystem never computes them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Update schedule applied to every generated entry
    pub schedule: ScheduleConfig,
    /// Labels attached to update pull requests
    pub labels: Vec<String>,
    /// Open pull-request limit per entry
    pub pr_limit: u32,
    /// Emit grouped entries; `false` is the degraded single-bucket tier
    pub grouping: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schedule: ScheduleConfig::default(),
            labels: vec!["dependencies".to_string()],
            pr_limit: DEFAULT_PR_LIMIT,
            grouping: true,
        }
    }
}

/// Schedule parameters (interval/day/time).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub interval: String,
    pub day: Option<String>,
    pub time: Option<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL.to_string(),
            day: Some("monday".to_string()),
            time: None,
        }
    }
}

impl GeneratorConfig {
    /// Parse configuration from a JSON options value.
    pub fn from_options(options: Option<serde_json::Value>) -> Self {
        match options {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => Self::default(),
        }
    }

    /// The schedule record placed in every generated entry.
    pub fn schedule(&self) -> Schedule {
        Schedule {
            interval: self.schedule.interval.clone(),
            day: self.schedule.day.clone(),
            time: self.schedule.time.clone(),
        }
    }
}
