//! Multi-ecosystem orchestration
//!
//! Runs the Reader → Parser → Detector → Grouping pipeline for each of
//! the four ecosystems concurrently and assembles the final document.
//! The pipelines are pure and independent: each owns its private
//! dependency map and detection result, and nothing is shared until the
//! deterministic fan-in merge.

use std::path::Path;

use futures::future::join_all;

use crate::config::GeneratorConfig;
use crate::detect::{self, signatures};
use crate::ecosystems::{ALL_ECOSYSTEMS, Ecosystem};
use crate::grouping::generate_groups;
use crate::model::{DetectionSummary, EcosystemUpdate, ProjectConfig};
use crate::readers;

/// Build the full project configuration for a project root.
///
/// Ecosystems with no manifest contribute nothing. A reader failure
/// drops only the affected ecosystem, with a logged warning. The fixed
/// CI-pipeline entry is always appended, even for an empty project.
pub async fn build_project_config(root: &Path, config: &GeneratorConfig) -> ProjectConfig {
    let pipelines = ALL_ECOSYSTEMS
        .iter()
        .map(|&eco| run_pipeline(root, eco, config));

    // join_all preserves input order, which gives the fixed ecosystem
    // order in the assembled list.
    let results = join_all(pipelines).await;

    let mut updates = Vec::new();
    let mut summaries = Vec::new();
    for result in results.into_iter().flatten() {
        updates.push(result.update);
        summaries.push(result.summary);
    }

    updates.push(EcosystemUpdate::ci_pipeline(
        config.schedule(),
        config.pr_limit,
    ));

    ProjectConfig::new(updates, summaries)
}

struct PipelineResult {
    update: EcosystemUpdate,
    summary: DetectionSummary,
}

/// Run one ecosystem's pipeline. Returns `None` when the ecosystem is
/// absent or its manifest is unreadable.
async fn run_pipeline(
    root: &Path,
    eco: Ecosystem,
    config: &GeneratorConfig,
) -> Option<PipelineResult> {
    let deps = match readers::read_dependencies(root, eco).await {
        Ok(Some(deps)) => deps,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(ecosystem = %eco, error = %err, "skipping ecosystem");
            return None;
        }
    };

    let detection = detect::detect(
        &deps,
        signatures::table(eco),
        signatures::primary_eligible(eco),
    );

    // Manifest present but nothing parsed or nothing detected: the
    // ecosystem still gets an ungrouped entry. The degraded tier always
    // gets the ungrouped entry.
    let groups = if config.grouping {
        generate_groups(eco, &detection)
    } else {
        Default::default()
    };

    tracing::info!(
        ecosystem = %eco,
        dependencies = deps.len(),
        frameworks = detection.detected.len(),
        groups = groups.len(),
        "ecosystem processed"
    );

    let group_names: Vec<String> = groups.keys().cloned().collect();
    let update = EcosystemUpdate::for_ecosystem(
        eco,
        config.schedule(),
        config.pr_limit,
        config.labels.clone(),
        groups,
    );
    let summary = DetectionSummary {
        ecosystem: eco,
        dependency_count: deps.len(),
        detection,
        group_names,
    };

    Some(PipelineResult { update, summary })
}
