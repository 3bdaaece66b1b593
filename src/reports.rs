//! Human-readable detection summary
//!
//! Renders the per-ecosystem detection outcome alongside the generated
//! configuration, for terminal output.

use crate::model::ProjectConfig;

/// Render the detection summary as markdown-ish text.
pub fn render_summary(project: &ProjectConfig) -> String {
    let mut lines = vec![
        "# Dependency Update Configuration".to_string(),
        String::new(),
        format!("**Date**: {}", chrono::Local::now().format("%Y-%m-%d")),
        format!("**Update entries**: {}", project.updates.len()),
        String::new(),
    ];

    if project.summaries.is_empty() {
        lines.push("No package manifests found; only the CI-pipeline entry was generated.".to_string());
        lines.push(String::new());
    }

    for summary in &project.summaries {
        lines.push(format!("## {}", summary.ecosystem.display_name()));
        lines.push(String::new());
        lines.push(format!("- Dependencies: {}", summary.dependency_count));

        match &summary.detection.primary {
            Some(primary) => lines.push(format!("- Primary framework: {primary}")),
            None => lines.push("- Primary framework: none".to_string()),
        }

        if summary.detection.detected.is_empty() {
            lines.push("- Frameworks: none detected".to_string());
        } else {
            lines.push("- Frameworks:".to_string());
            for (name, detected) in &summary.detection.detected {
                lines.push(format!(
                    "  - {} ({} package{})",
                    name,
                    detected.count,
                    if detected.count == 1 { "" } else { "s" }
                ));
            }
        }

        if summary.group_names.is_empty() {
            lines.push("- Groups: none (single ungrouped bucket)".to_string());
        } else {
            lines.push(format!("- Groups: {}", summary.group_names.join(", ")));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
