//! Grouping policy generation
//!
//! For each detected framework, emits named groups of dependency-name
//! patterns with an update-type filter. Core packages get the widest
//! allowance (minor + patch); breaking-change-prone ecosystem add-ons
//! are batched conservatively (patch only).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::detect::{DetectionResult, signatures};
use crate::ecosystems::Ecosystem;

/// Semantic-versioning change class used to filter batched updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    Major,
    Minor,
    Patch,
}

/// Dependency kind restriction for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Production,
    Development,
}

/// A named bucket of dependency-name patterns sharing an update rule.
///
/// Patterns may overlap across groups; a package appearing in two groups
/// is accepted, not deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GroupSpec {
    pub patterns: Vec<String>,
    pub update_types: Vec<UpdateType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_type: Option<DependencyKind>,
}

impl GroupSpec {
    fn new(patterns: &[&str], update_types: &[UpdateType]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            update_types: update_types.to_vec(),
            dependency_type: None,
        }
    }

    fn development(mut self) -> Self {
        self.dependency_type = Some(DependencyKind::Development);
        self
    }
}

const WIDE: &[UpdateType] = &[UpdateType::Minor, UpdateType::Patch];
const NARROW: &[UpdateType] = &[UpdateType::Patch];

/// Generate the group map for one ecosystem from its detection result.
///
/// Frameworks are visited in signature-table declaration order; if two
/// frameworks define a group with the same name, the later one
/// overwrites (the shipped tables use framework-prefixed names, so this
/// cannot happen with them).
pub fn generate_groups(eco: Ecosystem, detection: &DetectionResult) -> BTreeMap<String, GroupSpec> {
    let mut groups = BTreeMap::new();

    for framework in detection.names_in_order(signatures::table(eco)) {
        for (name, spec) in framework_groups(eco, framework) {
            groups.insert(name.to_string(), spec);
        }
    }

    groups
}

/// Static group policy for one detected framework.
fn framework_groups(eco: Ecosystem, framework: &str) -> Vec<(&'static str, GroupSpec)> {
    match eco {
        Ecosystem::Npm => npm_groups(framework),
        Ecosystem::Pip => pip_groups(framework),
        Ecosystem::Cargo => cargo_groups(framework),
        Ecosystem::Bundler => bundler_groups(framework),
    }
}

fn npm_groups(framework: &str) -> Vec<(&'static str, GroupSpec)> {
    match framework {
        "react" => vec![
            ("react-core", GroupSpec::new(&["react", "react-dom"], WIDE)),
            (
                "react-ecosystem",
                GroupSpec::new(
                    &[
                        "react-router*",
                        "@tanstack/react-*",
                        "redux",
                        "react-redux",
                        "@reduxjs/toolkit",
                        "zustand",
                    ],
                    NARROW,
                ),
            ),
        ],
        "next" => vec![("next-core", GroupSpec::new(&["next", "@next/*"], WIDE))],
        "nuxt" => vec![(
            "nuxt-core",
            GroupSpec::new(&["nuxt", "@nuxt/*", "@nuxtjs/*"], WIDE),
        )],
        "vue" => vec![
            (
                "vue-core",
                GroupSpec::new(&["vue", "vue-router", "pinia"], WIDE),
            ),
            ("vue-ecosystem", GroupSpec::new(&["@vue/*", "vuex"], NARROW)),
        ],
        "angular" => vec![("angular", GroupSpec::new(&["@angular/*"], WIDE))],
        "svelte" => vec![(
            "svelte-core",
            GroupSpec::new(&["svelte", "@sveltejs/*"], WIDE),
        )],
        "storybook" => vec![(
            "storybook",
            GroupSpec::new(&["storybook", "@storybook/*"], NARROW).development(),
        )],
        "typescript" => vec![(
            "typescript",
            GroupSpec::new(&["typescript", "ts-node", "tsx"], WIDE).development(),
        )],
        "jest" => vec![(
            "jest",
            GroupSpec::new(&["jest", "ts-jest", "babel-jest", "@types/jest"], WIDE).development(),
        )],
        "vitest" => vec![(
            "vitest",
            GroupSpec::new(&["vitest", "@vitest/*"], WIDE).development(),
        )],
        "eslint" => vec![(
            "eslint",
            GroupSpec::new(&["eslint", "eslint-*", "@typescript-eslint/*"], WIDE).development(),
        )],
        "vite" => vec![(
            "vite",
            GroupSpec::new(&["vite", "@vitejs/*"], WIDE).development(),
        )],
        "webpack" => vec![(
            "webpack",
            GroupSpec::new(&["webpack", "webpack-*", "*-loader"], WIDE).development(),
        )],
        "tailwind" => vec![(
            "tailwind",
            GroupSpec::new(&["tailwindcss", "@tailwindcss/*"], WIDE),
        )],
        _ => vec![],
    }
}

fn pip_groups(framework: &str) -> Vec<(&'static str, GroupSpec)> {
    match framework {
        "django" => vec![
            (
                "django-core",
                GroupSpec::new(&["django", "djangorestframework"], WIDE),
            ),
            (
                "django-ecosystem",
                GroupSpec::new(&["django-*", "drf-*"], NARROW),
            ),
        ],
        "flask" => vec![
            ("flask-core", GroupSpec::new(&["flask"], WIDE)),
            ("flask-ecosystem", GroupSpec::new(&["flask-*"], NARROW)),
        ],
        "fastapi" => vec![
            (
                "fastapi-core",
                GroupSpec::new(&["fastapi", "starlette", "uvicorn"], WIDE),
            ),
            (
                "fastapi-ecosystem",
                GroupSpec::new(&["pydantic", "pydantic-*"], NARROW),
            ),
        ],
        "sqlalchemy" => vec![(
            "sqlalchemy",
            GroupSpec::new(&["sqlalchemy", "alembic"], WIDE),
        )],
        "celery" => vec![("celery", GroupSpec::new(&["celery", "kombu"], NARROW))],
        "pytest" => vec![("pytest", GroupSpec::new(&["pytest", "pytest-*"], WIDE))],
        _ => vec![],
    }
}

fn cargo_groups(framework: &str) -> Vec<(&'static str, GroupSpec)> {
    match framework {
        "actix" => vec![
            ("actix-core", GroupSpec::new(&["actix-web"], WIDE)),
            ("actix-ecosystem", GroupSpec::new(&["actix-*"], NARROW)),
        ],
        "axum" => vec![
            ("axum-core", GroupSpec::new(&["axum"], WIDE)),
            (
                "axum-ecosystem",
                GroupSpec::new(&["axum-*", "tower", "tower-*", "hyper"], NARROW),
            ),
        ],
        "rocket" => vec![("rocket", GroupSpec::new(&["rocket", "rocket_*"], WIDE))],
        "tokio" => vec![("tokio", GroupSpec::new(&["tokio", "tokio-*"], WIDE))],
        "serde" => vec![("serde", GroupSpec::new(&["serde", "serde_*"], WIDE))],
        _ => vec![],
    }
}

fn bundler_groups(framework: &str) -> Vec<(&'static str, GroupSpec)> {
    match framework {
        "rails" => vec![
            ("rails-core", GroupSpec::new(&["rails", "railties"], WIDE)),
            (
                "rails-ecosystem",
                GroupSpec::new(
                    &["action*", "active*", "turbo-rails", "stimulus-rails"],
                    NARROW,
                ),
            ),
        ],
        "sinatra" => vec![("sinatra", GroupSpec::new(&["sinatra", "sinatra-*"], WIDE))],
        "sidekiq" => vec![("sidekiq", GroupSpec::new(&["sidekiq", "sidekiq-*"], NARROW))],
        "rspec" => vec![("rspec", GroupSpec::new(&["rspec", "rspec-*"], WIDE))],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::detect;
    use crate::detect::signatures::{primary_eligible, table};
    use crate::parsers::DependencyMap;

    fn detect_pip(names: &[&str]) -> DetectionResult {
        let mut deps = DependencyMap::new();
        for name in names {
            deps.insert(name, "*");
        }
        detect(
            &deps,
            table(Ecosystem::Pip),
            primary_eligible(Ecosystem::Pip),
        )
    }

    #[test]
    fn test_django_core_group() {
        let detection = detect_pip(&["django", "djangorestframework"]);
        let groups = generate_groups(Ecosystem::Pip, &detection);

        let core = &groups["django-core"];
        assert_eq!(core.patterns, vec!["django", "djangorestframework"]);
        assert_eq!(core.update_types, vec![UpdateType::Minor, UpdateType::Patch]);

        let eco = &groups["django-ecosystem"];
        assert_eq!(eco.update_types, vec![UpdateType::Patch]);
    }

    #[test]
    fn test_undetected_framework_contributes_nothing() {
        let detection = detect_pip(&["flask"]);
        let groups = generate_groups(Ecosystem::Pip, &detection);
        assert!(groups.contains_key("flask-core"));
        assert!(!groups.contains_key("django-core"));
    }

    #[test]
    fn test_empty_detection_yields_no_groups() {
        let detection = DetectionResult::default();
        assert!(generate_groups(Ecosystem::Npm, &detection).is_empty());
    }

    #[test]
    fn test_group_names_unique_per_ecosystem() {
        // All shipped group names are framework-prefixed, so generating
        // groups for every framework at once must not collide.
        use std::collections::BTreeSet;
        for eco in crate::ecosystems::ALL_ECOSYSTEMS {
            let mut seen = BTreeSet::new();
            for sig in table(eco) {
                for (name, _) in framework_groups(eco, sig.name) {
                    assert!(seen.insert(name), "duplicate group name {name}");
                }
            }
        }
    }

    #[test]
    fn test_dev_tooling_marked_development() {
        let mut deps = DependencyMap::new();
        deps.insert("jest", "^29.0.0");
        let detection = detect(
            &deps,
            table(Ecosystem::Npm),
            primary_eligible(Ecosystem::Npm),
        );
        let groups = generate_groups(Ecosystem::Npm, &detection);
        assert_eq!(
            groups["jest"].dependency_type,
            Some(DependencyKind::Development)
        );
    }

    #[test]
    fn test_group_spec_serialization() {
        let spec = GroupSpec::new(&["django", "django-*"], WIDE).development();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["patterns"][1], "django-*");
        assert_eq!(json["update-types"][0], "minor");
        assert_eq!(json["dependency-type"], "development");
    }
}
