//! Framework detection from parsed dependency maps
//!
//! A single generic algorithm runs against per-ecosystem signature
//! tables: flat, declarative data rather than per-ecosystem detector
//! implementations.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::parsers::DependencyMap;

pub mod signatures;

/// One pattern category within a framework signature (core packages,
/// ecosystem add-ons, testing tooling, ...).
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub patterns: &'static [&'static str],
}

/// A named framework and the package patterns that identify it.
#[derive(Debug, Clone, Copy)]
pub struct FrameworkSignature {
    pub name: &'static str,
    pub categories: &'static [Category],
}

/// Packages that matched one framework's signature.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectedFramework {
    pub packages: BTreeSet<String>,
    pub count: usize,
}

/// Detection outcome for one ecosystem.
///
/// A framework appears in `detected` iff at least one of its patterns
/// matched at least one dependency. `primary` holds the first detected
/// framework (in signature-table order) that is primary-eligible for the
/// ecosystem, or `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectionResult {
    pub primary: Option<String>,
    pub detected: BTreeMap<String, DetectedFramework>,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.detected.is_empty()
    }

    pub fn contains(&self, framework: &str) -> bool {
        self.detected.contains_key(framework)
    }

    /// Detected framework names in signature-table declaration order.
    pub fn names_in_order<'a>(&'a self, table: &[FrameworkSignature]) -> Vec<&'a str> {
        table
            .iter()
            .filter_map(|sig| self.detected.get_key_value(sig.name).map(|(k, _)| k.as_str()))
            .collect()
    }
}

/// Match a package name against a pattern.
///
/// A pattern containing a single `*` is an anchored prefix/suffix match,
/// not a substring test: `@storybook/*` matches `@storybook/react` but
/// not `my-@storybook/react-wrapper`. Any other pattern must equal the
/// name exactly.
pub fn matches_pattern(pattern: &str, name: &str) -> bool {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => {
            name.len() >= prefix.len() + suffix.len()
                && name.starts_with(prefix)
                && name.ends_with(suffix)
        }
        None => pattern == name,
    }
}

/// Run every signature in the table against the dependency map.
///
/// An empty dependency map yields an empty result; this never fails.
pub fn detect(
    deps: &DependencyMap,
    table: &[FrameworkSignature],
    primary_eligible: &[&str],
) -> DetectionResult {
    let mut result = DetectionResult::default();

    for signature in table {
        let mut matched: BTreeSet<String> = BTreeSet::new();

        for category in signature.categories {
            // A category with zero patterns contributes nothing
            for pattern in category.patterns {
                for name in deps.names() {
                    if matches_pattern(pattern, name) {
                        matched.insert(name.to_string());
                    }
                }
            }
        }

        if matched.is_empty() {
            continue;
        }

        // First eligible framework in declaration order wins, never
        // overwritten afterwards.
        if result.primary.is_none() && primary_eligible.contains(&signature.name) {
            result.primary = Some(signature.name.to_string());
        }

        let count = matched.len();
        result.detected.insert(
            signature.name.to_string(),
            DetectedFramework {
                packages: matched,
                count,
            },
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT_CORE: Category = Category {
        name: "core",
        patterns: &["django"],
    };
    const CAT_ECO: Category = Category {
        name: "ecosystem",
        patterns: &["django*", "drf-*"],
    };
    const CAT_EMPTY: Category = Category {
        name: "empty",
        patterns: &[],
    };

    const TABLE: &[FrameworkSignature] = &[
        FrameworkSignature {
            name: "django",
            categories: &[CAT_CORE, CAT_ECO, CAT_EMPTY],
        },
        FrameworkSignature {
            name: "flask",
            categories: &[Category {
                name: "core",
                patterns: &["flask"],
            }],
        },
    ];

    #[test]
    fn test_exact_match() {
        assert!(matches_pattern("react", "react"));
        assert!(!matches_pattern("react", "react-dom"));
    }

    #[test]
    fn test_wildcard_is_anchored() {
        assert!(matches_pattern("@storybook/*", "@storybook/react"));
        assert!(!matches_pattern("@storybook/*", "my-@storybook/react-wrapper"));
        assert!(matches_pattern("*-loader", "css-loader"));
        assert!(!matches_pattern("*-loader", "css-loader-utils"));
    }

    #[test]
    fn test_wildcard_no_overlap() {
        // Prefix and suffix must not overlap within the name
        assert!(!matches_pattern("ab*ba", "aba"));
        assert!(matches_pattern("ab*ba", "abba"));
    }

    #[test]
    fn test_detect_accumulates_across_categories() {
        let mut deps = DependencyMap::new();
        deps.insert("django", ">=4.2.0");
        deps.insert("djangorestframework", ">=3.14.0");
        deps.insert("requests", ">=2.31.0");

        let result = detect(&deps, TABLE, &["django", "flask"]);
        assert_eq!(result.primary.as_deref(), Some("django"));

        let django = &result.detected["django"];
        assert_eq!(django.count, 2);
        assert!(django.packages.contains("django"));
        assert!(django.packages.contains("djangorestframework"));
        assert!(!result.contains("flask"));
    }

    #[test]
    fn test_primary_not_overwritten() {
        let mut deps = DependencyMap::new();
        deps.insert("django", "*");
        deps.insert("flask", "*");

        let result = detect(&deps, TABLE, &["django", "flask"]);
        assert_eq!(result.primary.as_deref(), Some("django"));
        assert!(result.contains("flask"));
    }

    #[test]
    fn test_empty_map_is_safe() {
        let deps = DependencyMap::new();
        let result = detect(&deps, TABLE, &["django"]);
        assert!(result.primary.is_none());
        assert!(result.is_empty());
    }

    #[test]
    fn test_non_eligible_framework_never_primary() {
        let mut deps = DependencyMap::new();
        deps.insert("flask", "*");

        let result = detect(&deps, TABLE, &["django"]);
        assert!(result.primary.is_none());
        assert!(result.contains("flask"));
    }

    #[test]
    fn test_names_in_order() {
        let mut deps = DependencyMap::new();
        deps.insert("flask", "*");
        deps.insert("django", "*");

        let result = detect(&deps, TABLE, &[]);
        assert_eq!(result.names_in_order(TABLE), vec!["django", "flask"]);
    }
}
