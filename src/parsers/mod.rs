//! Parsers for dependency manifests (Cargo.toml, package.json, etc.)

use serde::{Deserialize, Serialize};

/// Version constraint sentinel for dependencies declared without one.
pub const ANY_VERSION: &str = "*";

/// Ordered mapping from package name to version-constraint string.
///
/// Keys are normalized: no surrounding whitespace, no quotes, no comment
/// text, no bracketed extras. Insertion order is preserved so the same
/// manifest always produces the same output.
///
/// Two precedence rules apply and are deliberately distinct:
/// - within a single file, duplicate keys keep the first-seen value
///   ([`insert`](Self::insert));
/// - across files of the same ecosystem, the later file wins
///   ([`insert_or_replace`](Self::insert_or_replace), used by the reader
///   merge so pyproject.toml overrides requirements.txt).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyMap {
    entries: Vec<(String, String)>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dependency, keeping the first-seen value on duplicates.
    pub fn insert(&mut self, name: &str, version: &str) {
        if !self.contains(name) {
            self.entries.push((name.to_string(), version.to_string()));
        }
    }

    /// Insert a dependency, replacing any existing value.
    pub fn insert_or_replace(&mut self, name: &str, version: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = version.to_string(),
            None => self.entries.push((name.to_string(), version.to_string())),
        }
    }

    /// Merge another map into this one, later map wins on collision.
    pub fn merge_replacing(&mut self, other: DependencyMap) {
        for (name, version) in other.entries {
            self.insert_or_replace(&name, &version);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, version)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Iterate over package names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl FromIterator<(String, String)> for DependencyMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut map = DependencyMap::new();
        for (name, version) in iter {
            map.insert(&name, &version);
        }
        map
    }
}

/// Trait for parsing dependency manifests.
///
/// Parsing is infallible by contract: malformed individual lines are
/// skipped, never escalated. An unparseable file yields an empty map.
pub trait Parser: Send + Sync {
    /// Parse the given manifest content and extract dependencies.
    fn parse(&self, content: &str) -> DependencyMap;
}

pub mod cargo;
pub mod npm;
pub mod python;
pub mod ruby;
