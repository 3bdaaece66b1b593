//! Manifest discovery and loading
//!
//! Locates the zero-or-more manifest files for one ecosystem under a
//! project root and loads them into a merged [`DependencyMap`]. A missing
//! manifest means the ecosystem is absent; a manifest that exists but
//! cannot be read is a per-ecosystem error and never aborts the other
//! ecosystems.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ecosystems::Ecosystem;
use crate::parsers::{
    DependencyMap, Parser, cargo::CargoParser, npm::NpmParser, python::PythonParser,
    ruby::RubyParser,
};

/// Reader-level failures. Parser-level problems are never errors.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("unreadable manifest {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Manifest files that exist for this ecosystem, in read order.
pub fn manifest_paths(root: &Path, eco: Ecosystem) -> Vec<PathBuf> {
    eco.manifest_files()
        .iter()
        .map(|name| root.join(name))
        .filter(|path| path.is_file())
        .collect()
}

/// Parse manifest content with the ecosystem's parser.
pub fn parse_manifest(eco: Ecosystem, content: &str) -> DependencyMap {
    match eco {
        Ecosystem::Npm => NpmParser::new().parse(content),
        Ecosystem::Pip => PythonParser::new().parse(content),
        Ecosystem::Cargo => CargoParser::new().parse(content),
        Ecosystem::Bundler => RubyParser::new().parse(content),
    }
}

/// Load and merge every manifest for one ecosystem.
///
/// Returns `None` when no manifest exists (ecosystem absent). When more
/// than one file is present the later file wins on key collision, so for
/// pip the pyproject.toml entries override requirements.txt.
pub async fn read_dependencies(
    root: &Path,
    eco: Ecosystem,
) -> Result<Option<DependencyMap>, ReaderError> {
    let paths = manifest_paths(root, eco);
    if paths.is_empty() {
        return Ok(None);
    }

    let mut merged = DependencyMap::new();
    for path in paths {
        let content =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| ReaderError::Unreadable {
                    path: path.clone(),
                    source,
                })?;
        tracing::debug!(path = %path.display(), ecosystem = %eco, "parsing manifest");
        merged.merge_replacing(parse_manifest(eco, &content));
    }

    Ok(Some(merged))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_manifest_paths_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(manifest_paths(dir.path(), Ecosystem::Npm).is_empty());
    }

    #[test]
    fn test_manifest_paths_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pyproject.toml", "[project]\n");
        write(dir.path(), "requirements.txt", "flask==2.0\n");

        let paths = manifest_paths(dir.path(), Ecosystem::Pip);
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("requirements.txt"));
        assert!(paths[1].ends_with("pyproject.toml"));
    }

    #[tokio::test]
    async fn test_read_absent_ecosystem() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_dependencies(dir.path(), Ecosystem::Cargo).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_read_single_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Gemfile", "gem 'rails', '~> 7.0'\n");

        let map = read_dependencies(dir.path(), Ecosystem::Bundler)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(map.get("rails"), Some("~> 7.0"));
    }

    #[tokio::test]
    async fn test_pyproject_overrides_requirements() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "requirements.txt", "django>=4.0\nrequests>=2.31.0\n");
        write(
            dir.path(),
            "pyproject.toml",
            "[project]\ndependencies = [\"django>=5.0\"]\n",
        );

        let map = read_dependencies(dir.path(), Ecosystem::Pip)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(map.get("django"), Some(">=5.0"));
        assert_eq!(map.get("requests"), Some(">=2.31.0"));
    }

    #[tokio::test]
    async fn test_empty_manifest_is_present_but_empty() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "package.json", "{\"name\": \"x\"}\n");

        let map = read_dependencies(dir.path(), Ecosystem::Npm)
            .await
            .unwrap()
            .unwrap();
        assert!(map.is_empty());
    }
}
