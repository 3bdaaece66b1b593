//! Parser for Python dependency files (requirements.txt, pyproject.toml)

use super::{ANY_VERSION, DependencyMap, Parser};

/// Parser for Python dependency files.
///
/// Detects the format from the content: a file with line-anchored
/// `[project...]` or `[tool.poetry...]` section headers is parsed as
/// pyproject.toml, anything else as requirements.txt.
#[derive(Debug, Default)]
pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for PythonParser {
    fn parse(&self, content: &str) -> DependencyMap {
        // Use line-anchored detection to avoid false positives like
        // "mypkg[project]==1.2"
        if is_pyproject_toml(content) {
            parse_pyproject_toml(content)
        } else {
            parse_requirements_txt(content)
        }
    }
}

/// Check if content is a pyproject.toml file by looking for line-anchored
/// section headers.
fn is_pyproject_toml(content: &str) -> bool {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("[project") && is_valid_section_header(trimmed, "[project") {
            return true;
        }
        if trimmed.starts_with("[tool.poetry") && is_valid_section_header(trimmed, "[tool.poetry") {
            return true;
        }
    }
    false
}

/// Check if a line is a valid TOML section header starting with the given
/// prefix. Allows optional whitespace and comments after the closing ']'.
fn is_valid_section_header(line: &str, prefix: &str) -> bool {
    let after_prefix = &line[prefix.len()..];

    let Some(bracket_pos) = after_prefix.find(']') else {
        return false;
    };

    // Between prefix and ']': must be empty or a dotted continuation
    let inner = &after_prefix[..bracket_pos];
    if !inner.is_empty() && !inner.starts_with('.') {
        return false;
    }

    // After ']': only whitespace or a comment
    let after_bracket = after_prefix[bracket_pos + 1..].trim_start();
    after_bracket.is_empty() || after_bracket.starts_with('#')
}

/// Parse requirements.txt format.
fn parse_requirements_txt(content: &str) -> DependencyMap {
    let mut map = DependencyMap::new();

    for line in content.lines() {
        let trimmed = line.trim();

        // Skip empty lines, comments, and option lines (-r, --index-url, ...)
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('-') {
            continue;
        }

        // Skip URL dependencies (package @ https://...)
        if trimmed.contains(" @ ") {
            continue;
        }

        if let Some((name, version)) = parse_requirement_entry(trimmed) {
            map.insert(&name, &version);
        }
    }

    map
}

/// PEP 440 version operators, longest first so `==` is not split by `=`.
const OPERATORS: [&str; 8] = ["===", "==", ">=", "<=", "!=", "~=", ">", "<"];

/// Parse a single requirement string: `name[extras]op version ; markers # comment`.
///
/// Returns the normalized name (extras stripped, dotted names preserved)
/// and the constraint, or the any-version sentinel when no operator is
/// present. Malformed entries yield `None`.
pub(crate) fn parse_requirement_entry(entry: &str) -> Option<(String, String)> {
    // Remove inline comments
    let without_comment = match entry.find('#') {
        Some(pos) => &entry[..pos],
        None => entry,
    };

    // Remove environment markers: ; python_version >= "3.8"
    let without_markers = match without_comment.find(';') {
        Some(pos) => &without_comment[..pos],
        None => without_comment,
    };
    let without_markers = without_markers.trim();

    if without_markers.is_empty() {
        return None;
    }

    // Find the first version operator
    let mut op_pos = None;
    for op in &OPERATORS {
        if let Some(pos) = without_markers.find(op)
            && op_pos.is_none_or(|p| pos < p)
        {
            op_pos = Some(pos);
        }
    }

    // Name is everything before the operator, with extras stripped
    let name_part = match op_pos {
        Some(pos) => &without_markers[..pos],
        None => without_markers,
    };
    let name = match name_part.find('[') {
        Some(bracket_pos) => &name_part[..bracket_pos],
        None => name_part,
    };
    let name = name.trim();

    if name.is_empty() || !is_valid_package_name(name) {
        return None;
    }

    let version = match op_pos {
        Some(pos) => without_markers[pos..].trim().to_string(),
        None => ANY_VERSION.to_string(),
    };

    Some((name.to_string(), version))
}

/// Valid pip package name: letters, digits, dots, underscores, hyphens.
/// Dotted names like `zope.interface` must survive intact.
fn is_valid_package_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
}

/// Sections of a pyproject.toml relevant to dependency extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PyprojectSection {
    /// `[project]` - holds the `dependencies = [...]` array
    Project,
    /// `[project.optional-dependencies]` - named groups of arrays
    OptionalDependencies,
    /// A legacy key-value dependency table, e.g. `[tool.poetry.dependencies]`
    KeyValueDependencies,
    /// Anything else (metadata, urls, build-system, ...) - never consumed
    Other,
}

/// Parse pyproject.toml (PEP 621 + legacy key-value tables).
///
/// Three shapes are supported in the same file: the `[project]`
/// `dependencies` array, every group under
/// `[project.optional-dependencies]`, and legacy `name = "spec"` pairs
/// inside dependency-declaring tables. Key-value pairs in metadata
/// sections (`[project.urls]` and the like) share the same syntactic
/// shape and must not produce entries.
fn parse_pyproject_toml(content: &str) -> DependencyMap {
    let mut map = DependencyMap::new();
    let mut section = PyprojectSection::Other;
    let mut in_array = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Section headers reset the array state
        if !in_array && trimmed.starts_with('[') && !trimmed.starts_with("[[") {
            section = classify_section(trimmed);
            continue;
        }

        match section {
            PyprojectSection::Project => {
                if in_array {
                    in_array = !consume_array_line(trimmed, &mut map);
                } else if let Some(after_eq) = key_value_rhs(trimmed, "dependencies") {
                    if let Some(rest) = after_eq.strip_prefix('[') {
                        in_array = !consume_array_line(rest, &mut map);
                    }
                }
            }
            PyprojectSection::OptionalDependencies => {
                if in_array {
                    in_array = !consume_array_line(trimmed, &mut map);
                } else if let Some((_group, after_eq)) = split_key_value(trimmed) {
                    // Group names may contain hyphens; all groups merge
                    // into the same output map.
                    if let Some(rest) = after_eq.strip_prefix('[') {
                        in_array = !consume_array_line(rest, &mut map);
                    }
                }
            }
            PyprojectSection::KeyValueDependencies => {
                if let Some((key, value)) = split_key_value(trimmed) {
                    // The interpreter requirement is not a package
                    if key == "python" {
                        continue;
                    }
                    if !is_valid_package_name(key) {
                        continue;
                    }
                    if let Some(version) = extract_version_value(value) {
                        map.insert(key, &version);
                    }
                }
            }
            PyprojectSection::Other => {}
        }
    }

    map
}

/// Classify a `[section]` header line (trailing comments tolerated).
fn classify_section(line: &str) -> PyprojectSection {
    let inner = match line.find(']') {
        Some(pos) => &line[1..pos],
        None => return PyprojectSection::Other,
    };
    let inner = inner.trim();

    if inner == "project" {
        return PyprojectSection::Project;
    }
    if inner == "project.optional-dependencies" {
        return PyprojectSection::OptionalDependencies;
    }
    // Legacy tables: [tool.poetry.dependencies],
    // [tool.poetry.dev-dependencies], [tool.poetry.group.X.dependencies],
    // [project.dependencies] written as a table
    if inner.ends_with("dependencies") && (inner.starts_with("tool.") || inner.starts_with("project."))
    {
        return PyprojectSection::KeyValueDependencies;
    }
    PyprojectSection::Other
}

/// Split a `key = value` line; the key may be bare or quoted.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim().trim_matches('"').trim_matches('\'');
    let value = line[eq_pos + 1..].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Return the right-hand side when the line's key equals `expected`.
fn key_value_rhs<'a>(line: &'a str, expected: &str) -> Option<&'a str> {
    let (key, value) = split_key_value(line)?;
    (key == expected).then_some(value)
}

/// Consume one line of a `[...]` array of requirement strings.
///
/// Inserts every quoted entry into the map and reports whether the array
/// closed on this line. The closing bracket may carry a trailing
/// same-line comment; brackets inside quoted strings (extras like
/// `fastapi[all]`) do not terminate the array.
fn consume_array_line(line: &str, map: &mut DependencyMap) -> bool {
    let mut closed = false;
    let mut in_string = false;
    let mut quote = '"';
    let mut current = String::new();

    for ch in line.chars() {
        if in_string {
            if ch == quote {
                in_string = false;
                if let Some((name, version)) = parse_requirement_entry(&current) {
                    map.insert(&name, &version);
                }
                current.clear();
            } else {
                current.push(ch);
            }
        } else {
            match ch {
                '"' | '\'' => {
                    in_string = true;
                    quote = ch;
                }
                ']' => {
                    closed = true;
                    break;
                }
                '#' => break,
                _ => {}
            }
        }
    }

    closed
}

/// Extract a version string from a legacy key-value right-hand side:
/// either a bare quoted string or an inline table with a `version` key.
fn extract_version_value(value: &str) -> Option<String> {
    let trimmed = value.trim();

    // Strip a trailing comment outside quotes
    let trimmed = strip_trailing_comment(trimmed);
    let trimmed = trimmed.trim();

    if trimmed.starts_with('{') {
        // Inline table: { version = "^2.0", optional = true }
        let version_pos = trimmed.find("version")?;
        let after = &trimmed[version_pos + "version".len()..];
        let eq_pos = after.find('=')?;
        return extract_quoted(&after[eq_pos + 1..]);
    }

    extract_quoted(trimmed)
}

/// Extract the first quoted string from a value.
fn extract_quoted(value: &str) -> Option<String> {
    let trimmed = value.trim_start();
    let quote = trimmed.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &trimmed[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

/// Remove a `#` comment that is not inside a quoted string.
fn strip_trailing_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut quote = '"';
    for (idx, ch) in line.char_indices() {
        if in_string {
            if ch == quote {
                in_string = false;
            }
        } else {
            match ch {
                '"' | '\'' => {
                    in_string = true;
                    quote = ch;
                }
                '#' => return &line[..idx],
                _ => {}
            }
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements_simple() {
        let parser = PythonParser::new();
        let content = r#"
flask==2.0.0
requests>=2.25.0
django~=4.0
"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("flask"), Some("==2.0.0"));
        assert_eq!(map.get("requests"), Some(">=2.25.0"));
        assert_eq!(map.get("django"), Some("~=4.0"));
    }

    #[test]
    fn test_requirements_with_extras_and_comment() {
        let parser = PythonParser::new();
        let content = "uvicorn[standard,watch]>=0.20.0  # asgi server";
        let map = parser.parse(content);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("uvicorn"), Some(">=0.20.0"));
    }

    #[test]
    fn test_requirements_no_version_is_any() {
        let parser = PythonParser::new();
        let map = parser.parse("requests\nflask==2.0.0\n");
        assert_eq!(map.get("requests"), Some("*"));
        assert_eq!(map.get("flask"), Some("==2.0.0"));
    }

    #[test]
    fn test_dotted_names_preserved() {
        let parser = PythonParser::new();
        let map = parser.parse("zope.interface==6.0\ngoogle.cloud-storage>=2.0\n");
        assert_eq!(map.get("zope.interface"), Some("==6.0"));
        assert_eq!(map.get("google.cloud-storage"), Some(">=2.0"));
        assert!(!map.contains("zope"));
    }

    #[test]
    fn test_requirements_skip_options_and_urls() {
        let parser = PythonParser::new();
        let content = r#"
-r other.txt
--index-url https://pypi.org/simple
pkg @ https://example.com/pkg.whl
flask==2.0.0
"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 1);
        assert!(map.contains("flask"));
    }

    #[test]
    fn test_requirements_env_markers_stripped() {
        let parser = PythonParser::new();
        let map = parser.parse("tomli>=1.1.0 ; python_version < \"3.11\"\n");
        assert_eq!(map.get("tomli"), Some(">=1.1.0"));
    }

    #[test]
    fn test_pyproject_dependencies_array() {
        let parser = PythonParser::new();
        let content = r#"
[project]
name = "myproject"
dependencies = [
    "django>=4.2.0",
    "djangorestframework>=3.14.0",
    "fastapi[all]>=0.100",
]
"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("django"), Some(">=4.2.0"));
        assert_eq!(map.get("djangorestframework"), Some(">=3.14.0"));
        assert_eq!(map.get("fastapi"), Some(">=0.100"));
    }

    #[test]
    fn test_pyproject_array_trailing_comment() {
        let parser = PythonParser::new();
        let content = r#"
[project]
dependencies = ["requests>=2.31.0"]  # end of deps
"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("requests"), Some(">=2.31.0"));
    }

    #[test]
    fn test_pyproject_optional_dependency_groups() {
        let parser = PythonParser::new();
        let content = r#"
[project]
name = "myproject"

[project.optional-dependencies]
dev = [
    "pytest>=7.0.0",
]
docs-build = ["sphinx>=7.0"]
"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("pytest"), Some(">=7.0.0"));
        assert_eq!(map.get("sphinx"), Some(">=7.0"));
    }

    #[test]
    fn test_pyproject_metadata_sections_excluded() {
        let parser = PythonParser::new();
        let content = r#"
[project]
name = "myproject"
dependencies = ["flask>=2.0"]

[project.urls]
homepage = "https://example.com"
repository = "https://example.com/repo"

[build-system]
requires = ["setuptools"]
"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 1);
        assert!(!map.contains("homepage"));
        assert!(!map.contains("repository"));
        assert!(!map.contains("requires"));
    }

    #[test]
    fn test_pyproject_legacy_key_value() {
        let parser = PythonParser::new();
        let content = r#"
[tool.poetry.dependencies]
python = "^3.9"
flask = "^2.0.0"
requests = { version = "^2.25.0", optional = true }
"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 2);
        assert!(!map.contains("python"));
        assert_eq!(map.get("flask"), Some("^2.0.0"));
        assert_eq!(map.get("requests"), Some("^2.25.0"));
    }

    #[test]
    fn test_pyproject_first_seen_wins() {
        let parser = PythonParser::new();
        let content = r#"
[project]
dependencies = ["flask>=2.0"]

[tool.poetry.dependencies]
flask = "^1.0"
"#;
        let map = parser.parse(content);
        assert_eq!(map.get("flask"), Some(">=2.0"));
    }

    #[test]
    fn test_requirements_with_project_extra_not_toml() {
        // Packages with [project] as extras must not trigger TOML parsing
        let parser = PythonParser::new();
        let content = "mypkg[project]==1.2.0\nflask>=2.0.0\n";
        let map = parser.parse(content);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("mypkg"), Some("==1.2.0"));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let parser = PythonParser::new();
        let content = "flask==2.0.0\n???bad line???\nrequests>=2.25.0\n";
        let map = parser.parse(content);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_empty_file() {
        let parser = PythonParser::new();
        assert!(parser.parse("").is_empty());
    }
}
