//! Parser for Cargo.toml files

use super::{DependencyMap, Parser};

/// Parser for Rust Cargo.toml manifests.
///
/// Scoped to the top-level `[dependencies]` section. Values may be a bare
/// quoted version string or an inline table with a `version` key; inline
/// tables continued across multiple lines are joined before parsing.
/// Path/git dependencies without a version are skipped.
#[derive(Debug, Default)]
pub struct CargoParser;

impl CargoParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for CargoParser {
    fn parse(&self, content: &str) -> DependencyMap {
        let mut map = DependencyMap::new();
        let mut in_dependencies = false;
        // Accumulates a multi-line inline table until braces balance
        let mut pending: Option<String> = None;

        for line in content.lines() {
            let trimmed = strip_comment(line.trim()).trim_end();

            if let Some(mut joined) = pending.take() {
                // A section header before the closing brace means the
                // table was never terminated; drop it and let the
                // header line fall through to normal handling.
                if !is_section_header(trimmed) {
                    joined.push(' ');
                    joined.push_str(trimmed);
                    if brace_depth(&joined) <= 0 {
                        if let Some((name, version)) = parse_dependency_line(&joined) {
                            map.insert(&name, &version);
                        }
                    } else {
                        pending = Some(joined);
                    }
                    continue;
                }
            }

            // Section headers
            if trimmed.starts_with('[') {
                in_dependencies = section_name(trimmed) == Some("dependencies");
                continue;
            }

            if !in_dependencies || trimmed.is_empty() {
                continue;
            }

            // An inline table opened but not closed on this line: join
            // following lines until the matching '}' before re-parsing.
            if brace_depth(trimmed) > 0 {
                pending = Some(trimmed.to_string());
                continue;
            }

            if let Some((name, version)) = parse_dependency_line(trimmed) {
                map.insert(&name, &version);
            }
        }

        // An unterminated inline table at EOF is malformed; drop it.
        map
    }
}

/// Extract the section name from a `[section]` header line.
fn section_name(line: &str) -> Option<&str> {
    let end = line.find(']')?;
    Some(line[1..end].trim())
}

/// A `[section]` header line. Bracketed array fragments from a wrapped
/// inline table start with a quote or carry trailing table syntax, so
/// they do not count.
fn is_section_header(line: &str) -> bool {
    line.starts_with('[')
        && !line.starts_with("[\"")
        && !line.starts_with("['")
        && line.ends_with(']')
}

/// Remove a `#` comment that is not inside a quoted string.
fn strip_comment(line: &str) -> &str {
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

/// Net brace balance outside quoted strings.
fn brace_depth(line: &str) -> i32 {
    let mut depth = 0;
    let mut in_string = false;
    let mut quote = '"';
    for ch in line.chars() {
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
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
        }
    }
    depth
}

/// Parse a `name = <value>` dependency line.
fn parse_dependency_line(line: &str) -> Option<(String, String)> {
    let eq_pos = line.find('=')?;
    let name = line[..eq_pos].trim().trim_matches('"');
    if name.is_empty() {
        return None;
    }

    let value = line[eq_pos + 1..].trim();

    let version = if value.starts_with('{') {
        // Inline table: { version = "1.0", features = [...] }
        extract_table_version(value)?
    } else if value.starts_with('"') || value.starts_with('\'') {
        unquote(value)?
    } else {
        // Path or git dependency without a version
        return None;
    };

    Some((name.to_string(), version))
}

/// Find the `version` key inside an inline table and return its value.
fn extract_table_version(table: &str) -> Option<String> {
    let version_pos = table.find("version")?;
    let after_key = &table[version_pos + "version".len()..];
    let eq_pos = after_key.find('=')?;
    unquote(after_key[eq_pos + 1..].trim_start())
}

/// Extract the contents of a leading quoted string.
fn unquote(value: &str) -> Option<String> {
    let quote = value.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &value[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}
