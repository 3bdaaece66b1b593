//! Parser for Ruby Gemfile files
//!
//! Supports `gem` declarations with an optional version constraint, in
//! both bare and parenthesized form. Lines without the `gem` keyword and
//! pure comments are ignored.

use super::{ANY_VERSION, DependencyMap, Parser};

/// Parser for Ruby Gemfile manifests.
#[derive(Debug, Default)]
pub struct RubyParser;

impl RubyParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for RubyParser {
    fn parse(&self, content: &str) -> DependencyMap {
        let mut map = DependencyMap::new();

        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some((name, version)) = parse_gem_declaration(trimmed) {
                map.insert(&name, &version);
            }
        }

        map
    }
}

/// Parse a `gem 'name'[, 'constraint'[, options]]` declaration.
fn parse_gem_declaration(line: &str) -> Option<(String, String)> {
    let after_gem = if let Some(rest) = line.strip_prefix("gem(") {
        rest.strip_suffix(')').unwrap_or(rest)
    } else if let Some(rest) = line.strip_prefix("gem ") {
        rest
    } else {
        return None;
    };

    let bytes = after_gem.as_bytes();

    // First argument: the gem name
    let (name, name_end) = parse_quoted_string(bytes, 0)?;
    if name.is_empty() {
        return None;
    }

    // Optional second argument: the version constraint
    let version = match second_argument(bytes, name_end) {
        Some(v) => v,
        None => ANY_VERSION.to_string(),
    };

    Some((name, version))
}

/// Parse the argument after the first comma, if it is a quoted version
/// constraint. Hash options (`git:`, `require:`, ...) are not versions.
fn second_argument(bytes: &[u8], from: usize) -> Option<String> {
    let len = bytes.len();
    let mut idx = from;

    while idx < len && bytes[idx] != b',' {
        idx += 1;
    }
    if idx >= len {
        return None;
    }
    idx += 1; // skip comma

    while idx < len && (bytes[idx] == b' ' || bytes[idx] == b'\t') {
        idx += 1;
    }
    if idx >= len {
        return None;
    }

    // Not a quoted string means a hash option like git: or path:
    if bytes[idx] != b'\'' && bytes[idx] != b'"' {
        return None;
    }

    let (version, _) = parse_quoted_string(bytes, idx)?;
    if version.is_empty() || version.contains(':') {
        return None;
    }
    Some(version)
}

/// Parse a quoted string starting at `start`, returning (string, end index).
fn parse_quoted_string(bytes: &[u8], start: usize) -> Option<(String, usize)> {
    let len = bytes.len();
    let mut idx = start;

    while idx < len && (bytes[idx] == b' ' || bytes[idx] == b'\t') {
        idx += 1;
    }
    if idx >= len {
        return None;
    }

    let quote = bytes[idx];
    if quote != b'\'' && quote != b'"' {
        return None;
    }
    idx += 1;

    let string_start = idx;
    while idx < len && bytes[idx] != quote {
        idx += 1;
    }
    if idx >= len {
        return None;
    }

    let s = std::str::from_utf8(&bytes[string_start..idx]).ok()?;
    Some((s.to_string(), idx + 1))
}
