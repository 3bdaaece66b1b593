//! Parser for package.json files

use super::{DependencyMap, Parser};

/// Parser for npm package.json manifests.
///
/// Collects the union of the `dependencies` and `devDependencies`
/// objects. Missing sections default to empty. `peerDependencies` and
/// `optionalDependencies` are not consumed.
#[derive(Debug, Default)]
pub struct NpmParser;

impl NpmParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for NpmParser {
    fn parse(&self, content: &str) -> DependencyMap {
        let mut map = DependencyMap::new();

        // Track which section we're in
        let mut in_section = false;
        let mut pending_section = false;
        let mut section_brace_depth = 0;

        for line in content.lines() {
            let trimmed = line.trim();

            if pending_section {
                if trimmed.starts_with('{') {
                    pending_section = false;
                    in_section = true;
                    section_brace_depth = 1;
                }
                continue;
            }

            if in_section {
                // Track brace depth within the section
                for ch in trimmed.chars() {
                    match ch {
                        '{' => section_brace_depth += 1,
                        '}' => {
                            section_brace_depth -= 1;
                            if section_brace_depth == 0 {
                                in_section = false;
                            }
                        }
                        _ => {}
                    }
                }

                if let Some((name, version)) = parse_entry_line(line) {
                    map.insert(name, version);
                }
                continue;
            }

            // Look for section headers. A minified manifest can pack
            // several sections onto one line, so keep scanning past
            // each section that closes on the line it opened.
            let mut rest = trimmed;
            while let Some(key_end) = section_key_end(rest) {
                let after_key = &rest[key_end..];
                let Some(colon_pos) = after_key.find(':') else {
                    break;
                };
                let after_colon = &after_key[colon_pos + 1..];
                let Some(brace_pos) = after_colon.find('{') else {
                    // Opening brace is on a following line
                    pending_section = true;
                    break;
                };
                let body = &after_colon[brace_pos + 1..];
                match parse_inline_entries(body, &mut map) {
                    Some(consumed) => rest = &body[consumed..],
                    None => {
                        in_section = true;
                        section_brace_depth = 1;
                        break;
                    }
                }
            }
        }

        map
    }
}

/// Locate a consumed dependency section key on the line, returning the
/// offset just past its closing quote.
fn section_key_end(line: &str) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for key in ["\"dependencies\"", "\"devDependencies\""] {
        if let Some(pos) = line.find(key)
            && best.is_none_or(|(b, _)| pos < b)
        {
            best = Some((pos, pos + key.len()));
        }
    }
    best.map(|(_, end)| end)
}

/// Parse inline entries up to the section's closing brace. Returns the
/// offset just past that brace, or `None` when the section stays open
/// at the end of the line.
fn parse_inline_entries(body: &str, map: &mut DependencyMap) -> Option<usize> {
    let mut depth = 1;
    let mut in_string = false;

    for (i, ch) in body.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    parse_packed_pairs(&body[..i], map);
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    parse_packed_pairs(body, map);
    None
}

/// Parse `"name": "version"` pairs packed on a single line.
fn parse_packed_pairs(content: &str, map: &mut DependencyMap) {
    let mut remaining = content;

    while let Some(first_quote) = remaining.find('"') {
        let after_first = &remaining[first_quote + 1..];
        let Some(name_end) = after_first.find('"') else {
            break;
        };
        let name = &after_first[..name_end];

        if name.is_empty() {
            remaining = &after_first[name_end + 1..];
            continue;
        }

        let after_name = &after_first[name_end + 1..];
        let Some(colon_pos) = after_name.find(':') else {
            remaining = after_name;
            continue;
        };

        let after_colon = &after_name[colon_pos + 1..];
        let Some(version_quote) = after_colon.find('"') else {
            remaining = after_colon;
            continue;
        };

        let version_content = &after_colon[version_quote + 1..];
        let Some(version_end) = version_content.find('"') else {
            remaining = version_content;
            continue;
        };

        map.insert(name, &version_content[..version_end]);
        remaining = &version_content[version_end + 1..];
    }
}

/// Parse a `"package-name": "version"` line inside a section.
fn parse_entry_line(line: &str) -> Option<(&str, &str)> {
    let first_quote = line.find('"')?;
    let after_first = &line[first_quote + 1..];
    let name_end = after_first.find('"')?;
    let name = &after_first[..name_end];

    // Skip if it looks like a section header
    if name.ends_with("ependencies") || name.is_empty() {
        return None;
    }

    let after_name = &after_first[name_end + 1..];
    let colon_pos = after_name.find(':')?;
    let after_colon = &after_name[colon_pos + 1..];
    let version_quote = after_colon.find('"')?;
    let version_content = &after_colon[version_quote + 1..];
    let version_end = version_content.find('"')?;

    Some((name, &version_content[..version_end]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_dependencies() {
        let parser = NpmParser::new();
        let content = r#"{
  "name": "my-app",
  "dependencies": {
    "react": "^18.2.0",
    "lodash": "4.17.21"
  }
}"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("react"), Some("^18.2.0"));
        assert_eq!(map.get("lodash"), Some("4.17.21"));
    }

    #[test]
    fn test_union_of_prod_and_dev() {
        let parser = NpmParser::new();
        let content = r#"{
  "dependencies": {
    "express": "^4.18.0"
  },
  "devDependencies": {
    "typescript": "^5.0.0",
    "jest": "^29.0.0"
  }
}"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("express"), Some("^4.18.0"));
        assert_eq!(map.get("jest"), Some("^29.0.0"));
    }

    #[test]
    fn test_peer_dependencies_ignored() {
        let parser = NpmParser::new();
        let content = r#"{
  "dependencies": {
    "react": "^18.0.0"
  },
  "peerDependencies": {
    "react-dom": "^18.0.0"
  }
}"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 1);
        assert!(!map.contains("react-dom"));
    }

    #[test]
    fn test_scoped_packages() {
        let parser = NpmParser::new();
        let content = r#"{
  "devDependencies": {
    "@types/node": "^20.0.0",
    "@storybook/react": "^7.6.0"
  }
}"#;
        let map = parser.parse(content);
        assert_eq!(map.get("@types/node"), Some("^20.0.0"));
        assert_eq!(map.get("@storybook/react"), Some("^7.6.0"));
    }

    #[test]
    fn test_missing_sections() {
        let parser = NpmParser::new();
        let content = r#"{
  "name": "no-deps",
  "version": "1.0.0",
  "scripts": {
    "build": "tsc"
  }
}"#;
        let map = parser.parse(content);
        assert!(map.is_empty());
    }

    #[test]
    fn test_inline_format() {
        let parser = NpmParser::new();
        let content = r#"{"dependencies": {"pkg": "1.0.0"}}"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("pkg"), Some("1.0.0"));
    }

    #[test]
    fn test_script_values_not_consumed() {
        // Keys outside dependency sections must not leak in
        let parser = NpmParser::new();
        let content = r#"{
  "scripts": {
    "test": "jest"
  },
  "dependencies": {
    "vue": "^3.4.0"
  }
}"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 1);
        assert!(!map.contains("test"));
    }

    #[test]
    fn test_minified_section_after_scripts() {
        // A minified manifest must not leak keys from a preceding
        // non-dependency section
        let parser = NpmParser::new();
        let content = r#"{"scripts":{"build":"tsc"},"dependencies":{"react":"^18.2.0"}}"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("react"), Some("^18.2.0"));
        assert!(!map.contains("build"));
    }

    #[test]
    fn test_minified_multiple_sections() {
        let parser = NpmParser::new();
        let content = r#"{"dependencies":{"vue":"^3.4.0"},"devDependencies":{"vitest":"^1.2.0"},"scripts":{"test":"vitest run"}}"#;
        let map = parser.parse(content);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("vue"), Some("^3.4.0"));
        assert_eq!(map.get("vitest"), Some("^1.2.0"));
        assert!(!map.contains("test"));
    }

    #[test]
    fn test_empty_file() {
        let parser = NpmParser::new();
        assert!(parser.parse("").is_empty());
        assert!(parser.parse("{}").is_empty());
    }
}
