//! Registry neighbor-policy parser (`mp-import` / `mp-export` statements).

use crate::compare::{ToValue, Value};
use crate::parsers::content_lines;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn import_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^mp-import:\s+from\s+(AS[0-9]+)\s+accept\s+(.*?)\s*$")
            .expect("mp-import regex must compile")
    })
}

fn export_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^mp-export:\s+to\s+(AS[0-9]+)\s+announce\s+(.*?)\s*$")
            .expect("mp-export regex must compile")
    })
}

/// Import and export rules declared towards one neighbor, in statement order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NeighborPolicy {
    pub import: Vec<String>,
    pub export: Vec<String>,
}

impl ToValue for NeighborPolicy {
    fn to_value(&self) -> Value {
        Value::mapping([
            ("import", self.import.to_value()),
            ("export", self.export.to_value()),
        ])
    }
}

/// Policies keyed by neighbor AS-id (uppercase, e.g. `AS64500`).
pub type NeighborPolicies = BTreeMap<String, NeighborPolicy>;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Import,
    Export,
}

fn match_statement(line: &str) -> Option<(Direction, String, String)> {
    let (direction, caps) = if let Some(caps) = import_line_re().captures(line) {
        (Direction::Import, caps)
    } else {
        (Direction::Export, export_line_re().captures(line)?)
    };
    Some((direction, caps[1].to_ascii_uppercase(), caps[2].to_string()))
}

/// Collect `mp-import: from <AS> accept <expr>` and
/// `mp-export: to <AS> announce <expr>` statements per neighbor.
///
/// Keywords are case-insensitive; any other line is ignored.
pub fn parse_registry_neighbors(text: &str) -> NeighborPolicies {
    let mut neighbors = NeighborPolicies::new();

    for line in content_lines(text) {
        let Some((direction, neighbor, expression)) = match_statement(line.trim()) else {
            continue;
        };
        let policy = neighbors.entry(neighbor).or_default();
        match direction {
            Direction::Import => policy.import.push(expression),
            Direction::Export => policy.export.push(expression),
        }
    }

    neighbors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_accumulate_in_order() {
        let neighbors = parse_registry_neighbors(
            "mp-import: from AS64500 accept ANY\n\
             mp-import: from AS64500 accept AS64500:AS-ALL\n",
        );
        assert_eq!(neighbors["AS64500"].import, vec!["ANY", "AS64500:AS-ALL"]);
        assert!(neighbors["AS64500"].export.is_empty());
    }

    #[test]
    fn test_plain_import_lines_are_ignored() {
        let neighbors = parse_registry_neighbors("import: from AS64500 accept ANY\n");
        assert!(neighbors.is_empty());
    }

    #[test]
    fn test_neighbor_key_is_uppercased() {
        let neighbors = parse_registry_neighbors("MP-EXPORT: to as64501 ANNOUNCE AS64500   \n");
        assert_eq!(neighbors["AS64501"].export, vec!["AS64500"]);
    }
}
