//! Routing-daemon route dump parser.
//!
//! The dump starts with the daemon's ready banner, followed by blocks of the
//! form
//!
//! ```text
//! 10.0.0.0/24        via 192.0.2.1 on eth0 [bgp1 12:00:01] * (100) [AS64501i]
//!         Type: BGP unicast univ
//!         BGP.as_path: 64501
//!         BGP.next_hop: 192.0.2.1
//!         BGP.local_pref: 100
//! ```
//!
//! Scanning is a two-state machine (no record / accumulating a record) with
//! one transition per line and a flush at end of input.

use crate::address::{canonicalize, parse_prefix, CanonicalAddress, CanonicalPrefix};
use crate::compare::{compare_prefixes, ToValue, Value, PREFIX_KEY, PREFIX_LENGTH_KEY};
use crate::diff::engine::MergeKey;
use crate::errors::Result;
use crate::parsers::content_lines;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// First line the route daemon prints once it is ready to answer.
pub const ROUTE_READY_BANNER: &str = "BIRD 1.5.0 ready.";

fn route_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^([0-9a-f.:]+/[0-9]+) +(via +([0-9a-f.:]+) +on +([0-9a-z._:-]+) \[([0-9a-z_]+) .*\])?",
        )
        .expect("route header regex must compile")
    })
}

fn route_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s+([0-9a-z._]+): +(.+)$").expect("route attribute regex must compile")
    })
}

/// Typed value of a route attribute line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Tokens(Vec<String>),
    AsPath(Vec<u32>),
    Address(CanonicalAddress),
    Integer(i64),
    Text(String),
}

impl ToValue for AttrValue {
    fn to_value(&self) -> Value {
        match self {
            AttrValue::Tokens(tokens) => tokens.to_value(),
            AttrValue::AsPath(path) => Value::Sequence(
                path.iter()
                    .map(|asn| Value::integer(i64::from(*asn)))
                    .collect(),
            ),
            AttrValue::Address(addr) => addr.to_value(),
            AttrValue::Integer(i) => Value::integer(*i),
            AttrValue::Text(s) => Value::text(s.as_str()),
        }
    }
}

type Coercion = fn(&str) -> Option<AttrValue>;

/// Attribute key (lowercased) to its coercion. Keys not listed stay text.
const ATTRIBUTE_COERCIONS: &[(&str, Coercion)] = &[
    ("type", coerce_tokens),
    ("bgp.as_path", coerce_as_path),
    ("bgp.next_hop", coerce_next_hop),
    ("bgp.local_pref", coerce_integer),
];

fn coerce_tokens(raw: &str) -> Option<AttrValue> {
    Some(AttrValue::Tokens(
        raw.split_whitespace().map(str::to_string).collect(),
    ))
}

fn coerce_as_path(raw: &str) -> Option<AttrValue> {
    raw.split_whitespace()
        .map(|asn| asn.parse::<u32>().ok())
        .collect::<Option<Vec<u32>>>()
        .map(AttrValue::AsPath)
}

// The daemon may print a global and a link-local next hop; the first one counts.
fn coerce_next_hop(raw: &str) -> Option<AttrValue> {
    let first = raw.split_whitespace().next()?;
    canonicalize(first).ok().map(AttrValue::Address)
}

fn coerce_integer(raw: &str) -> Option<AttrValue> {
    raw.trim().parse::<i64>().ok().map(AttrValue::Integer)
}

/// Coerce a raw attribute value by key; a failed coercion keeps the raw text.
pub fn coerce_attribute(key: &str, raw: &str) -> AttrValue {
    let key = key.to_ascii_lowercase();
    ATTRIBUTE_COERCIONS
        .iter()
        .find(|(name, _)| *name == key)
        .and_then(|(_, coerce)| coerce(raw))
        .unwrap_or_else(|| AttrValue::Text(raw.to_string()))
}

/// One route from the dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    pub prefix: CanonicalPrefix,
    pub next_hop: Option<CanonicalAddress>,
    pub next_hop_intf: Option<String>,
    pub proto: Option<String>,
    /// Attribute lines, keyed by lowercased attribute name
    pub attributes: BTreeMap<String, AttrValue>,
}

impl RouteRecord {
    pub fn new(prefix: CanonicalPrefix) -> Self {
        Self {
            prefix,
            next_hop: None,
            next_hop_intf: None,
            proto: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// The `bgp.as_path` attribute, when present and numeric.
    pub fn as_path(&self) -> Option<&[u32]> {
        match self.attributes.get("bgp.as_path") {
            Some(AttrValue::AsPath(path)) => Some(path),
            _ => None,
        }
    }

    fn from_header(line: &str) -> Result<Option<Self>> {
        let Some(caps) = route_header_re().captures(line) else {
            return Ok(None);
        };

        let mut record = RouteRecord::new(parse_prefix(&caps[1])?);
        if let Some(next_hop) = caps.get(3) {
            record.next_hop = Some(canonicalize(next_hop.as_str())?);
        }
        record.next_hop_intf = caps.get(4).map(|m| m.as_str().to_string());
        record.proto = caps.get(5).map(|m| m.as_str().to_string());
        Ok(Some(record))
    }
}

impl MergeKey for RouteRecord {
    fn merge_cmp(&self, other: &Self) -> Ordering {
        compare_prefixes(Some(&self.prefix), Some(&other.prefix))
    }
}

impl ToValue for RouteRecord {
    fn to_value(&self) -> Value {
        let mut map = BTreeMap::new();
        map.insert(PREFIX_KEY.to_string(), self.prefix.address().to_value());
        map.insert(
            PREFIX_LENGTH_KEY.to_string(),
            Value::integer(i64::from(self.prefix.length())),
        );
        map.insert(
            "next_hop".to_string(),
            self.next_hop.as_ref().map(ToValue::to_value).into(),
        );
        map.insert("next_hop_intf".to_string(), self.next_hop_intf.clone().into());
        map.insert("proto".to_string(), self.proto.clone().into());
        for (key, value) in &self.attributes {
            map.insert(key.clone(), value.to_value());
        }
        Value::Mapping(map)
    }
}

/// Route scanner state.
#[derive(Debug)]
enum RouteScan {
    NoActiveRecord,
    Accumulating(RouteRecord),
}

impl RouteScan {
    /// Consume one line; returns the next state and a completed record, if any.
    fn step(self, line: &str) -> Result<(RouteScan, Option<RouteRecord>)> {
        if let Some(record) = RouteRecord::from_header(line)? {
            let flushed = match self {
                RouteScan::Accumulating(done) => Some(done),
                RouteScan::NoActiveRecord => None,
            };
            return Ok((RouteScan::Accumulating(record), flushed));
        }

        match self {
            RouteScan::NoActiveRecord => Ok((RouteScan::NoActiveRecord, None)),
            RouteScan::Accumulating(mut record) => {
                if let Some(caps) = route_attr_re().captures(line) {
                    let key = caps[1].to_ascii_lowercase();
                    let value = coerce_attribute(&key, &caps[2]);
                    record.attributes.insert(key, value);
                }
                Ok((RouteScan::Accumulating(record), None))
            }
        }
    }

    fn finish(self) -> Option<RouteRecord> {
        match self {
            RouteScan::Accumulating(record) => Some(record),
            RouteScan::NoActiveRecord => None,
        }
    }
}

/// Parse a route dump into records sorted by prefix.
///
/// A dump whose first non-blank line is not [`ROUTE_READY_BANNER`] means the
/// daemon is not ready (or nothing arrived yet) and yields no routes. A header
/// line with an invalid prefix or next hop degrades the whole dump to empty.
pub fn parse_routes(text: &str) -> Vec<RouteRecord> {
    let mut lines = content_lines(text).map(str::trim_end);

    if lines.next() != Some(ROUTE_READY_BANNER) {
        tracing::debug!(
            component = module_path!(),
            op = "parse_routes",
            "route dump does not start with the ready banner"
        );
        return Vec::new();
    }

    let mut routes = Vec::new();
    let mut scan = RouteScan::NoActiveRecord;
    for line in lines {
        match scan.step(line) {
            Ok((next, flushed)) => {
                routes.extend(flushed);
                scan = next;
            }
            Err(err) => {
                tracing::debug!(
                    component = module_path!(),
                    op = "parse_routes",
                    line,
                    error = %err,
                    "route dump degraded to empty"
                );
                return Vec::new();
            }
        }
    }
    routes.extend(scan.finish());

    routes.sort_by(MergeKey::merge_cmp);
    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion_table_types() {
        assert_eq!(
            coerce_attribute("Type", "BGP unicast univ"),
            AttrValue::Tokens(vec!["BGP".into(), "unicast".into(), "univ".into()])
        );
        assert_eq!(
            coerce_attribute("bgp.as_path", "64501 64502"),
            AttrValue::AsPath(vec![64501, 64502])
        );
        assert_eq!(
            coerce_attribute("bgp.local_pref", "100"),
            AttrValue::Integer(100)
        );
        assert_eq!(
            coerce_attribute("bgp.origin", "IGP"),
            AttrValue::Text("IGP".into())
        );
    }

    #[test]
    fn test_next_hop_keeps_first_address() {
        let value = coerce_attribute("bgp.next_hop", "2001:db8::1 fe80::1");
        assert_eq!(
            value,
            AttrValue::Address(canonicalize("2001:db8::1").unwrap())
        );
    }

    #[test]
    fn test_failed_coercion_keeps_text() {
        assert_eq!(
            coerce_attribute("bgp.as_path", "64501 {64502}"),
            AttrValue::Text("64501 {64502}".into())
        );
    }

    #[test]
    fn test_scan_flushes_on_new_header() {
        let scan = RouteScan::NoActiveRecord;
        let (scan, flushed) = scan.step("10.0.0.0/24 via 192.0.2.1 on eth0 [bgp1 12:00] * (100)").unwrap();
        assert!(flushed.is_none());
        let (scan, flushed) = scan.step("\tBGP.local_pref: 100").unwrap();
        assert!(flushed.is_none());
        let (scan, flushed) = scan.step("10.0.1.0/24 via 192.0.2.1 on eth0 [bgp1 12:00] * (100)").unwrap();
        let first = flushed.expect("first route flushed");
        assert_eq!(first.attribute("bgp.local_pref"), Some(&AttrValue::Integer(100)));
        assert_eq!(scan.finish().map(|r| r.prefix.to_string()), Some("10.0.1.0/24".into()));
    }

    #[test]
    fn test_attribute_before_any_header_is_ignored() {
        let (scan, flushed) = RouteScan::NoActiveRecord.step("\tType: BGP").unwrap();
        assert!(flushed.is_none());
        assert!(scan.finish().is_none());
    }
}
