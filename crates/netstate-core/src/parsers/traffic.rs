//! Received-traffic parser (`SRC=<addr> DST=<addr>` packet summaries).

use crate::address::{canonicalize, CanonicalAddress};
use crate::compare::{ToValue, Value};
use crate::diff::engine::MergeKey;
use crate::parsers::content_lines;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn traffic_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^SRC=([0-9a-f.:]+) +DST=([0-9a-f.:]+)$")
            .expect("traffic regex must compile")
    })
}

/// One observed (or expected) source/destination flow.
///
/// The derived order is the order of [`TrafficPair::join_key`]: canonical
/// address text is fixed-width, so comparing the addresses field by field
/// and comparing the joined text agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TrafficPair {
    pub source: CanonicalAddress,
    pub destination: CanonicalAddress,
}

impl TrafficPair {
    pub fn new(source: CanonicalAddress, destination: CanonicalAddress) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// `<source canonical text>-<destination canonical text>`
    pub fn join_key(&self) -> String {
        format!(
            "{}-{}",
            self.source.canonical_text(),
            self.destination.canonical_text()
        )
    }
}

impl MergeKey for TrafficPair {
    fn merge_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl ToValue for TrafficPair {
    fn to_value(&self) -> Value {
        Value::Sequence(vec![self.source.to_value(), self.destination.to_value()])
    }
}

/// Parse packet-capture summary lines into sorted, distinct traffic pairs.
///
/// Lines that do not have the `SRC=.. DST=..` shape, or whose addresses do
/// not canonicalize, are skipped.
pub fn parse_traffic(text: &str) -> Vec<TrafficPair> {
    let mut pairs = BTreeSet::new();

    for line in content_lines(text) {
        let Some(caps) = traffic_line_re().captures(line.trim()) else {
            continue;
        };
        match (canonicalize(&caps[1]), canonicalize(&caps[2])) {
            (Ok(source), Ok(destination)) => {
                pairs.insert(TrafficPair::new(source, destination));
            }
            (Err(err), _) | (_, Err(err)) => {
                tracing::debug!(
                    component = module_path!(),
                    op = "parse_traffic",
                    line = line.trim(),
                    error = %err,
                    "skipping traffic line with unparseable address"
                );
            }
        }
    }

    pairs.into_iter().collect()
}
