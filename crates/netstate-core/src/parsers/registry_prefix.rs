//! Registry prefix-filter parser.
//!
//! Input is the JSON filter document produced by the registry prefix-list
//! generator:
//!
//! ```json
//! { "filter": [ { "prefix": "192.0.2.0/24", "exact": true } ] }
//! ```
//!
//! `prefix` may carry its length inline or in a separate `prefix_length`
//! field (read in the bit space of the address as written). An entry with
//! neither is a host prefix.

use crate::address::{canonicalize_prefix, parse_prefix, CanonicalPrefix};
use crate::compare::{compare_prefixes, ToValue, Value};
use crate::diff::engine::MergeKey;
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Deserialize)]
struct FilterDocument {
    filter: Vec<FilterEntry>,
}

#[derive(Debug, Deserialize)]
struct FilterEntry {
    prefix: String,
    #[serde(default)]
    prefix_length: Option<i64>,
}

impl FilterEntry {
    fn canonical(&self) -> Result<CanonicalPrefix> {
        match self.prefix_length {
            Some(length) if !self.prefix.contains('/') => canonicalize_prefix(&self.prefix, length),
            _ => parse_prefix(&self.prefix),
        }
    }
}

/// A prefix listed in a registry filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RegistryPrefix {
    pub prefix: CanonicalPrefix,
}

impl MergeKey for RegistryPrefix {
    fn merge_cmp(&self, other: &Self) -> Ordering {
        compare_prefixes(Some(&self.prefix), Some(&other.prefix))
    }
}

impl ToValue for RegistryPrefix {
    fn to_value(&self) -> Value {
        self.prefix.to_value()
    }
}

/// Parse a registry filter document into prefixes sorted by address, then length.
///
/// Undecodable JSON, a missing `filter` array, or any entry that does not
/// canonicalize yields an empty sequence.
pub fn parse_registry_prefixes(text: &str) -> Vec<RegistryPrefix> {
    let document: FilterDocument = match serde_json::from_str(text) {
        Ok(document) => document,
        Err(err) => {
            tracing::debug!(
                component = module_path!(),
                op = "parse_registry_prefixes",
                error = %err,
                "registry filter is not a decodable filter document"
            );
            return Vec::new();
        }
    };

    let entries: Result<Vec<RegistryPrefix>> = document
        .filter
        .iter()
        .map(|entry| entry.canonical().map(|prefix| RegistryPrefix { prefix }))
        .collect();

    match entries {
        Ok(mut prefixes) => {
            prefixes.sort_by(MergeKey::merge_cmp);
            prefixes
        }
        Err(err) => {
            tracing::debug!(
                component = module_path!(),
                op = "parse_registry_prefixes",
                error = %err,
                "registry filter degraded to empty"
            );
            Vec::new()
        }
    }
}
