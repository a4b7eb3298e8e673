//! State categories tracked per lab node and the parser each one uses.

use crate::compare::{ToValue, Value};
use crate::errors::NetStateError;
use crate::parsers::{
    parse_registry_neighbors, parse_registry_prefixes, parse_routes, parse_traffic,
    NeighborPolicies, RegistryPrefix, RouteRecord, TrafficPair,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One kind of state a node reports and a goal declares.
///
/// The serialized form is the section name used in device reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StateCategory {
    #[serde(rename = "Routes IPv4")]
    RoutesIpv4,
    #[serde(rename = "Routes IPv6")]
    RoutesIpv6,
    #[serde(rename = "Received traffic")]
    ReceivedTraffic,
    #[serde(rename = "NEIGHBORS")]
    Neighbors,
    #[serde(rename = "ASN IPv4")]
    AsnIpv4,
    #[serde(rename = "ASN IPv6")]
    AsnIpv6,
    #[serde(rename = "AS-SET IPv4")]
    AsSetIpv4,
    #[serde(rename = "AS-SET IPv6")]
    AsSetIpv6,
}

/// Where a category's observed text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRole {
    /// Reported by a monitor node (routing daemon, packet capture)
    Monitor,
    /// Generated from the routing registry
    Registry,
}

impl StateCategory {
    pub const ALL: [StateCategory; 8] = [
        StateCategory::RoutesIpv4,
        StateCategory::RoutesIpv6,
        StateCategory::ReceivedTraffic,
        StateCategory::Neighbors,
        StateCategory::AsnIpv4,
        StateCategory::AsnIpv6,
        StateCategory::AsSetIpv4,
        StateCategory::AsSetIpv6,
    ];

    /// Section name as it appears in device reports.
    pub fn section_name(&self) -> &'static str {
        match self {
            StateCategory::RoutesIpv4 => "Routes IPv4",
            StateCategory::RoutesIpv6 => "Routes IPv6",
            StateCategory::ReceivedTraffic => "Received traffic",
            StateCategory::Neighbors => "NEIGHBORS",
            StateCategory::AsnIpv4 => "ASN IPv4",
            StateCategory::AsnIpv6 => "ASN IPv6",
            StateCategory::AsSetIpv4 => "AS-SET IPv4",
            StateCategory::AsSetIpv6 => "AS-SET IPv6",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StateCategory::RoutesIpv4 => "IPv4 routes",
            StateCategory::RoutesIpv6 => "IPv6 routes",
            StateCategory::ReceivedTraffic => "Received traffic",
            StateCategory::Neighbors => "Import/export",
            StateCategory::AsnIpv4 => "IPv4 from ASN",
            StateCategory::AsnIpv6 => "IPv6 from ASN",
            StateCategory::AsSetIpv4 => "IPv4 from AS-SET",
            StateCategory::AsSetIpv6 => "IPv6 from AS-SET",
        }
    }

    pub fn role(&self) -> CategoryRole {
        match self {
            StateCategory::RoutesIpv4
            | StateCategory::RoutesIpv6
            | StateCategory::ReceivedTraffic => CategoryRole::Monitor,
            _ => CategoryRole::Registry,
        }
    }
}

impl fmt::Display for StateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_name())
    }
}

impl FromStr for StateCategory {
    type Err = NetStateError;

    /// Exact section name; case and spacing matter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateCategory::ALL
            .into_iter()
            .find(|category| category.section_name() == s)
            .ok_or_else(|| NetStateError::InvalidInput {
                reason: format!("unknown state category '{s}'"),
            })
    }
}

/// Canonical records of one side of a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "records", rename_all = "snake_case")]
pub enum ParsedState {
    Traffic(Vec<TrafficPair>),
    Routes(Vec<RouteRecord>),
    Prefixes(Vec<RegistryPrefix>),
    Neighbors(NeighborPolicies),
}

impl ParsedState {
    /// True when the parser produced no records.
    pub fn is_empty(&self) -> bool {
        match self {
            ParsedState::Traffic(pairs) => pairs.is_empty(),
            ParsedState::Routes(routes) => routes.is_empty(),
            ParsedState::Prefixes(prefixes) => prefixes.is_empty(),
            ParsedState::Neighbors(neighbors) => neighbors.is_empty(),
        }
    }
}

impl ToValue for ParsedState {
    fn to_value(&self) -> Value {
        match self {
            ParsedState::Traffic(pairs) => pairs.to_value(),
            ParsedState::Routes(routes) => routes.to_value(),
            ParsedState::Prefixes(prefixes) => prefixes.to_value(),
            ParsedState::Neighbors(neighbors) => neighbors.to_value(),
        }
    }
}

/// Run the parser the category calls for.
pub fn parse_state(category: StateCategory, text: &str) -> ParsedState {
    match category {
        StateCategory::RoutesIpv4 | StateCategory::RoutesIpv6 => {
            ParsedState::Routes(parse_routes(text))
        }
        StateCategory::ReceivedTraffic => ParsedState::Traffic(parse_traffic(text)),
        StateCategory::Neighbors => ParsedState::Neighbors(parse_registry_neighbors(text)),
        StateCategory::AsnIpv4
        | StateCategory::AsnIpv6
        | StateCategory::AsSetIpv4
        | StateCategory::AsSetIpv6 => ParsedState::Prefixes(parse_registry_prefixes(text)),
    }
}
