//! Domain parsers.
//!
//! Each parser turns one raw text block into a sorted sequence of canonical
//! records. Device output is best effort and may be truncated or mid-update,
//! so parsers never fail: a block that does not have the expected structure
//! yields an empty result (and a debug event saying why).

pub mod registry_neighbor;
pub mod registry_prefix;
pub mod route;
pub mod traffic;

pub use registry_neighbor::{parse_registry_neighbors, NeighborPolicies, NeighborPolicy};
pub use registry_prefix::{parse_registry_prefixes, RegistryPrefix};
pub use route::{coerce_attribute, parse_routes, AttrValue, RouteRecord, ROUTE_READY_BANNER};
pub use traffic::{parse_traffic, TrafficPair};

/// Non-blank lines of a block, splitting on `\r\n`, `\r` or `\n`.
pub(crate) fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\r', '\n']).filter(|line| !line.trim().is_empty())
}
