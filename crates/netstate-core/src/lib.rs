//! netstate core - network-state normalization and goal/observed diff engine
//!
//! Turns loosely structured device and registry text into canonical,
//! order-independent records and classifies a declared goal against what a
//! node actually reports:
//! - address and prefix canonicalization (IPv4 kept in IPv4-mapped IPv6 space)
//! - parsers for received traffic, route dumps, registry prefix filters and
//!   registry neighbor policies, all degrading to empty on malformed input
//! - a structural comparator over semi-structured values
//! - a merge-join diff producing matched / missing / unexpected rows
//! - device report splitting and whole-node evaluation
//!
//! Everything here is synchronous and free of I/O.

pub mod address;
pub mod category;
pub mod compare;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod node;
pub mod parsers;
pub mod report;

#[doc(hidden)]
pub use netstate_core_types;

// Re-export commonly used types
pub use address::{canonicalize, canonicalize_prefix, parse_prefix, CanonicalAddress, CanonicalPrefix};
pub use category::{parse_state, ParsedState, StateCategory};
pub use compare::{compare, values_match, ToValue, Value};
pub use diff::{merge_diff, render_human_summary, CategoryDiff, DiffRow, MergeDiff};
pub use errors::{NetStateError, NsError, NsErrorKind, Result};
pub use node::{evaluate_category, evaluate_node, states_match, NodeEvaluation, NodeState};
pub use report::{split_report, DeviceReport};
