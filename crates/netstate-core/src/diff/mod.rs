//! Goal/observed diff engine.
//!
//! Compares the canonical records parsed from a goal block with those parsed
//! from an observed block and classifies every record as matched, missing
//! from the observed side, or unexpected in it.
//!
//! ## Entry points
//!
//! ```ignore
//! use netstate_core::diff::engine::merge_diff;
//! use netstate_core::parsers::parse_routes;
//!
//! let diff = merge_diff(&parse_routes(goal_text), &parse_routes(observed_text));
//! let all_good = diff.passed;
//! ```
//!
//! ## Guarantees
//!
//! - **Linear**: record lists are merged in one forward pass, O(n + m).
//! - **Order preserving**: rows come out in the global sort order of both inputs.
//! - **Explicit emptiness**: two empty inputs yield a single
//!   [`DiffRow::NothingExpected`] row, never an empty row list.
//! - **Neighbor policies** are compared per neighbor with the structural
//!   comparator; rules inside a policy are not classified individually.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{diff_neighbors, merge_diff, MergeKey};
pub use human_summary::{render_category_summary, render_human_summary};
pub use model::{CategoryDiff, DiffRow, MergeDiff, NeighborDiff, NeighborRow};
