//! Diff output types.
//!
//! All types implement `Debug, Clone, Serialize, PartialEq`.
//! Rows are kept in merge order; neighbor rows in sorted AS-id order.

use crate::parsers::{NeighborPolicy, RegistryPrefix, RouteRecord, TrafficPair};
use serde::Serialize;

/// One classified row of a merge diff.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffRow<R> {
    /// Present on both sides
    Matched { goal: R, observed: R },
    /// Declared in the goal, not observed
    MissingFromObserved { goal: R },
    /// Observed, not declared in the goal
    UnexpectedInObserved { observed: R },
    /// Both sides empty: nothing expected and nothing present
    NothingExpected,
}

impl<R> DiffRow<R> {
    /// Matched rows and the nothing-expected confirmation pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, DiffRow::Matched { .. } | DiffRow::NothingExpected)
    }
}

/// Result of merging a sorted goal sequence with a sorted observed sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeDiff<R> {
    /// Rows in merge order; never empty
    pub rows: Vec<DiffRow<R>>,
    /// True iff every row passes
    pub passed: bool,
}

impl<R> MergeDiff<R> {
    /// True when both sides were empty.
    pub fn is_nothing_expected(&self) -> bool {
        matches!(self.rows.as_slice(), [DiffRow::NothingExpected])
    }

    pub fn matched(&self) -> impl Iterator<Item = (&R, &R)> {
        self.rows.iter().filter_map(|row| match row {
            DiffRow::Matched { goal, observed } => Some((goal, observed)),
            _ => None,
        })
    }

    pub fn missing(&self) -> impl Iterator<Item = &R> {
        self.rows.iter().filter_map(|row| match row {
            DiffRow::MissingFromObserved { goal } => Some(goal),
            _ => None,
        })
    }

    pub fn unexpected(&self) -> impl Iterator<Item = &R> {
        self.rows.iter().filter_map(|row| match row {
            DiffRow::UnexpectedInObserved { observed } => Some(observed),
            _ => None,
        })
    }
}

/// Per-neighbor policy comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborRow {
    /// Neighbor AS-id
    pub neighbor: String,
    /// Goal policy (empty when the goal does not mention the neighbor)
    pub goal: NeighborPolicy,
    /// Observed policy (empty when the registry does not mention the neighbor)
    pub observed: NeighborPolicy,
    pub passed: bool,
}

/// Result of comparing goal and observed neighbor policies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborDiff {
    /// One row per neighbor on either side, sorted by AS-id
    pub rows: Vec<NeighborRow>,
    /// True when neither side declares any neighbor
    pub nothing_expected: bool,
    /// True iff every neighbor row passes
    pub passed: bool,
}

/// Diff of one state category, by record kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "diff", rename_all = "snake_case")]
pub enum CategoryDiff {
    Traffic(MergeDiff<TrafficPair>),
    Routes(MergeDiff<RouteRecord>),
    Prefixes(MergeDiff<RegistryPrefix>),
    Neighbors(NeighborDiff),
}

impl CategoryDiff {
    pub fn passed(&self) -> bool {
        match self {
            CategoryDiff::Traffic(diff) => diff.passed,
            CategoryDiff::Routes(diff) => diff.passed,
            CategoryDiff::Prefixes(diff) => diff.passed,
            CategoryDiff::Neighbors(diff) => diff.passed,
        }
    }

    /// Number of rows, counting the nothing-expected confirmation as one.
    pub fn row_count(&self) -> usize {
        match self {
            CategoryDiff::Traffic(diff) => diff.rows.len(),
            CategoryDiff::Routes(diff) => diff.rows.len(),
            CategoryDiff::Prefixes(diff) => diff.rows.len(),
            CategoryDiff::Neighbors(diff) => diff.rows.len().max(1),
        }
    }
}
