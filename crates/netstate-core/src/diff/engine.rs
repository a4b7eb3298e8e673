//! Merge-join diff computation.
//!
//! The core entry point is [`merge_diff`], which walks two sorted record
//! sequences in lockstep. [`diff_neighbors`] handles neighbor policies, which
//! are keyed mappings rather than sorted lists.

use crate::compare::{values_match, ToValue};
use crate::diff::model::{DiffRow, MergeDiff, NeighborDiff, NeighborRow};
use crate::parsers::{NeighborPolicies, NeighborPolicy};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Sort key used by the merge-join.
///
/// Must agree with the order the parsers sort their output in.
pub trait MergeKey {
    fn merge_cmp(&self, other: &Self) -> Ordering;
}

/// Order the heads of both cursors; an exhausted side sorts last.
fn compare_heads<R: MergeKey>(goal: Option<&R>, observed: Option<&R>) -> Ordering {
    match (goal, observed) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(g), Some(o)) => g.merge_cmp(o),
    }
}

/// Classify every record of two sorted sequences.
///
/// Both inputs must already be sorted by [`MergeKey`]; parser output always
/// is. Equal heads match and advance both cursors; otherwise the smaller head
/// is emitted as missing (goal side) or unexpected (observed side) and only
/// its cursor advances. Two empty inputs produce a single
/// [`DiffRow::NothingExpected`] row.
pub fn merge_diff<R: MergeKey + Clone>(goal: &[R], observed: &[R]) -> MergeDiff<R> {
    let mut rows = Vec::with_capacity(goal.len().max(observed.len()));
    let (mut gi, mut oi) = (0, 0);

    loop {
        let g = goal.get(gi);
        let o = observed.get(oi);
        if g.is_none() && o.is_none() {
            break;
        }

        match (compare_heads(g, o), g, o) {
            (Ordering::Equal, Some(g), Some(o)) => {
                rows.push(DiffRow::Matched {
                    goal: g.clone(),
                    observed: o.clone(),
                });
                gi += 1;
                oi += 1;
            }
            (Ordering::Less, Some(g), _) => {
                rows.push(DiffRow::MissingFromObserved { goal: g.clone() });
                gi += 1;
            }
            (_, _, Some(o)) => {
                rows.push(DiffRow::UnexpectedInObserved {
                    observed: o.clone(),
                });
                oi += 1;
            }
            // Only reachable with both heads absent, handled above
            (_, _, None) => break,
        }
    }

    if rows.is_empty() {
        rows.push(DiffRow::NothingExpected);
    }
    let passed = rows.iter().all(DiffRow::is_pass);

    MergeDiff { rows, passed }
}

/// Compare neighbor policies neighbor by neighbor.
///
/// Every AS-id present on either side gets one row, in sorted order; a side
/// that does not mention the neighbor counts as an empty policy. A row passes
/// when both policies are equal under the structural comparator.
pub fn diff_neighbors(goal: &NeighborPolicies, observed: &NeighborPolicies) -> NeighborDiff {
    let neighbors: BTreeSet<&String> = goal.keys().chain(observed.keys()).collect();
    let empty = NeighborPolicy::default();

    let rows: Vec<NeighborRow> = neighbors
        .into_iter()
        .map(|neighbor| {
            let g = goal.get(neighbor).unwrap_or(&empty);
            let o = observed.get(neighbor).unwrap_or(&empty);
            let matched = values_match(&g.to_value(), &o.to_value());
            debug_assert!(
                matched.is_ok(),
                "neighbor policies share one lowering: {matched:?}"
            );
            let passed = matched.unwrap_or(false);
            NeighborRow {
                neighbor: neighbor.clone(),
                goal: g.clone(),
                observed: o.clone(),
                passed,
            }
        })
        .collect();

    NeighborDiff {
        nothing_expected: rows.is_empty(),
        passed: rows.iter().all(|row| row.passed),
        rows,
    }
}
