//! Goal/observed evaluation of a whole lab node.

use crate::category::{parse_state, StateCategory};
use crate::compare::{values_match, ToValue};
use crate::diff::{diff_neighbors, merge_diff, CategoryDiff};
use crate::errors::Result;
use crate::parsers::{
    parse_registry_neighbors, parse_registry_prefixes, parse_routes, parse_traffic,
};
use crate::report::DeviceReport;
use crate::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

/// Declared and observed text of one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GoalObserved {
    pub goal: String,
    pub observed: String,
}

/// Everything known about one node at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeState {
    pub node: Option<String>,
    pub categories: BTreeMap<StateCategory, GoalObserved>,
}

impl NodeState {
    /// Pair each goal with the report's text for the same category.
    ///
    /// A goal without an observed section is compared against empty text;
    /// observed sections nobody declared a goal for are ignored.
    pub fn from_goals_and_report(
        goals: &BTreeMap<StateCategory, String>,
        report: &DeviceReport,
    ) -> Self {
        let categories = goals
            .iter()
            .map(|(category, goal)| {
                let observed = report.observed(*category).unwrap_or_default();
                (
                    *category,
                    GoalObserved {
                        goal: goal.clone(),
                        observed: observed.to_string(),
                    },
                )
            })
            .collect();

        Self {
            node: report.uuid.clone(),
            categories,
        }
    }
}

/// Per-category diffs of a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeEvaluation {
    pub node: Option<String>,
    pub categories: BTreeMap<StateCategory, CategoryDiff>,
    /// True iff every category passes (vacuously true)
    pub passed: bool,
}

/// Parse both sides of a category and diff them.
pub fn evaluate_category(category: StateCategory, goal: &str, observed: &str) -> CategoryDiff {
    let start = Instant::now();
    log_op_start!("evaluate_category", category = category.section_name());

    let diff = match category {
        StateCategory::RoutesIpv4 | StateCategory::RoutesIpv6 => {
            CategoryDiff::Routes(merge_diff(&parse_routes(goal), &parse_routes(observed)))
        }
        StateCategory::ReceivedTraffic => {
            CategoryDiff::Traffic(merge_diff(&parse_traffic(goal), &parse_traffic(observed)))
        }
        StateCategory::Neighbors => CategoryDiff::Neighbors(diff_neighbors(
            &parse_registry_neighbors(goal),
            &parse_registry_neighbors(observed),
        )),
        StateCategory::AsnIpv4
        | StateCategory::AsnIpv6
        | StateCategory::AsSetIpv4
        | StateCategory::AsSetIpv6 => CategoryDiff::Prefixes(merge_diff(
            &parse_registry_prefixes(goal),
            &parse_registry_prefixes(observed),
        )),
    };

    log_op_end!(
        "evaluate_category",
        duration_ms = start.elapsed().as_millis() as u64,
        category = category.section_name(),
        row_count = diff.row_count() as u64,
        passed = diff.passed()
    );
    diff
}

/// Evaluate every category of a node.
pub fn evaluate_node(state: &NodeState) -> NodeEvaluation {
    let start = Instant::now();
    let node = state.node.as_deref().unwrap_or("");
    log_op_start!("evaluate_node", node = node);

    let categories: BTreeMap<StateCategory, CategoryDiff> = state
        .categories
        .iter()
        .map(|(category, pair)| {
            (
                *category,
                evaluate_category(*category, &pair.goal, &pair.observed),
            )
        })
        .collect();
    let passed = categories.values().all(CategoryDiff::passed);

    log_op_end!(
        "evaluate_node",
        duration_ms = start.elapsed().as_millis() as u64,
        node = node,
        passed = passed
    );

    NodeEvaluation {
        node: state.node.clone(),
        categories,
        passed,
    }
}

/// Whole-node equality check: every category's goal and observed records,
/// lowered to value trees, compare equal.
///
/// # Errors
///
/// - `KindMismatch`: two lowered trees disagree in shape at some position
pub fn states_match(state: &NodeState) -> Result<bool> {
    let start = Instant::now();
    let node = state.node.as_deref().unwrap_or("");
    log_op_start!("states_match", node = node);

    let mut matched = true;
    for (category, pair) in &state.categories {
        let goal = parse_state(*category, &pair.goal).to_value();
        let observed = parse_state(*category, &pair.observed).to_value();
        match values_match(&goal, &observed) {
            Ok(true) => {}
            Ok(false) => {
                matched = false;
                break;
            }
            Err(err) => {
                log_op_error!(
                    "states_match",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    node = node,
                    category = category.section_name()
                );
                return Err(err);
            }
        }
    }

    log_op_end!(
        "states_match",
        duration_ms = start.elapsed().as_millis() as u64,
        node = node,
        passed = matched
    );
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::split_report;

    #[test]
    fn test_goal_without_section_is_compared_to_empty() {
        let mut goals = BTreeMap::new();
        goals.insert(
            StateCategory::ReceivedTraffic,
            "SRC=10.0.0.1 DST=10.0.0.2\n".to_string(),
        );
        let report = split_report("*****[ UUID ]*****\nN1\n*****[ END ]*****\n");
        let state = NodeState::from_goals_and_report(&goals, &report);

        assert_eq!(state.node.as_deref(), Some("n1"));
        assert_eq!(
            state.categories[&StateCategory::ReceivedTraffic].observed,
            ""
        );
        let evaluation = evaluate_node(&state);
        assert!(!evaluation.passed);
    }

    #[test]
    fn test_empty_node_passes_vacuously() {
        let evaluation = evaluate_node(&NodeState::default());
        assert!(evaluation.passed);
        assert!(evaluation.categories.is_empty());
        assert_eq!(states_match(&NodeState::default()), Ok(true));
    }
}
