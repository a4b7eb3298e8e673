#![allow(clippy::unwrap_used, clippy::expect_used)]

use netstate_core::category::StateCategory;
use netstate_core::diff::{render_category_summary, render_human_summary, CategoryDiff};
use netstate_core::node::{evaluate_category, evaluate_node, states_match, NodeState};
use netstate_core::report::split_report;
use std::collections::BTreeMap;

const ROUTES_GOAL: &str = "BIRD 1.5.0 ready.
10.0.0.0/24 via 192.0.2.1 on eth0 [bgp1 12:00] * (100) [AS64501i]
\tBGP.as_path: 64501
";

const REPORT: &str = "*****[ UUID ]*****
6A0B7F4C-0000-4000-8000-00000000BEEF
*****[ END ]*****
*****[ Routes IPv4 ]*****
BIRD 1.5.0 ready.
10.0.0.0/24 via 192.0.2.1 on eth0 [bgp1 12:00] * (100) [AS64501i]
\tBGP.as_path: 64501
*****[ END ]*****
*****[ Received traffic ]*****
SRC=192.0.2.1 DST=198.51.100.1
SRC=192.0.2.7 DST=198.51.100.1
*****[ END ]*****
*****[ QUERY-RESULT ]*****
ok
*****[ END ]*****
";

fn goals(entries: &[(StateCategory, &str)]) -> BTreeMap<StateCategory, String> {
    entries
        .iter()
        .map(|(category, text)| (*category, text.to_string()))
        .collect()
}

#[test]
fn test_report_sections_are_routed() {
    let report = split_report(REPORT);
    assert_eq!(
        report.uuid.as_deref(),
        Some("6a0b7f4c-0000-4000-8000-00000000beef")
    );
    assert!(report
        .observed(StateCategory::RoutesIpv4)
        .unwrap()
        .starts_with("BIRD 1.5.0 ready.\n"));
    assert_eq!(report.other_sections["QUERY-RESULT"], "ok\n");
    assert!(report.observed(StateCategory::RoutesIpv6).is_none());
}

#[test]
fn test_node_evaluation_flags_unexpected_traffic() {
    let report = split_report(REPORT);
    let state = NodeState::from_goals_and_report(
        &goals(&[
            (StateCategory::RoutesIpv4, ROUTES_GOAL),
            (StateCategory::ReceivedTraffic, "SRC=192.0.2.1 DST=198.51.100.1\n"),
        ]),
        &report,
    );

    let evaluation = evaluate_node(&state);
    assert!(!evaluation.passed);
    assert!(evaluation.categories[&StateCategory::RoutesIpv4].passed());

    let CategoryDiff::Traffic(traffic) = &evaluation.categories[&StateCategory::ReceivedTraffic]
    else {
        panic!("traffic category must produce a traffic diff");
    };
    let unexpected: Vec<String> = traffic
        .unexpected()
        .map(|pair| pair.source.to_string())
        .collect();
    assert_eq!(unexpected, vec!["192.0.2.7"]);

    assert_eq!(states_match(&state), Ok(false));
}

#[test]
fn test_sections_without_goals_are_ignored() {
    let report = split_report(REPORT);
    let state = NodeState::from_goals_and_report(
        &goals(&[(StateCategory::RoutesIpv4, ROUTES_GOAL)]),
        &report,
    );
    assert_eq!(state.categories.len(), 1);

    let evaluation = evaluate_node(&state);
    assert!(evaluation.passed);
    assert_eq!(states_match(&state), Ok(true));
}

#[test]
fn test_empty_goal_and_empty_observation_pass() {
    let diff = evaluate_category(StateCategory::AsSetIpv6, r#"{"filter": []}"#, "");
    assert!(diff.passed());
    assert_eq!(diff.row_count(), 1);
}

#[test]
fn test_neighbor_category_uses_policy_diff() {
    let diff = evaluate_category(
        StateCategory::Neighbors,
        "mp-import: from AS64500 accept ANY\n",
        "mp-import: from as64500 accept ANY   \n",
    );
    assert!(matches!(diff, CategoryDiff::Neighbors(ref n) if n.passed && n.rows.len() == 1));
}

#[test]
fn test_summary_uses_lab_wording() {
    let diff = evaluate_category(
        StateCategory::RoutesIpv4,
        ROUTES_GOAL,
        "BIRD 1.5.0 ready.\n10.0.1.0/24 via 192.0.2.1 on eth0 [bgp1 12:00]\n\tBGP.as_path: 64501 64502\n",
    );
    let text = render_category_summary(StateCategory::RoutesIpv4, &diff);
    assert!(text.starts_with("### IPv4 routes [FAIL]"));
    assert!(text.contains("This route is missing"));
    assert!(text.contains("This route shouldn't be received"));
    assert!(text.contains("`10.0.1.0/24` AS-Path: 64501 64502"));
}

#[test]
fn test_node_summary_lists_every_category() {
    let report = split_report(REPORT);
    let state = NodeState::from_goals_and_report(
        &goals(&[
            (StateCategory::RoutesIpv4, ROUTES_GOAL),
            (StateCategory::Neighbors, ""),
        ]),
        &report,
    );
    let text = render_human_summary(&evaluate_node(&state));
    assert!(text.starts_with("## Node 6a0b7f4c-0000-4000-8000-00000000beef"));
    assert!(text.contains("**Result**: PASS"));
    assert!(text.contains("### IPv4 routes [PASS]"));
    assert!(text.contains("No neighbors expected"));
    assert!(text.contains("✓ No neighbors defined"));
}

#[test]
fn test_evaluation_serializes_with_section_names() {
    let diff = evaluate_category(StateCategory::ReceivedTraffic, "", "");
    let mut categories = BTreeMap::new();
    categories.insert(StateCategory::ReceivedTraffic, diff);
    let json = serde_json::to_value(&categories).unwrap();
    assert_eq!(json["Received traffic"]["kind"], "traffic");
    assert_eq!(json["Received traffic"]["diff"]["rows"][0]["kind"], "nothing_expected");
}
