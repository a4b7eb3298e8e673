//! Human-readable summary renderer for node and category diffs.

use crate::category::StateCategory;
use crate::diff::model::{CategoryDiff, DiffRow, MergeDiff, NeighborDiff};
use crate::node::NodeEvaluation;
use crate::parsers::{RegistryPrefix, RouteRecord, TrafficPair};

/// Row wording for one record kind.
struct Wording {
    missing: &'static str,
    unexpected: &'static str,
    nothing_expected: &'static str,
    nothing_present: &'static str,
}

const ROUTE_WORDING: Wording = Wording {
    missing: "This route is missing",
    unexpected: "This route shouldn't be received",
    nothing_expected: "No routes expected",
    nothing_present: "✓ No routes received",
};

const TRAFFIC_WORDING: Wording = Wording {
    missing: "These packets are missing",
    unexpected: "These packets shouldn't be received",
    nothing_expected: "No packets expected",
    nothing_present: "✓ No packets received",
};

const PREFIX_WORDING: Wording = Wording {
    missing: "This prefix is missing",
    unexpected: "This prefix shouldn't be included",
    nothing_expected: "No prefixes expected",
    nothing_present: "✓ No prefixes included",
};

fn pass_label(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}

fn route_cell(route: &RouteRecord) -> String {
    let as_path = route
        .as_path()
        .map(|path| {
            path.iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();
    format!("`{}` AS-Path: {}", route.prefix, as_path)
}

fn traffic_cell(pair: &TrafficPair) -> String {
    format!("`{}` → `{}`", pair.source, pair.destination)
}

fn prefix_cell(entry: &RegistryPrefix) -> String {
    format!("`{}`", entry.prefix)
}

fn render_merge_rows<R>(
    out: &mut String,
    diff: &MergeDiff<R>,
    wording: &Wording,
    cell: impl Fn(&R) -> String,
) {
    out.push_str("| Status | Expected | Currently seen |\n|---|---|---|\n");
    for row in &diff.rows {
        let line = match row {
            DiffRow::Matched { goal, observed } => {
                format!("| ✓ | {} | {} |\n", cell(goal), cell(observed))
            }
            DiffRow::MissingFromObserved { goal } => {
                format!("| ✗ | {} | {} |\n", cell(goal), wording.missing)
            }
            DiffRow::UnexpectedInObserved { observed } => {
                format!("| ✗ | {} | {} |\n", wording.unexpected, cell(observed))
            }
            DiffRow::NothingExpected => format!(
                "| ✓ | {} | {} |\n",
                wording.nothing_expected, wording.nothing_present
            ),
        };
        out.push_str(&line);
    }
}

fn render_neighbor_rows(out: &mut String, diff: &NeighborDiff) {
    out.push_str(
        "| Status | ASN | Expected import | Expected export | Seen import | Seen export |\n\
         |---|---|---|---|---|---|\n",
    );
    if diff.nothing_expected {
        out.push_str("| ✓ | | No neighbors expected | | ✓ No neighbors defined | |\n");
        return;
    }
    for row in &diff.rows {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            if row.passed { "✓" } else { "✗" },
            row.neighbor,
            row.goal.import.join(", "),
            row.goal.export.join(", "),
            row.observed.import.join(", "),
            row.observed.export.join(", "),
        ));
    }
}

/// Render one category's diff as a Markdown section.
pub fn render_category_summary(category: StateCategory, diff: &CategoryDiff) -> String {
    let mut out = format!(
        "### {} [{}]\n\n",
        category.display_name(),
        pass_label(diff.passed())
    );

    match diff {
        CategoryDiff::Routes(routes) => render_merge_rows(&mut out, routes, &ROUTE_WORDING, route_cell),
        CategoryDiff::Traffic(traffic) => {
            render_merge_rows(&mut out, traffic, &TRAFFIC_WORDING, traffic_cell)
        }
        CategoryDiff::Prefixes(prefixes) => {
            render_merge_rows(&mut out, prefixes, &PREFIX_WORDING, prefix_cell)
        }
        CategoryDiff::Neighbors(neighbors) => render_neighbor_rows(&mut out, neighbors),
    }

    out.push('\n');
    out
}

/// Render a Markdown summary of a node evaluation.
///
/// Informational only; the structured [`NodeEvaluation`] stays authoritative.
pub fn render_human_summary(evaluation: &NodeEvaluation) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "## Node {}\n\n**Result**: {}\n\n",
        evaluation.node.as_deref().unwrap_or("(unidentified)"),
        pass_label(evaluation.passed)
    ));

    if evaluation.categories.is_empty() {
        out.push_str("_No goals declared._\n");
        return out;
    }

    for (category, diff) in &evaluation.categories {
        out.push_str(&render_category_summary(*category, diff));
    }
    out
}
