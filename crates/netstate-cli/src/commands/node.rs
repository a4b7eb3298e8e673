//! Node command
//!
//! Usage: netstate node --goals <YAML> --report <FILE> [--format text|json] [--fail-on-mismatch]

use super::{read_input, to_json, CommandStatus, OutputFormat};
use crate::goals::load_goals;
use clap::Args;
use netstate_core::diff::render_human_summary;
use netstate_core::node::{evaluate_node, NodeState};
use netstate_core::report::split_report;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NodeArgs {
    /// YAML goal file
    #[arg(short, long)]
    pub goals: PathBuf,

    /// Report streamed by the node (sectioned text)
    #[arg(short, long)]
    pub report: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with status 2 when the node does not pass
    #[arg(long)]
    pub fail_on_mismatch: bool,
}

/// Execute node command
pub fn execute(args: NodeArgs) -> Result<CommandStatus, Box<dyn std::error::Error>> {
    let goal_file = load_goals(&args.goals)?;
    let report = split_report(&read_input(&args.report, "node")?);

    let mut state = NodeState::from_goals_and_report(&goal_file.goals, &report);
    if goal_file.node.is_some() {
        state.node = goal_file.node;
    }

    let evaluation = evaluate_node(&state);

    match args.format {
        OutputFormat::Text => print!("{}", render_human_summary(&evaluation)),
        OutputFormat::Json => println!("{}", to_json(&evaluation, "node")?),
    }

    if args.fail_on_mismatch && !evaluation.passed {
        tracing::info!(
            component = module_path!(),
            op = "node",
            node = state.node.as_deref().unwrap_or(""),
            "node does not match its goals"
        );
        return Ok(CommandStatus::Mismatch);
    }
    Ok(CommandStatus::Success)
}
