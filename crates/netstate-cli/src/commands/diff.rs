//! Diff command
//!
//! Usage: netstate diff --category <NAME> --goal <FILE> --observed <FILE> [--format text|json]

use super::{read_input, to_json, CommandStatus, OutputFormat};
use clap::Args;
use netstate_core::category::StateCategory;
use netstate_core::diff::render_category_summary;
use netstate_core::errors::NsError;
use netstate_core::node::evaluate_category;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// State category section name, e.g. "Routes IPv4" or "NEIGHBORS"
    #[arg(short, long)]
    pub category: String,

    /// File holding the goal text
    #[arg(short, long)]
    pub goal: PathBuf,

    /// File holding the observed text
    #[arg(short, long)]
    pub observed: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<CommandStatus, Box<dyn std::error::Error>> {
    let category: StateCategory = args
        .category
        .parse()
        .map_err(|e| NsError::from(e).with_op("diff"))?;

    let goal = read_input(&args.goal, "diff")?;
    let observed = read_input(&args.observed, "diff")?;

    let diff = evaluate_category(category, &goal, &observed);

    match args.format {
        OutputFormat::Text => print!("{}", render_category_summary(category, &diff)),
        OutputFormat::Json => println!("{}", to_json(&diff, "diff")?),
    }

    Ok(CommandStatus::Success)
}
