//! netstate CLI
//!
//! Command-line surface over the netstate engine: canonicalize addresses,
//! diff one state category, or evaluate a whole node report against a goal
//! file.

use clap::{Parser, Subcommand, ValueEnum};
use netstate_core::logging_facility::{self, Profile};

mod commands;
mod goals;

#[derive(Debug, Parser)]
#[command(name = "netstate")]
#[command(about = "netstate - network state normalization and goal/observed diff", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr; RUST_LOG overrides the level)
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the canonical and printable forms of an address or prefix
    Canonical(commands::canonical::CanonicalArgs),
    /// Diff the goal and observed text of one state category
    Diff(commands::diff::DiffArgs),
    /// Evaluate a node report against a goal file
    Node(commands::node::NodeArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Canonical(args) => commands::canonical::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Node(args) => commands::node::execute(args),
    };

    match result {
        Ok(commands::CommandStatus::Success) => {}
        Ok(commands::CommandStatus::Mismatch) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
