//! Canonical command
//!
//! Usage: netstate canonical <ADDRESS> [--length <N>]

use super::CommandStatus;
use clap::Args;
use netstate_core::address::{canonicalize, canonicalize_prefix, parse_prefix};
use netstate_core::errors::NsError;

#[derive(Debug, Args)]
pub struct CanonicalArgs {
    /// IPv4 or IPv6 literal, optionally with an inline `/length`
    pub address: String,

    /// Prefix length, read in the bit space of the literal as written
    #[arg(short, long, allow_negative_numbers = true)]
    pub length: Option<i64>,
}

/// Execute canonical command
pub fn execute(args: CanonicalArgs) -> Result<CommandStatus, Box<dyn std::error::Error>> {
    let (canonical, printable) = match args.length {
        Some(length) => {
            let prefix = canonicalize_prefix(&args.address, length).map_err(NsError::from)?;
            (prefix.canonical_text(), prefix.to_string())
        }
        None if args.address.contains('/') => {
            let prefix = parse_prefix(&args.address).map_err(NsError::from)?;
            (prefix.canonical_text(), prefix.to_string())
        }
        None => {
            let address = canonicalize(&args.address).map_err(NsError::from)?;
            (address.canonical_text(), address.to_string())
        }
    };

    println!("canonical: {}", canonical);
    println!("printable: {}", printable);
    Ok(CommandStatus::Success)
}
