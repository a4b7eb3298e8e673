//! Subcommands

pub mod canonical;
pub mod diff;
pub mod node;

use clap::ValueEnum;
use netstate_core::errors::{NsError, NsErrorKind};
use serde::Serialize;
use std::path::Path;

/// How a command finished when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// The evaluation did not pass and the caller asked for a failing exit
    Mismatch,
}

/// Output format of evaluation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown summary
    Text,
    /// Structured diff as pretty-printed JSON
    Json,
}

/// Read a whole input file, classifying failures as `ERR_IO`.
pub fn read_input(path: &Path, op: &str) -> Result<String, NsError> {
    std::fs::read_to_string(path).map_err(|e| {
        NsError::new(NsErrorKind::Io)
            .with_op(op)
            .with_input(path.display().to_string())
            .with_message(e.to_string())
    })
}

pub fn to_json<T: Serialize>(value: &T, op: &str) -> Result<String, NsError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        NsError::new(NsErrorKind::Serialization)
            .with_op(op)
            .with_message(e.to_string())
    })
}
