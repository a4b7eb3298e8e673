//! Goal file loading
//!
//! ```yaml
//! schema_version: 0
//! node: monitor-1
//! goals:
//!   "Received traffic": |
//!     SRC=192.0.2.1 DST=198.51.100.1
//! ```

use netstate_core::category::StateCategory;
use netstate_core::errors::{NsError, NsErrorKind};
use netstate_core::{log_op_end, log_op_error, log_op_start};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

/// Only goal file layout understood so far
pub const GOAL_SCHEMA_VERSION: u32 = 0;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GoalFileDocument {
    schema_version: u32,
    #[serde(default)]
    node: Option<String>,
    #[serde(default)]
    goals: BTreeMap<String, String>,
}

/// Validated goal declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalFile {
    /// Display name overriding the report's node identity
    pub node: Option<String>,
    pub goals: BTreeMap<StateCategory, String>,
}

/// Parse and validate goal file text.
///
/// # Errors
///
/// - `ERR_SERIALIZATION`: the text is not a goal document
/// - `ERR_INVALID_INPUT`: unsupported `schema_version` or unknown category name
pub fn parse_goals(text: &str) -> Result<GoalFile, NsError> {
    let document: GoalFileDocument = serde_yaml::from_str(text).map_err(|e| {
        NsError::new(NsErrorKind::Serialization)
            .with_op("load_goals")
            .with_message(e.to_string())
    })?;

    if document.schema_version != GOAL_SCHEMA_VERSION {
        return Err(NsError::new(NsErrorKind::InvalidInput)
            .with_op("load_goals")
            .with_message(format!(
                "schema_version must be {}, found {}",
                GOAL_SCHEMA_VERSION, document.schema_version
            )));
    }

    let mut goals = BTreeMap::new();
    for (name, text) in document.goals {
        let category: StateCategory = name
            .parse()
            .map_err(|e| NsError::from(e).with_op("load_goals").with_category(&name))?;
        goals.insert(category, text);
    }

    Ok(GoalFile {
        node: document.node,
        goals,
    })
}

/// Read and validate a goal file.
///
/// # Errors
///
/// - `ERR_IO`: the file cannot be read
/// - see [`parse_goals`]
pub fn load_goals(path: &Path) -> Result<GoalFile, NsError> {
    let start = Instant::now();
    let shown = path.display().to_string();
    log_op_start!("load_goals", path = shown.as_str());

    let result = crate::commands::read_input(path, "load_goals").and_then(|text| parse_goals(&text));

    match &result {
        Ok(goal_file) => {
            log_op_end!(
                "load_goals",
                duration_ms = start.elapsed().as_millis() as u64,
                path = shown.as_str(),
                categories = goal_file.goals.len() as u64
            );
        }
        Err(err) => {
            log_op_error!(
                "load_goals",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                path = shown.as_str()
            );
        }
    }
    result
}
