//! Device report splitting.
//!
//! Agents stream one report as a run of sections:
//!
//! ```text
//! *****[ UUID ]*****
//! 3F2504E0-4F89-11D3-9A0C-0305E82C3301
//! *****[ Routes IPv4 ]*****
//! BIRD 1.5.0 ready.
//! ...
//! *****[ END ]*****
//! ```

use crate::category::StateCategory;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Section that closes the report.
pub const END_SECTION: &str = "END";
/// Section carrying the node identity.
pub const UUID_SECTION: &str = "UUID";

fn section_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\*{5}\[(.+)\]\*{5}$").expect("section header regex must compile")
    })
}

/// A report split into its sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceReport {
    /// Content of the `UUID` section, trimmed and lowercased
    pub uuid: Option<String>,
    /// Observed text per known state category
    pub sections: BTreeMap<StateCategory, String>,
    /// Every other named section (`QUERY-RESULT`, `UPDATE-RESULT`, ...)
    pub other_sections: BTreeMap<String, String>,
}

impl DeviceReport {
    pub fn observed(&self, category: StateCategory) -> Option<&str> {
        self.sections.get(&category).map(String::as_str)
    }

    fn store(&mut self, name: String, content: String) {
        if name == UUID_SECTION {
            self.uuid = Some(content.trim().to_lowercase());
        } else if let Ok(category) = name.parse::<StateCategory>() {
            self.sections.insert(category, content);
        } else {
            self.other_sections.insert(name, content);
        }
    }
}

/// Split a streamed report into sections. Never fails; text outside any
/// section is dropped and a repeated section keeps its latest content.
pub fn split_report(text: &str) -> DeviceReport {
    let mut report = DeviceReport::default();
    let mut current: Option<(String, String)> = None;

    for line in text.lines().map(str::trim_end) {
        if let Some(caps) = section_header_re().captures(line) {
            if let Some((name, content)) = current.take() {
                report.store(name, content);
            }
            let name = caps[1].trim();
            if name != END_SECTION {
                current = Some((name.to_string(), String::new()));
            }
            continue;
        }

        if let Some((_, content)) = current.as_mut() {
            content.push_str(line);
            content.push('\n');
        }
    }

    if let Some((name, content)) = current {
        report.store(name, content);
    }
    report
}
