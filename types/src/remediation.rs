//! Remediation previews: line-level change pairs proposed for one issue.

use serde::{Deserialize, Serialize};

/// One proposed line replacement inside a remediation preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    #[serde(default)]
    pub line_number: u32,
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub fixed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// The latest preview held for one issue, plus whether it has been applied.
///
/// At most one live record per issue id: requesting a new preview replaces
/// the prior record rather than accumulating history. `applied` is only set
/// by the external apply action, never by preview itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationRecord {
    #[serde(default)]
    pub changes: Vec<LineChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_improvement: Option<String>,
    #[serde(default)]
    pub applied: bool,
}

impl RemediationRecord {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
