//! Wire schemas for the four backend operations.
//!
//! Each response has an explicit, serde-validated shape; fields the backend
//! may omit default instead of failing the decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use veneer_types::{
    AnalysisResults, FileDescriptor, IssueId, LineChange, RemediationRecord, SessionId,
};

const fn default_true() -> bool {
    true
}

/// `GET /session/{id}` - everything the server still holds for a session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub files: Vec<FileDescriptor>,
    #[serde(default)]
    pub analysis_results: AnalysisResults,
    #[serde(default)]
    pub remediation_results: BTreeMap<IssueId, RemediationRecord>,
}

/// `POST /upload` - the new session and its file manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub session_id: SessionId,
    #[serde(default)]
    pub files: Vec<FileDescriptor>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeRequest<'a> {
    pub session_id: &'a str,
    pub models: Vec<&'static str>,
    pub analysis_type: &'static str,
}

/// `POST /analyze` - per-model, per-file outcomes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub results: AnalysisResults,
}

#[derive(Debug, Serialize)]
pub(crate) struct PreviewRequest<'a> {
    pub session_id: &'a str,
    pub issue_id: &'a str,
    pub model: &'static str,
}

/// `POST /remediate/preview` - proposed line changes for one issue.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub changes: Vec<LineChange>,
    #[serde(default)]
    pub design_improvement: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PreviewResponse {
    /// Convert into the domain record. Preview never sets `applied`.
    #[must_use]
    pub fn into_record(self) -> RemediationRecord {
        RemediationRecord {
            changes: self.changes,
            design_improvement: self.design_improvement,
            applied: false,
        }
    }
}
