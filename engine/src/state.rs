//! The single workflow state container.
//!
//! Every field is replaced wholesale by exactly one mutator below; nothing in
//! the codebase performs a partial merge of these slices. That is what makes
//! each operation's write atomic from the UI's point of view.

use std::collections::BTreeMap;

use veneer_client::SessionSnapshot;
use veneer_types::{
    AnalysisResults, FileDescriptor, IssueId, Model, ModelSelection, Page, RemediationRecord,
    SessionId,
};

/// In-memory state of the current working session.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    pub(crate) session: Option<SessionId>,
    pub(crate) files: Vec<FileDescriptor>,
    pub(crate) selection: ModelSelection,
    pub(crate) results: AnalysisResults,
    pub(crate) remediation: BTreeMap<IssueId, RemediationRecord>,
    pub(crate) page: Page,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            session: None,
            files: Vec::new(),
            selection: ModelSelection::single(Model::Gpt4o),
            results: AnalysisResults::new(),
            remediation: BTreeMap::new(),
            page: Page::Welcome,
        }
    }
}

impl WorkflowState {
    #[must_use]
    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    #[must_use]
    pub fn selection(&self) -> &ModelSelection {
        &self.selection
    }

    #[must_use]
    pub fn results(&self) -> &AnalysisResults {
        &self.results
    }

    #[must_use]
    pub fn remediation(&self) -> &BTreeMap<IssueId, RemediationRecord> {
        &self.remediation
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    /// A successful upload opens a fresh analysis epoch: new session, new
    /// manifest, and any prior results or previews are gone.
    pub(crate) fn apply_upload(&mut self, session: SessionId, files: Vec<FileDescriptor>) {
        self.session = Some(session);
        self.files = files;
        self.results = AnalysisResults::new();
        self.remediation.clear();
        self.page = Page::Analyze;
    }

    /// A successful analysis supersedes the previous result set entirely.
    /// Remediation records are keyed by issue ids of the superseded epoch,
    /// so they go too.
    pub(crate) fn apply_analysis(&mut self, results: AnalysisResults) {
        self.results = results;
        self.remediation.clear();
        self.page = Page::Results;
    }

    /// Rehydrate from a server snapshot during restore.
    ///
    /// The selection is rebuilt from the snapshot's result keys: restored
    /// results are only meaningful against the selection that produced them.
    pub(crate) fn apply_snapshot(&mut self, session: SessionId, snapshot: SessionSnapshot) {
        self.session = Some(session);
        self.files = snapshot.files;
        if !snapshot.analysis_results.is_empty() {
            self.selection = snapshot.analysis_results.models().collect();
        }
        self.results = snapshot.analysis_results;
        self.remediation = snapshot.remediation_results;
        self.page = if self.results.is_empty() {
            Page::Analyze
        } else {
            Page::Results
        };
    }

    /// Return to the blank state. Idempotent.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
