//! Central application state and the workflow contracts.
//!
//! `App` is the only mutator of [`WorkflowState`]. The event loop in the cli
//! awaits each network operation inline, so two calls of the same kind can
//! never overlap, and the persisted session identifier can never be clobbered
//! mid-restore: [`App::initialize`] runs to completion before the first frame,
//! and every later identifier change goes through upload or start-new.

use veneer_client::{Backend, ClientError};
use veneer_types::{
    FlattenedIssue, IssueId, IssueStats, LocalFile, Model, Page, RemediationRecord,
};

use crate::aggregate;
use crate::config::VeneerConfig;
use crate::picker::FilePicker;
use crate::session_store::SessionStore;
use crate::state::WorkflowState;

/// Failure surface of the workflow contracts.
///
/// Every variant is handled at the UI boundary as a dismissible notice; none
/// abort the process. A failed restore never appears here - an expired
/// session is an expected condition, handled silently inside
/// [`App::initialize`].
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("no files selected")]
    NoFilesSelected,
    #[error("failed to read local file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("no active session")]
    NoSession,
    #[error("no models selected")]
    NoModelsSelected,
    #[error("upload failed: {0}")]
    UploadFailed(#[source] ClientError),
    #[error("analysis failed: {0}")]
    AnalysisFailed(#[source] ClientError),
    #[error("remediation preview failed: {reason}")]
    PreviewFailed { reason: String },
}

/// The application: workflow state, its collaborators, and the light UI
/// state (cursor, status line, open modal) the pages need.
#[derive(Debug)]
pub struct App {
    state: WorkflowState,
    backend: Backend,
    store: SessionStore,
    picker: FilePicker,
    status: Option<String>,
    results_cursor: usize,
    preview_issue: Option<IssueId>,
    should_quit: bool,
}

impl App {
    /// Construct with explicit collaborators. Tests use this with a wiremock
    /// backend and a temp-dir store.
    #[must_use]
    pub fn new(backend: Backend, store: SessionStore) -> Self {
        Self {
            state: WorkflowState::default(),
            backend,
            store,
            picker: FilePicker::empty(),
            status: None,
            results_cursor: 0,
            preview_issue: None,
            should_quit: false,
        }
    }

    /// Construct from config file, environment, and platform directories.
    #[must_use]
    pub fn from_environment() -> Self {
        let config = VeneerConfig::load().unwrap_or_default();
        let backend = Backend::new(config.resolve_base_url());
        Self::new(backend, SessionStore::at_default_location())
    }

    // ------------------------------------------------------------------
    // Restore (Session Store sequence)
    // ------------------------------------------------------------------

    /// Restore the persisted session, if any. Called exactly once, before the
    /// event loop starts.
    ///
    /// On success the page jumps straight to Analyze (files, no results) or
    /// Results (results present), skipping Welcome. A session the backend no
    /// longer knows - or any restore failure - clears the stale identifier
    /// and leaves the app on Welcome with no user-visible error.
    pub async fn initialize(&mut self) {
        let Some(id) = self.store.load() else {
            return;
        };

        match self.backend.fetch_session(&id).await {
            Ok(snapshot) => {
                tracing::info!(session = %id, "Restored previous session");
                self.state.apply_snapshot(id, snapshot);
                self.set_status("Restored previous session");
            }
            Err(ClientError::NotFound) => {
                tracing::info!(session = %id, "Persisted session expired; starting fresh");
                self.store.clear();
            }
            Err(e) => {
                tracing::warn!(session = %id, "Session restore failed: {e}");
                self.store.clear();
            }
        }
    }

    // ------------------------------------------------------------------
    // Upload Controller
    // ------------------------------------------------------------------

    /// Upload the picker's current selection.
    pub async fn upload_selected(&mut self) -> Result<(), WorkflowError> {
        let files = self.picker.read_selected()?;
        self.upload(files).await
    }

    /// Upload a file set, replacing the working session.
    ///
    /// On success the session identifier is persisted, the manifest replaces
    /// the descriptor set, prior results and previews are unconditionally
    /// cleared, and the page moves to Analyze. On failure nothing changes.
    pub async fn upload(&mut self, files: Vec<LocalFile>) -> Result<(), WorkflowError> {
        if files.is_empty() {
            return Err(WorkflowError::NoFilesSelected);
        }

        let count = files.len();
        let response = self
            .backend
            .upload(files)
            .await
            .map_err(WorkflowError::UploadFailed)?;

        tracing::info!(session = %response.session_id, files = count, "Upload complete");
        self.store.save(&response.session_id);
        self.state.apply_upload(response.session_id, response.files);
        self.results_cursor = 0;
        self.preview_issue = None;
        self.set_status(format!("Uploaded {count} file(s)"));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Analysis Orchestrator
    // ------------------------------------------------------------------

    /// Run the selected models over the session's files.
    ///
    /// Both preconditions are caller errors and are checked before anything
    /// touches the network. On success the result set is replaced wholesale
    /// and the page moves to Results; on failure results are untouched and
    /// the Analyze page remains for retry.
    pub async fn analyze(&mut self) -> Result<(), WorkflowError> {
        let Some(session) = self.state.session.clone() else {
            return Err(WorkflowError::NoSession);
        };
        if self.state.selection.is_empty() {
            return Err(WorkflowError::NoModelsSelected);
        }

        let response = self
            .backend
            .analyze(&session, &self.state.selection)
            .await
            .map_err(WorkflowError::AnalysisFailed)?;

        tracing::info!(models = self.state.selection.len(), "Analysis complete");
        self.state.apply_analysis(response.results);
        self.results_cursor = 0;
        self.preview_issue = None;
        self.set_status(format!("Found {} issue(s)", self.issues().len()));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Result Aggregator (pure, recomputed on demand)
    // ------------------------------------------------------------------

    /// The flattened, UI-ready issue list for the current epoch.
    #[must_use]
    pub fn issues(&self) -> Vec<FlattenedIssue> {
        aggregate::flatten(&self.state.selection, &self.state.results)
    }

    /// Severity/category tallies for the current flattened list.
    #[must_use]
    pub fn stats(&self) -> IssueStats {
        aggregate::stats(&self.issues())
    }

    // ------------------------------------------------------------------
    // Remediation Workflow
    // ------------------------------------------------------------------

    /// Request a fix preview for one issue of the current epoch.
    ///
    /// An identifier that is not in the current flattened list fails without
    /// touching the network - a stale id from a superseded epoch must never
    /// resurface a prior preview. On success the record replaces any earlier
    /// one for that issue and the preview modal opens over the Results page.
    pub async fn preview(&mut self, issue_id: IssueId, model: Model) -> Result<(), WorkflowError> {
        let Some(session) = self.state.session.clone() else {
            return Err(WorkflowError::NoSession);
        };
        if !self.issues().iter().any(|flat| flat.issue.id == issue_id) {
            return Err(WorkflowError::PreviewFailed {
                reason: format!("issue '{issue_id}' is not part of the current analysis"),
            });
        }

        let record = self
            .backend
            .preview_fix(&session, &issue_id, model)
            .await
            .map_err(|e| WorkflowError::PreviewFailed {
                reason: e.to_string(),
            })?;

        tracing::info!(issue = %issue_id, model = %model, "Preview ready");
        self.state.remediation.insert(issue_id.clone(), record);
        self.preview_issue = Some(issue_id);
        Ok(())
    }

    /// The record behind the open preview modal, if any.
    #[must_use]
    pub fn open_preview(&self) -> Option<(&IssueId, &RemediationRecord)> {
        let id = self.preview_issue.as_ref()?;
        let record = self.state.remediation.get(id)?;
        Some((id, record))
    }

    pub fn close_preview(&mut self) {
        self.preview_issue = None;
    }

    /// Close the modal and drop its record entirely.
    pub fn discard_preview(&mut self) {
        if let Some(id) = self.preview_issue.take() {
            self.state.remediation.remove(&id);
        }
    }

    // ------------------------------------------------------------------
    // Navigation State Machine
    // ------------------------------------------------------------------

    /// Move to `page` if its prerequisite data exists; otherwise do nothing.
    ///
    /// Analyze needs a session, Results needs at least one raw result entry.
    /// Welcome and Upload are always reachable.
    pub fn navigate(&mut self, page: Page) {
        let allowed = match page {
            Page::Welcome | Page::Upload => true,
            Page::Analyze => self.state.session.is_some(),
            Page::Results => !self.state.results.is_empty(),
        };
        if allowed {
            self.state.page = page;
        }
    }

    /// Discard the working session entirely and return to Welcome.
    ///
    /// The only path that clears session, files, results, previews, and the
    /// persisted identifier. Idempotent: on an already-empty app it changes
    /// nothing observable.
    pub fn start_new(&mut self) {
        self.store.clear();
        self.state.reset();
        self.picker = FilePicker::empty();
        self.results_cursor = 0;
        self.preview_issue = None;
        self.status = None;
    }

    // ------------------------------------------------------------------
    // State access for the UI
    // ------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.state.page
    }

    #[must_use]
    pub fn picker(&self) -> &FilePicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut FilePicker {
        &mut self.picker
    }

    pub fn set_picker(&mut self, picker: FilePicker) {
        self.picker = picker;
    }

    pub fn toggle_model(&mut self, model: Model) {
        self.state.selection.toggle(model);
    }

    #[must_use]
    pub fn results_cursor(&self) -> usize {
        self.results_cursor
    }

    pub fn cursor_up(&mut self) {
        self.results_cursor = self.results_cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let len = self.issues().len();
        if len > 0 {
            self.results_cursor = (self.results_cursor + 1).min(len - 1);
        }
    }

    /// The flattened issue under the results cursor.
    #[must_use]
    pub fn selected_issue(&self) -> Option<FlattenedIssue> {
        self.issues().into_iter().nth(self.results_cursor)
    }

    /// Link to the downloadable report for the current session.
    #[must_use]
    pub fn report_url(&self) -> Option<String> {
        self.state
            .session
            .as_ref()
            .map(|id| self.backend.report_url(id))
    }

    /// Link to the downloadable fixed-code bundle for the current session.
    #[must_use]
    pub fn fixed_code_url(&self) -> Option<String> {
        self.state
            .session
            .as_ref()
            .map(|id| self.backend.fixed_code_url(id))
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Surface a workflow failure as a status notice. State was already left
    /// untouched by the failing operation; this only makes it visible.
    pub fn report_error(&mut self, error: &WorkflowError) {
        tracing::warn!("{error}");
        self.set_status(error.to_string());
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }
}
