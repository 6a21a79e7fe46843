//! HTTP client for the Veneer analysis backend.
//!
//! # Architecture
//!
//! [`Backend`] wraps a base URL and a shared [`reqwest::Client`] and exposes
//! one method per backend operation:
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`Backend::fetch_session`] | `GET /session/{id}` |
//! | [`Backend::upload`] | `POST /upload` (multipart) |
//! | [`Backend::analyze`] | `POST /analyze` |
//! | [`Backend::preview_fix`] | `POST /remediate/preview` |
//!
//! The report and fixed-code artifacts are plain links, so [`Backend::report_url`]
//! and [`Backend::fixed_code_url`] only build URLs and never fetch.
//!
//! # Error Handling
//!
//! Every response is decoded into an explicit DTO; non-2xx statuses
//! become [`ClientError::Status`] with a truncated body, transport failures
//! become [`ClientError::Transport`]. The single status the engine treats
//! specially - an expired session on restore - is surfaced as
//! [`ClientError::NotFound`].
//!
//! None of these calls carry a total request timeout: a hung backend holds the
//! call open, and a failure surfaces the moment the connection rejects.

mod dto;

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::multipart;
use thiserror::Error;

use veneer_types::{IssueId, LocalFile, Model, ModelSelection, RemediationRecord, SessionId};

pub use dto::{AnalyzeResponse, PreviewResponse, SessionSnapshot, UploadResponse};

/// Backend base URL used when neither config nor environment provides one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// The one analysis type the client drives.
pub const ANALYSIS_TYPE: &str = "aesthetics";

const CONNECT_TIMEOUT_SECS: u64 = 30;
const TCP_KEEPALIVE_SECS: u64 = 60;
const POOL_MAX_IDLE_PER_HOST: usize = 8;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build tuned HTTP client: {e}. Using defaults.");
                reqwest::Client::new()
            })
    })
}

/// Failure surface of the backend client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// `GET /session/{id}` reported the identifier unknown or expired.
    #[error("session not found")]
    NotFound,
    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The backend answered 2xx but flagged the operation unsuccessful.
    #[error("backend rejected the request: {0}")]
    Rejected(String),
    /// The request never completed, or the body failed to decode.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Handle to one analysis backend.
#[derive(Debug, Clone)]
pub struct Backend {
    base_url: String,
    client: reqwest::Client,
}

impl Backend {
    /// Create a backend handle. A trailing slash on `base_url` is tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: http_client().clone(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the server-side snapshot for a previously persisted session.
    pub async fn fetch_session(&self, id: &SessionId) -> Result<SessionSnapshot, ClientError> {
        let url = format!("{}/session/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Upload a file set, creating a fresh server-side session.
    pub async fn upload(&self, files: Vec<LocalFile>) -> Result<UploadResponse, ClientError> {
        let url = format!("{}/upload", self.base_url);
        let mut form = multipart::Form::new();
        for file in files {
            let part = multipart::Part::bytes(file.bytes).file_name(file.name);
            form = form.part("files", part);
        }
        let response = self.client.post(&url).multipart(form).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Run the selected models over a session's uploaded files.
    pub async fn analyze(
        &self,
        session_id: &SessionId,
        models: &ModelSelection,
    ) -> Result<AnalyzeResponse, ClientError> {
        let url = format!("{}/analyze", self.base_url);
        let request = dto::AnalyzeRequest {
            session_id: session_id.as_str(),
            models: models.iter().map(|model| model.as_str()).collect(),
            analysis_type: ANALYSIS_TYPE,
        };
        let response = self.client.post(&url).json(&request).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Request a remediation preview for one issue.
    ///
    /// A 2xx response with `success: false` is mapped to
    /// [`ClientError::Rejected`] so callers never see a half-built record.
    pub async fn preview_fix(
        &self,
        session_id: &SessionId,
        issue_id: &IssueId,
        model: Model,
    ) -> Result<RemediationRecord, ClientError> {
        let url = format!("{}/remediate/preview", self.base_url);
        let request = dto::PreviewRequest {
            session_id: session_id.as_str(),
            issue_id: issue_id.as_str(),
            model: model.as_str(),
        };
        let response = self.client.post(&url).json(&request).send().await?;
        let response = check_status(response).await?;
        let preview: PreviewResponse = response.json().await?;
        if !preview.success {
            return Err(ClientError::Rejected(
                preview
                    .error
                    .unwrap_or_else(|| "remediation preview failed".to_string()),
            ));
        }
        Ok(preview.into_record())
    }

    /// Link to the downloadable analysis report artifact.
    #[must_use]
    pub fn report_url(&self, session_id: &SessionId) -> String {
        format!("{}/report/{}", self.base_url, session_id)
    }

    /// Link to the downloadable fixed-code artifact.
    #[must_use]
    pub fn fixed_code_url(&self, session_id: &SessionId) -> String {
        format!("{}/fixed-code/{}", self.base_url, session_id)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(mut text) => {
            if text.len() > MAX_ERROR_BODY_BYTES {
                let mut cut = MAX_ERROR_BODY_BYTES;
                while !text.is_char_boundary(cut) {
                    cut -= 1;
                }
                text.truncate(cut);
            }
            text
        }
        Err(e) => format!("<failed to read error body: {e}>"),
    };
    tracing::warn!(%status, "Backend request failed");
    Err(ClientError::Status { status, body })
}
