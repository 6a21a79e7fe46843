//! Shared fixtures for the integration suite: a wiremock backend plus
//! builders for the payload shapes the real backend returns.

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use veneer_engine::{App, Backend, SessionStore};

/// An app wired to `server` with its session store in `dir`.
pub fn app_against(server: &MockServer, dir: &tempfile::TempDir) -> App {
    App::new(Backend::new(server.uri()), store_in(dir))
}

pub fn store_in(dir: &tempfile::TempDir) -> SessionStore {
    SessionStore::at(dir.path().join(SessionStore::FILENAME))
}

/// One wire-shaped issue object.
pub fn issue_json(id: &str, severity: &str, category: &str, description: &str) -> Value {
    json!({
        "issue_id": id,
        "severity": severity,
        "category": category,
        "description": description,
        "line_numbers": [4],
        "code_snippet": "color: red",
    })
}

/// One wire-shaped per-file outcome.
pub fn outcome_json(file: &str, issues: Vec<Value>) -> Value {
    json!({
        "file_info": {"name": file},
        "total_issues": issues.len(),
        "issues": issues,
    })
}

pub async fn mount_upload(server: &MockServer, session: &str, files: &[(&str, u64)]) {
    let manifest: Vec<Value> = files
        .iter()
        .map(|(name, size)| json!({"name": name, "size": size}))
        .collect();
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": session,
            "files": manifest,
        })))
        .mount(server)
        .await;
}

/// Mount an analyze mock keyed on the requested model list, so successive
/// runs with different selections get different result sets.
pub async fn mount_analyze(server: &MockServer, models: &[&str], results: Value) {
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_partial_json(json!({"models": models})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": results})))
        .mount(server)
        .await;
}

pub async fn mount_preview(server: &MockServer, issue_id: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path("/remediate/preview"))
        .and(body_partial_json(json!({"issue_id": issue_id})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_session_snapshot(server: &MockServer, session: &str, snapshot: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/session/{session}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot))
        .mount(server)
        .await;
}

pub async fn mount_session_not_found(server: &MockServer, session: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/session/{session}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "not found"})))
        .mount(server)
        .await;
}
