//! End-to-end workflow tests: upload, analyze, aggregate, preview, reset.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use veneer_engine::WorkflowError;
use veneer_types::{IssueId, LocalFile, Model, Page, Severity};

use crate::common;

fn css_and_html() -> Vec<LocalFile> {
    vec![
        LocalFile::new("a.css", vec![b'x'; 2048]),
        LocalFile::new("b.html", vec![b'y'; 1024]),
    ]
}

/// Upload two files, analyze with the default gpt-4o selection where `a.css`
/// has one high issue and `b.html` has none.
async fn run_example(server: &MockServer, app: &mut veneer_engine::App) {
    common::mount_upload(server, "sess-1", &[("a.css", 2048), ("b.html", 1024)]).await;
    common::mount_analyze(
        server,
        &["gpt-4o"],
        json!({
            "gpt-4o": [
                common::outcome_json(
                    "a.css",
                    vec![common::issue_json("COLOR_003_1", "high", "color", "low contrast text")],
                ),
                common::outcome_json("b.html", vec![]),
            ]
        }),
    )
    .await;

    app.upload(css_and_html()).await.unwrap();
    app.analyze().await.unwrap();
}

#[tokio::test]
async fn upload_then_analyze_worked_example() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = common::app_against(&server, &dir);

    run_example(&server, &mut app).await;

    // Manifest matches the input set, sizes preserved.
    let files = app.state().files();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].size, 2048);
    assert_eq!(files[1].size, 1024);

    // Raw results: one model key, two file outcomes.
    assert_eq!(
        app.state()
            .results()
            .for_model(Model::Gpt4o)
            .map(<[_]>::len),
        Some(2)
    );

    // Flattened view: exactly one record, severity high, model/file attached.
    assert_eq!(app.page(), Page::Results);
    let issues = app.issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].issue.severity, Severity::High);
    assert_eq!(issues[0].file, "a.css");
    assert_eq!(issues[0].model, Model::Gpt4o);

    // Stats: {high: 1} and nothing else.
    let stats = app.stats();
    assert_eq!(stats.severity(Severity::High), 1);
    assert_eq!(stats.by_severity.len(), 1);
    assert_eq!(stats.total(), 1);
}

#[tokio::test]
async fn upload_resets_the_analysis_epoch() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = common::app_against(&server, &dir);

    run_example(&server, &mut app).await;
    assert!(!app.issues().is_empty());

    // A second upload unconditionally clears results and previews.
    app.upload(css_and_html()).await.unwrap();
    assert!(app.state().results().is_empty());
    assert!(app.state().remediation().is_empty());
    assert!(app.issues().is_empty());
    assert_eq!(app.page(), Page::Analyze);
}

#[tokio::test]
async fn reanalysis_with_other_models_leaves_no_residue() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = common::app_against(&server, &dir);

    run_example(&server, &mut app).await;
    common::mount_analyze(
        &server,
        &["claude-opus-4"],
        json!({
            "claude-opus-4": [common::outcome_json(
                "a.css",
                vec![common::issue_json("TYPO_002_1", "critical", "typography", "unreadable font size")],
            )]
        }),
    )
    .await;

    // Swap the selection to claude only and re-run.
    app.toggle_model(Model::Gpt4o);
    app.toggle_model(Model::ClaudeOpus4);
    app.analyze().await.unwrap();

    let issues = app.issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].model, Model::ClaudeOpus4);
    assert!(
        issues.iter().all(|flat| flat.issue.id.as_str() != "COLOR_003_1"),
        "issues from the superseded selection must not survive"
    );
}

#[tokio::test]
async fn upload_failure_leaves_everything_untouched() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = common::app_against(&server, &dir);

    run_example(&server, &mut app).await;
    let files_before = app.state().files().to_vec();
    let session_before = app.state().session().cloned();

    // Replace the upload mock with a failing one on a fresh server state:
    // easier to just point the next upload at a 500.
    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .mount(&server)
        .await;

    let err = app.upload(css_and_html()).await.unwrap_err();
    assert!(matches!(err, WorkflowError::UploadFailed(_)));

    assert_eq!(app.state().session().cloned(), session_before);
    assert_eq!(app.state().files().to_vec(), files_before);
    assert_eq!(app.page(), Page::Results);
}

#[tokio::test]
async fn analysis_failure_keeps_prior_results_for_retry() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = common::app_against(&server, &dir);

    run_example(&server, &mut app).await;
    let issues_before = app.issues();

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream timeout"))
        .mount(&server)
        .await;

    let err = app.analyze().await.unwrap_err();
    assert!(matches!(err, WorkflowError::AnalysisFailed(_)));
    assert_eq!(app.issues(), issues_before);
    assert_eq!(app.page(), Page::Results);
}

#[tokio::test]
async fn preview_replaces_the_record_for_the_same_issue() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = common::app_against(&server, &dir);

    run_example(&server, &mut app).await;
    common::mount_preview(
        &server,
        "COLOR_003_1",
        json!({
            "success": true,
            "changes": [{"line_number": 4, "original": "color: #777", "fixed": "color: #222"}]
        }),
    )
    .await;

    let id = IssueId::new("COLOR_003_1");
    app.preview(id.clone(), Model::Gpt4o).await.unwrap();
    let (open_id, record) = app.open_preview().unwrap();
    assert_eq!(open_id, &id);
    assert_eq!(record.changes[0].fixed, "color: #222");
    assert!(!record.applied);

    // Re-issue: the second preview replaces the first, no history kept.
    server.reset().await;
    common::mount_preview(
        &server,
        "COLOR_003_1",
        json!({
            "success": true,
            "changes": [{"line_number": 4, "original": "color: #777", "fixed": "color: #111"}]
        }),
    )
    .await;
    app.preview(id.clone(), Model::Gpt4o).await.unwrap();

    assert_eq!(app.state().remediation().len(), 1);
    let record = app.state().remediation().get(&id).unwrap();
    assert_eq!(record.changes.len(), 1);
    assert_eq!(record.changes[0].fixed, "color: #111");
}

#[tokio::test]
async fn preview_of_a_superseded_issue_id_fails() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = common::app_against(&server, &dir);

    run_example(&server, &mut app).await;
    // Open a new epoch: the old issue id is now stale.
    app.upload(css_and_html()).await.unwrap();

    let err = app
        .preview(IssueId::new("COLOR_003_1"), Model::Gpt4o)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::PreviewFailed { .. }));
    assert!(app.state().remediation().is_empty());
    assert!(app.open_preview().is_none());
}

#[tokio::test]
async fn discard_drops_the_open_preview_record() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = common::app_against(&server, &dir);

    run_example(&server, &mut app).await;
    common::mount_preview(
        &server,
        "COLOR_003_1",
        json!({"changes": [{"line_number": 4, "original": "a", "fixed": "b"}]}),
    )
    .await;

    app.preview(IssueId::new("COLOR_003_1"), Model::Gpt4o)
        .await
        .unwrap();
    assert_eq!(app.state().remediation().len(), 1);

    app.discard_preview();
    assert!(app.open_preview().is_none());
    assert!(app.state().remediation().is_empty());
}

#[tokio::test]
async fn start_new_clears_state_and_persistence_idempotently() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = common::app_against(&server, &dir);

    run_example(&server, &mut app).await;
    assert!(common::store_in(&dir).load().is_some());

    app.start_new();
    assert_eq!(app.page(), Page::Welcome);
    assert!(app.state().session().is_none());
    assert!(app.state().files().is_empty());
    assert!(app.state().results().is_empty());
    assert!(app.state().remediation().is_empty());
    assert!(common::store_in(&dir).load().is_none());

    // Second invocation on the already-empty state is a no-op.
    app.start_new();
    assert_eq!(app.page(), Page::Welcome);
    assert!(app.state().session().is_none());
}

#[tokio::test]
async fn session_survives_a_process_restart() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    {
        let mut app = common::app_against(&server, &dir);
        run_example(&server, &mut app).await;
    }

    // A "new process" with the same store restores the session from the
    // backend snapshot.
    common::mount_session_snapshot(
        &server,
        "sess-1",
        json!({
            "files": [{"name": "a.css", "size": 2048}, {"name": "b.html", "size": 1024}],
            "analysis_results": {
                "gpt-4o": [common::outcome_json(
                    "a.css",
                    vec![common::issue_json("COLOR_003_1", "high", "color", "low contrast text")],
                )]
            }
        }),
    )
    .await;

    let mut restarted = common::app_against(&server, &dir);
    restarted.initialize().await;

    assert_eq!(restarted.page(), Page::Results);
    assert_eq!(restarted.state().files().len(), 2);
    assert_eq!(restarted.issues().len(), 1);
}
