//! Backend client tests against a mock HTTP server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use veneer_client::{Backend, ClientError};
use veneer_types::{IssueId, LocalFile, Model, ModelSelection, SessionId};

fn session(id: &str) -> SessionId {
    SessionId::new(id).unwrap()
}

#[tokio::test]
async fn fetch_session_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/session/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let backend = Backend::new(server.uri());
    let err = backend.fetch_session(&session("gone")).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
}

#[tokio::test]
async fn fetch_session_decodes_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/session/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{"name": "a.css", "size": 2048}],
            "analysis_results": {
                "gpt-4o": [{"file_info": {"name": "a.css"}, "issues": [], "total_issues": 0}]
            },
            "remediation_results": {}
        })))
        .mount(&server)
        .await;

    let backend = Backend::new(server.uri());
    let snapshot = backend.fetch_session(&session("s1")).await.unwrap();
    assert_eq!(snapshot.files.len(), 1);
    assert!(snapshot.analysis_results.for_model(Model::Gpt4o).is_some());
}

#[tokio::test]
async fn upload_posts_multipart_and_decodes_manifest() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "fresh",
            "files": [{"name": "a.css", "size": 7}]
        })))
        .mount(&server)
        .await;

    let backend = Backend::new(server.uri());
    let files = vec![LocalFile::new("a.css", b"body {}".to_vec())];
    let response = backend.upload(files).await.unwrap();
    assert_eq!(response.session_id.as_str(), "fresh");
    assert_eq!(response.files[0].name, "a.css");

    let received = &server.received_requests().await.unwrap()[0];
    let content_type = received
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn analyze_sends_selection_in_order_with_analysis_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_partial_json(json!({
            "session_id": "s1",
            "models": ["deepseek-v3", "gpt-4o"],
            "analysis_type": "aesthetics"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": {}})))
        .mount(&server)
        .await;

    let backend = Backend::new(server.uri());
    let selection: ModelSelection = [Model::DeepseekV3, Model::Gpt4o].into_iter().collect();
    let response = backend.analyze(&session("s1"), &selection).await.unwrap();
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn analyze_surfaces_server_errors_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model backend down"))
        .mount(&server)
        .await;

    let backend = Backend::new(server.uri());
    let err = backend
        .analyze(&session("s1"), &ModelSelection::single(Model::Gpt4o))
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("model backend down"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn preview_decodes_changes_and_never_sets_applied() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/remediate/preview"))
        .and(body_partial_json(json!({
            "session_id": "s1",
            "issue_id": "COLOR_001_1",
            "model": "gpt-4o"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "changes": [
                {"line_number": 4, "original": "color: red", "fixed": "color: #c0392b"}
            ],
            "design_improvement": "harmonized accent color"
        })))
        .mount(&server)
        .await;

    let backend = Backend::new(server.uri());
    let record = backend
        .preview_fix(&session("s1"), &IssueId::new("COLOR_001_1"), Model::Gpt4o)
        .await
        .unwrap();
    assert_eq!(record.changes.len(), 1);
    assert_eq!(record.changes[0].fixed, "color: #c0392b");
    assert!(!record.applied);
}

#[tokio::test]
async fn preview_with_success_false_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/remediate/preview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "issue context unavailable"
        })))
        .mount(&server)
        .await;

    let backend = Backend::new(server.uri());
    let err = backend
        .preview_fix(&session("s1"), &IssueId::new("X_1"), Model::Gpt4o)
        .await
        .unwrap_err();
    match err {
        ClientError::Rejected(reason) => assert!(reason.contains("context unavailable")),
        other => panic!("expected rejection, got {other:?}"),
    }
}
