//! Transport tests for the reqwest-backed resource client.
//!
//! # Invariants
//! - Paths are resolved against the base URL, with or without a leading slash
//! - Non-success statuses fail with the server's error message; no retries
//! - Empty success bodies decode to `null`

mod common;

use common::*;
use cytomine_client::MetricsCollector;
use wiremock::matchers::{body_json, method, path, query_param};

#[tokio::test]
async fn test_get_passes_query_pairs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/project.json"))
        .and(query_param("max", "5"))
        .and(query_param("sort", "created"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = vec![
        ("max".to_string(), "5".to_string()),
        ("sort".to_string(), "created".to_string()),
    ];
    let body = client.get("project.json", &params).await.unwrap();
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn test_leading_slash_and_trailing_base_slash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::builder()
        .base_url(format!("{}/api/", mock_server.uri()))
        .build()
        .unwrap();
    client.get("/user/current.json", &[]).await.unwrap();
}

#[tokio::test]
async fn test_empty_body_is_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/project/1.json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert_eq!(client.delete("project/1.json", &[]).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_error_message_from_errors_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/project.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": ["name must not be blank", "ontology not found"],
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.post("project.json", &json!({})).await.unwrap_err();

    match err {
        ClientError::ApiError { status, message, .. } => {
            assert_eq!(status, 400);
            assert_eq!(message, "name must not be blank; ontology not found");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/project/1.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .put("project/1.json", &json!({"id": 1}))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("maintenance"));
}

#[tokio::test]
async fn test_non_json_success_body_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/project.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get("project.json", &[]).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_post_sends_json_body_with_metrics_enabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/project.json"))
        .and(body_json(json!({"name": "Lung"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::builder()
        .base_url(format!("{}/api", mock_server.uri()))
        .metrics(MetricsCollector::new())
        .build()
        .unwrap();
    let body = client
        .post("project.json", &json!({"name": "Lung"}))
        .await
        .unwrap();
    assert_eq!(body["id"], 1);
}
