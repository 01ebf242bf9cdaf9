mod common;

use std::time::Duration;

use auth::Principal;
use auth::TokenStore;
use common::GiteaBehaviour;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

fn alice_and_bob() -> GiteaBehaviour {
    GiteaBehaviour::users(&[
        ("alice", "s3cret", &["teamA", "teamB"]),
        ("bob", "hunter2", &[]),
    ])
}

#[tokio::test]
async fn test_authenticate_then_serve_from_cache() {
    let app = TestApp::spawn(alice_and_bob()).await;

    let response = app.authenticate("alice", "s3cret").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["labels"], json!({ "group": ["teamA", "teamB"] }));
    assert_eq!(app.gitea.calls(), 1);

    // Second call inside the revalidation window never reaches Gitea
    let response = app.authenticate("alice", "s3cret").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["labels"], json!({ "group": ["teamA", "teamB"] }));
    assert_eq!(app.gitea.calls(), 1);
}

#[tokio::test]
async fn test_remote_rejection_creates_no_cache_record() {
    let app = TestApp::spawn(alice_and_bob()).await;

    let response = app.authenticate("bob", "not-hunter2").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid credentials");
    assert!(app.token_store.is_empty().await);
}

#[tokio::test]
async fn test_cached_principal_with_wrong_password() {
    let app = TestApp::spawn(alice_and_bob()).await;

    let response = app.authenticate("alice", "s3cret").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.gitea.calls(), 1);

    let response = app.authenticate("alice", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.gitea.calls(), 1);
}

#[tokio::test]
async fn test_user_without_organizations() {
    let app = TestApp::spawn(alice_and_bob()).await;

    let response = app.authenticate("bob", "hunter2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["labels"], json!({ "group": [] }));
}

#[tokio::test]
async fn test_expired_cache_revalidates_and_keeps_single_record() {
    let app = TestApp::spawn_with_revalidation(alice_and_bob(), Duration::ZERO).await;

    for _ in 0..2 {
        let response = app.authenticate("alice", "s3cret").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(app.gitea.calls(), 2);
    assert_eq!(app.token_store.len().await, 1);

    let principal = Principal::new("alice".to_string()).unwrap();
    let record = app
        .token_store
        .get(&principal)
        .await
        .unwrap()
        .expect("Missing cache record");
    assert_eq!(record.labels.groups(), ["teamA".to_string(), "teamB".to_string()]);
}

#[tokio::test]
async fn test_gitea_server_error_is_service_unavailable() {
    let app = TestApp::spawn(GiteaBehaviour::Status(StatusCode::INTERNAL_SERVER_ERROR)).await;

    let response = app.authenticate("alice", "s3cret").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(app.token_store.is_empty().await);
}

#[tokio::test]
async fn test_malformed_gitea_response_is_bad_gateway() {
    let app = TestApp::spawn(GiteaBehaviour::Body("<html>maintenance</html>".to_string())).await;

    let response = app.authenticate("alice", "s3cret").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(app.token_store.is_empty().await);
}

#[tokio::test]
async fn test_empty_username_is_rejected_without_remote_call() {
    let app = TestApp::spawn(alice_and_bob()).await;

    let response = app.authenticate("", "s3cret").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.gitea.calls(), 0);
}

#[tokio::test]
async fn test_error_body_never_echoes_credentials() {
    let app = TestApp::spawn(GiteaBehaviour::Status(StatusCode::BAD_GATEWAY)).await;

    let response = app.authenticate("alice", "super-secret-value").await;
    let body = response.text().await.expect("Failed to read body");

    assert!(!body.contains("super-secret-value"));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn(alice_and_bob()).await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["provider"], "gitea");
}
