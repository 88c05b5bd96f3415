#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use flowkit_api::config::ServerConfig;
use flowkit_api::router::build_app_router;
use flowkit_api::state::AppState;
use flowkit_core::app_id::AppId;
use flowkit_store::InMemoryFlowRepo;

/// App id of the default editor session in every test app.
pub const DEFAULT_APP_ID: &str = "my-onboarding-flow-test0001";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        app_id_cache_path: std::env::temp_dir().join("flowkit-test-app-id.json"),
        public_base_url: "http://flowkit.test".to_string(),
        max_sessions: 8,
    }
}

/// Build the full application router over fresh in-memory state, using the
/// same middleware stack as `main.rs`.
///
/// The state is returned too so tests can inspect sessions and published
/// flows directly.
pub async fn build_test_app() -> (Router, AppState) {
    let config = test_config();
    let state = AppState::new(
        config.clone(),
        Arc::new(InMemoryFlowRepo::new()),
        AppId::parse(DEFAULT_APP_ID).unwrap(),
    )
    .await;
    (build_app_router(state.clone(), &config), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn patch_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

pub async fn post_empty(app: &Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Create a session through the API and return its app id.
pub async fn create_session(app: &Router, name: &str) -> String {
    let response = post_json(app, "/api/v1/editor/sessions", serde_json::json!({ "name": name })).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["appId"]
        .as_str()
        .unwrap()
        .to_string()
}

pub fn session_uri(app_id: &str, rest: &str) -> String {
    format!("/api/v1/editor/sessions/{app_id}{rest}")
}
