//! Fetch tests for `OnboardingService` against a mock flow service.

use std::time::Duration;

use assert_matches::assert_matches;
use flowkit_core::app_id::AppId;
use flowkit_core::slide::OnboardingFlow;
use flowkit_sdk::{FetchError, LoadFailureKind, OnboardingService};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_id() -> AppId {
    AppId::parse("fitness-abc12345").unwrap()
}

#[tokio::test]
async fn fetch_unwraps_data_envelope() {
    let server = MockServer::start().await;
    let flow = OnboardingFlow::default();
    Mock::given(method("GET"))
        .and(path("/api/v1/flows/fitness-abc12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": flow })))
        .mount(&server)
        .await;

    let fetched = OnboardingService::new(server.uri())
        .fetch_flow(&app_id())
        .await
        .unwrap();
    assert_eq!(fetched, flow);
}

#[tokio::test]
async fn non_success_status_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "x", "code": "NOT_FOUND" })))
        .mount(&server)
        .await;

    let err = OnboardingService::new(server.uri())
        .fetch_flow(&app_id())
        .await
        .unwrap_err();
    assert_matches!(err, FetchError::ServerError { status: 404 });
}

#[tokio::test]
async fn empty_body_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = OnboardingService::new(server.uri())
        .fetch_flow(&app_id())
        .await
        .unwrap_err();
    assert_matches!(err, FetchError::NoData);
}

#[tokio::test]
async fn wrong_shape_is_decoding_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "slides": 3 } })))
        .mount(&server)
        .await;

    let err = OnboardingService::new(server.uri())
        .fetch_flow(&app_id())
        .await
        .unwrap_err();
    assert_matches!(err, FetchError::Decoding(_));
    assert!(err.load_failure().is_none());
}

#[tokio::test]
async fn slow_service_times_out_as_connectivity_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": OnboardingFlow::default() }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let err = OnboardingService::with_client(client, server.uri())
        .fetch_flow(&app_id())
        .await
        .unwrap_err();

    let failure = err.load_failure().expect("transport errors classify");
    assert_eq!(failure.kind, LoadFailureKind::TimedOut);
    assert_eq!(failure.message(), "Connection timed out");
}

#[tokio::test]
async fn refused_connection_cannot_connect() {
    // Bind then drop a listener so the port is closed.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let err = OnboardingService::new(format!("http://{addr}"))
        .fetch_flow(&app_id())
        .await
        .unwrap_err();

    assert_matches!(err, FetchError::Transport(_));
    assert_eq!(
        err.load_failure().unwrap().kind,
        LoadFailureKind::CannotConnectToHost
    );
}
