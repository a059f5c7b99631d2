#![allow(clippy::unwrap_used)]
// Integration tests for `ActuationClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cellgate_api::{ActuationClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

const ACTUATION_PATH: &str = "/api/EVOhttp/EVOWTMMomentaryActuationRequest";

async fn setup() -> (MockServer, ActuationClient) {
    let server = MockServer::start().await;
    let url = Url::parse(&format!("{}{ACTUATION_PATH}", server.uri())).unwrap();
    let client = ActuationClient::with_client(reqwest::Client::new(), url);
    (server, client)
}

// ── Success ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_actuate_posts_json_body() {
    let (server, client) = setup().await;
    let payload = json!({ "siteId": "A1", "deviceId": "G7" });

    Mock::given(method("POST"))
        .and(path(ACTUATION_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client.actuate(&payload).await.unwrap();

    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.body, "OK");
}

#[tokio::test]
async fn test_actuate_accepts_any_2xx() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(ACTUATION_PATH))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let receipt = client.actuate(&json!({})).await.unwrap();
    assert_eq!(receipt.status, 202);
    assert!(receipt.body.is_empty());
}

#[tokio::test]
async fn test_actuate_sends_nested_payload_unchanged() {
    let (server, client) = setup().await;
    let payload = json!({
        "Credentials": { "user": "gate@example.com", "token": "t0k" },
        "Relays": [1, 2],
        "Momentary": true
    });

    Mock::given(method("POST"))
        .and(path(ACTUATION_PATH))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.actuate(&payload).await.unwrap();
}

// ── Failure ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_actuate_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(ACTUATION_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("relay offline"))
        .mount(&server)
        .await;

    let result = client.actuate(&json!({ "siteId": "A1" })).await;

    match result {
        Err(Error::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "relay offline");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_actuate_truncates_long_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(ACTUATION_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("x".repeat(1000)))
        .mount(&server)
        .await;

    let err = client.actuate(&json!({})).await.unwrap_err();
    match err {
        Error::Status { body, .. } => assert_eq!(body.len(), 200),
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_actuate_connection_refused() {
    // Bind then drop a server so the port is (almost certainly) closed.
    let server = MockServer::start().await;
    let url = Url::parse(&format!("{}{ACTUATION_PATH}", server.uri())).unwrap();
    drop(server);

    let client = ActuationClient::with_client(reqwest::Client::new(), url);
    let err = client.actuate(&json!({})).await.unwrap_err();

    assert!(
        matches!(err, Error::Transport(_)),
        "expected Transport error, got: {err:?}"
    );
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_actuate_times_out() {
    let (server, _) = setup().await;

    Mock::given(method("POST"))
        .and(path(ACTUATION_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let http = TransportConfig::default()
        .with_timeout(Duration::from_millis(200))
        .build_client()
        .unwrap();
    let url = Url::parse(&format!("{}{ACTUATION_PATH}", server.uri())).unwrap();
    let client = ActuationClient::with_client(http, url);

    let err = client.actuate(&json!({})).await.unwrap_err();
    match err {
        Error::Transport(ref e) => assert!(e.is_timeout(), "expected timeout, got: {e}"),
        other => panic!("expected Transport error, got: {other:?}"),
    }
}
