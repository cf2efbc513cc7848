use super::*;
use crate::error::ErrorKind;
use crate::net::test_helpers::{MockBackend, TEST_TOKEN, authed_session};

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;

const DEFAULT: &str = "Failed to load data.";

// =============================================================================
// error_message
// =============================================================================

#[test]
fn error_message_prefers_json_detail() {
    assert_eq!(error_message(br#"{"detail":"City not found."}"#, DEFAULT), "City not found.");
}

#[test]
fn error_message_uses_text_when_not_json() {
    assert_eq!(error_message(b"Bad Gateway", DEFAULT), "Bad Gateway");
}

#[test]
fn error_message_empty_body_uses_default() {
    assert_eq!(error_message(b"", DEFAULT), DEFAULT);
}

#[test]
fn error_message_json_without_detail_uses_default() {
    assert_eq!(error_message(br#"{"error":"nope"}"#, DEFAULT), DEFAULT);
    assert_eq!(error_message(br#"{"detail":""}"#, DEFAULT), DEFAULT);
    assert_eq!(error_message(br#"{"detail":null}"#, DEFAULT), DEFAULT);
    assert_eq!(error_message(br#"[1,2]"#, DEFAULT), DEFAULT);
}

#[test]
fn error_message_falsy_detail_uses_default() {
    assert_eq!(error_message(br#"{"detail":false}"#, DEFAULT), DEFAULT);
    assert_eq!(error_message(br#"{"detail":0}"#, DEFAULT), DEFAULT);
    assert_eq!(error_message(br#"{"detail":0.0}"#, DEFAULT), DEFAULT);
    assert_eq!(error_message(br#"{"detail":7}"#, DEFAULT), "7");
}

#[test]
fn error_message_renders_structured_detail_as_json() {
    let body = br#"{"detail":[{"loc":["body","name"],"msg":"field required"}]}"#;
    assert_eq!(error_message(body, DEFAULT), r#"[{"loc":["body","name"],"msg":"field required"}]"#);
}

#[test]
fn error_message_invalid_utf8_uses_default() {
    assert_eq!(error_message(&[0xff, 0xfe, 0x00], DEFAULT), DEFAULT);
}

// =============================================================================
// auth_headers
// =============================================================================

#[test]
fn auth_headers_carry_bearer_and_json_content_type() {
    let headers = auth_headers(&authed_session()).unwrap();
    assert_eq!(headers.get(AUTHORIZATION).unwrap(), &format!("Bearer {TEST_TOKEN}"));
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
}

#[test]
fn auth_headers_without_token_is_unauthenticated() {
    let err = auth_headers(&Session::in_memory()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    assert_eq!(err.status(), Some(401));
}

#[test]
fn auth_headers_reject_token_with_control_characters() {
    let session = Session::in_memory();
    session.set_token("bad\ntoken").unwrap();
    assert_eq!(auth_headers(&session).unwrap_err().kind(), ErrorKind::Unauthenticated);
}

// =============================================================================
// attachment_filename
// =============================================================================

#[test]
fn attachment_filename_reads_quoted_name() {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_DISPOSITION, HeaderValue::from_static("attachment; filename=\"route_4.csv\""));
    assert_eq!(attachment_filename(&headers).as_deref(), Some("route_4.csv"));
}

#[test]
fn attachment_filename_absent_header_is_none() {
    assert_eq!(attachment_filename(&HeaderMap::new()), None);
}

// =============================================================================
// send
// =============================================================================

fn failing_router() -> Router {
    Router::new()
        .route(
            "/json",
            get(|| async { (StatusCode::NOT_FOUND, axum::Json(serde_json::json!({ "detail": "X" }))) }),
        )
        .route("/text", get(|| async { (StatusCode::BAD_GATEWAY, "upstream down").into_response() }))
        .route("/empty", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/ok", get(|| async { axum::Json(serde_json::json!({ "value": 1 })) }))
        .route("/not-json", get(|| async { "plain" }))
}

#[tokio::test]
async fn send_maps_json_detail_to_http_error() {
    let backend = MockBackend::spawn(failing_router()).await;
    let req = backend.client.public(Method::GET, "/json");
    let err = backend.client.send(req, DEFAULT).await.unwrap_err();
    assert_eq!(err, ApiError::http(404, "X"));
}

#[tokio::test]
async fn send_maps_text_body_to_http_error() {
    let backend = MockBackend::spawn(failing_router()).await;
    let req = backend.client.public(Method::GET, "/text");
    let err = backend.client.send(req, DEFAULT).await.unwrap_err();
    assert_eq!(err, ApiError::http(502, "upstream down"));
}

#[tokio::test]
async fn send_maps_empty_body_to_default_message() {
    let backend = MockBackend::spawn(failing_router()).await;
    let req = backend.client.public(Method::GET, "/empty");
    let err = backend.client.send(req, DEFAULT).await.unwrap_err();
    assert_eq!(err, ApiError::http(500, DEFAULT));
}

#[tokio::test]
async fn send_json_decodes_success_body() {
    let backend = MockBackend::spawn(failing_router()).await;
    let req = backend.client.public(Method::GET, "/ok");
    let value: Value = backend.client.send_json(req, DEFAULT).await.unwrap();
    assert_eq!(value, serde_json::json!({ "value": 1 }));
}

#[tokio::test]
async fn send_json_with_wrong_shape_is_invalid_response() {
    let backend = MockBackend::spawn(failing_router()).await;
    let req = backend.client.public(Method::GET, "/not-json");
    let err = backend.client.send_json::<Value>(req, DEFAULT).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Port 1 on loopback refuses connections.
    let config = ApiConfig::default().with_base_url("http://127.0.0.1:1");
    let client = ApiClient::new(&config).unwrap();
    let req = client.public(Method::GET, "/anything");
    let err = client.send(req, DEFAULT).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), None);
}
