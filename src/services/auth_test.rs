use std::collections::HashMap;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde_json::{Value, json};

use super::*;
use crate::config::ApiConfig;
use crate::error::ErrorKind;
use crate::net::test_helpers::MockBackend;

async fn login_handler(Form(form): Form<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let keys_present = ["scope", "grant_type", "client_id", "client_secret"]
        .iter()
        .all(|k| form.contains_key(*k));
    if !keys_present {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": "missing grant fields" })));
    }
    match (form.get("username").map(String::as_str), form.get("password").map(String::as_str)) {
        (Some("ana@example.com"), Some("hunter22")) => {
            (StatusCode::OK, Json(json!({ "access_token": "tok-123", "token_type": "bearer" })))
        }
        (Some("shape@example.com"), _) => (StatusCode::OK, Json(json!({ "token_type": "bearer" }))),
        _ => (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Invalid credentials." }))),
    }
}

fn auth_router() -> Router {
    Router::new()
        .route(LOGIN_PATH, post(login_handler))
        .route(
            REGISTER_PATH,
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "taken@example.com" {
                    return (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Email already registered." })));
                }
                (
                    StatusCode::CREATED,
                    Json(json!({
                        "id": 9,
                        "email": body["email"],
                        "full_name": body.get("full_name"),
                        "created_at": "2025-01-01T00:00:00"
                    })),
                )
            }),
        )
}

// =============================================================================
// login_form
// =============================================================================

#[test]
fn login_form_maps_email_to_username_and_keeps_grant_fields() {
    let grant = LoginGrant { grant_type: "password".to_owned(), ..LoginGrant::default() };
    let form = login_form("a@b.c", "pw", &grant);
    assert_eq!(form[0], ("username", "a@b.c"));
    assert_eq!(form[1], ("password", "pw"));
    assert_eq!(form[2], ("scope", ""));
    assert_eq!(form[3], ("grant_type", "password"));
    assert_eq!(form[4], ("client_id", ""));
    assert_eq!(form[5], ("client_secret", ""));
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_returns_access_token() {
    let backend = MockBackend::spawn(auth_router()).await;
    let token = login(&backend.client, "ana@example.com", "hunter22").await.unwrap();
    assert_eq!(token, "tok-123");
}

#[tokio::test]
async fn login_blank_fields_fail_without_request() {
    let backend = MockBackend::spawn(auth_router()).await;
    for (email, password) in [("", "pw"), ("a@b.c", ""), ("  ", "pw")] {
        let err = login(&backend.client, email, password).await.unwrap_err();
        assert_eq!(err, ApiError::validation(MISSING_CREDENTIALS_MESSAGE));
    }
    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn login_rejection_surfaces_server_detail() {
    let backend = MockBackend::spawn(auth_router()).await;
    let err = login(&backend.client, "ana@example.com", "wrong").await.unwrap_err();
    assert_eq!(err, ApiError::http(400, "Invalid credentials."));
}

#[tokio::test]
async fn login_without_access_token_is_invalid_response() {
    let backend = MockBackend::spawn(auth_router()).await;
    let err = login(&backend.client, "shape@example.com", "pw").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn login_unreachable_server_is_transport_error() {
    let client = ApiClient::new(&ApiConfig::default().with_base_url("http://127.0.0.1:1")).unwrap();
    let err = login(&client, "ana@example.com", "hunter22").await.unwrap_err();
    assert_eq!(err, ApiError::transport());
}

#[tokio::test]
async fn login_empty_error_body_uses_login_default() {
    let router = Router::new().route(LOGIN_PATH, post(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let backend = MockBackend::spawn(router).await;
    let err = login(&backend.client, "ana@example.com", "hunter22").await.unwrap_err();
    assert_eq!(err, ApiError::http(503, LOGIN_FAILED_MESSAGE));
}

// =============================================================================
// register / logout
// =============================================================================

#[tokio::test]
async fn register_returns_created_user() {
    let backend = MockBackend::spawn(auth_router()).await;
    let new_user = NewUser {
        email: "new@example.com".to_owned(),
        password: "longpassword".to_owned(),
        full_name: Some("New Person".to_owned()),
    };
    let user = register(&backend.client, &new_user).await.unwrap();
    assert_eq!(user.id, 9);
    assert_eq!(user.email, "new@example.com");
    assert_eq!(user.full_name.as_deref(), Some("New Person"));
}

#[tokio::test]
async fn register_duplicate_surfaces_detail() {
    let backend = MockBackend::spawn(auth_router()).await;
    let new_user = NewUser {
        email: "taken@example.com".to_owned(),
        password: "longpassword".to_owned(),
        full_name: None,
    };
    let err = register(&backend.client, &new_user).await.unwrap_err();
    assert_eq!(err, ApiError::http(400, "Email already registered."));
}

#[tokio::test]
async fn register_blank_password_fails_without_request() {
    let backend = MockBackend::spawn(auth_router()).await;
    let new_user = NewUser { email: "a@b.c".to_owned(), password: String::new(), full_name: None };
    let err = register(&backend.client, &new_user).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(backend.hits(), 0);
}

#[test]
fn logout_clears_token() {
    let session = Session::in_memory();
    session.set_token("tok").unwrap();
    logout(&session).unwrap();
    assert_eq!(session.token(), None);
}
