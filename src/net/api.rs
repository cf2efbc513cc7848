//! REST plumbing shared by every resource service.
//!
//! SYSTEM CONTEXT
//! ==============
//! Services build a request through [`ApiClient`], which attaches the bearer
//! token from the caller's [`Session`] and sends exactly one HTTP call.
//!
//! ERROR HANDLING
//! ==============
//! A missing token fails before anything is sent. Non-success responses are
//! turned into [`ApiError::Http`] by [`error_message`]: JSON `detail` first,
//! then the raw body text, then the operation's default message.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ApiConfig, LoginGrant};
use crate::error::ApiError;
use crate::session::Session;

/// HTTP client bound to one backend. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    login_grant: LoginGrant,
}

impl ApiClient {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Setup`] if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build().map_err(|e| {
            tracing::error!(error = %e, "http client build failed");
            ApiError::setup()
        })?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            login_grant: config.login_grant.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn login_grant(&self) -> &LoginGrant {
        &self.login_grant
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Start a request that needs no token.
    pub(crate) fn public(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "api request");
        self.http.request(method, self.url(path))
    }

    /// Start a request carrying the session's bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] when no token is stored.
    pub(crate) fn authed(&self, session: &Session, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let headers = auth_headers(session)?;
        Ok(self.public(method, path).headers(headers))
    }

    /// Send one request and map failures per the shared contract.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if no response arrives and
    /// [`ApiError::Http`] for non-success statuses.
    pub(crate) async fn send(&self, request: RequestBuilder, default_message: &str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "api request failed to reach server");
            ApiError::transport()
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = error_message(&body, default_message);
        tracing::warn!(status = status.as_u16(), %message, "api request rejected");
        Err(ApiError::http(status.as_u16(), message))
    }

    /// Send and decode a JSON success body.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send`], plus [`ApiError::InvalidResponse`] when the
    /// success body does not decode as `T`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        default_message: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, default_message).await?;
        read_json(response).await
    }

    /// Send and discard the success body.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send`].
    pub(crate) async fn send_empty(&self, request: RequestBuilder, default_message: &str) -> Result<(), ApiError> {
        self.send(request, default_message).await.map(|_| ())
    }
}

/// Headers for an authenticated JSON request.
///
/// # Errors
///
/// Returns [`ApiError::Unauthenticated`] when the session holds no usable token.
pub fn auth_headers(session: &Session) -> Result<HeaderMap, ApiError> {
    let token = session.token().ok_or_else(ApiError::unauthenticated)?;
    let bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| ApiError::unauthenticated())?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Resolve a human-readable message from a failed response body.
///
/// A body that parses as JSON answers from its `detail` field alone; a
/// missing or falsy `detail` (`null`, `false`, `0`, `""`) yields
/// `default_message`. A non-JSON body is used as text when it is non-empty
/// UTF-8.
#[must_use]
pub fn error_message(body: &[u8], default_message: &str) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => detail_message(&value).unwrap_or_else(|| default_message.to_owned()),
        Err(_) => match std::str::from_utf8(body) {
            Ok(text) if !text.is_empty() => text.to_owned(),
            _ => default_message.to_owned(),
        },
    }
}

fn detail_message(value: &Value) -> Option<String> {
    match value.get("detail")? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(|e| {
        tracing::warn!(error = %e, "api response body unreadable");
        ApiError::invalid_response(status)
    })?;
    serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, status, "api response did not match expected shape");
        ApiError::invalid_response(status)
    })
}

/// Pull `filename` out of a `Content-Disposition` header value.
pub(crate) fn attachment_filename(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    raw.split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_owned())
        .filter(|name| !name.is_empty())
}
