//! Users service: the signed-in account.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use reqwest::Method;

use crate::error::ApiError;
use crate::net::api::ApiClient;
use crate::net::types::User;
use crate::session::Session;

pub const CURRENT_USER_PATH: &str = "/api/auth/me";
pub const USERS_FAILED_MESSAGE: &str = "Failed to load data.";

/// Fetch the account that owns the session's token.
///
/// # Errors
///
/// [`ApiError::Unauthenticated`] without a token, otherwise the shared
/// request errors.
pub async fn current_user(client: &ApiClient, session: &Session) -> Result<User, ApiError> {
    let request = client.authed(session, Method::GET, CURRENT_USER_PATH)?;
    client.send_json(request, USERS_FAILED_MESSAGE).await
}
