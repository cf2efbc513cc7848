//! Auth service: login, registration, logout.
//!
//! Login exchanges credentials for a bearer token using the backend's
//! OAuth2 password form. It returns the token; persisting it is the
//! caller's job (see [`Session::set_token`]).

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use reqwest::Method;

use crate::config::LoginGrant;
use crate::error::ApiError;
use crate::net::api::{self, ApiClient};
use crate::net::types::{NewUser, TokenResponse, User};
use crate::session::Session;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";

pub const LOGIN_FAILED_MESSAGE: &str = "Authentication failed.";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed.";
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Enter your email and password to continue.";

/// URL-encoded body fields for the login form, in send order.
pub(crate) fn login_form<'a>(email: &'a str, password: &'a str, grant: &'a LoginGrant) -> [(&'static str, &'a str); 6] {
    [
        ("username", email),
        ("password", password),
        ("scope", grant.scope.as_str()),
        ("grant_type", grant.grant_type.as_str()),
        ("client_id", grant.client_id.as_str()),
        ("client_secret", grant.client_secret.as_str()),
    ]
}

fn require_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(ApiError::validation(MISSING_CREDENTIALS_MESSAGE));
    }
    Ok(())
}

/// Exchange `email` and `password` for an access token.
///
/// # Errors
///
/// - [`ApiError::Validation`] if either field is blank (nothing is sent).
/// - [`ApiError::Transport`] if the server cannot be reached.
/// - [`ApiError::Http`] if the server rejects the credentials.
/// - [`ApiError::InvalidResponse`] if the reply has no `access_token`.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<String, ApiError> {
    require_credentials(email, password)?;

    let form = login_form(email, password, client.login_grant());
    let request = client.public(Method::POST, LOGIN_PATH).form(&form);
    let response = client.send(request, LOGIN_FAILED_MESSAGE).await?;
    let status = response.status().as_u16();

    let body: TokenResponse = api::read_json(response).await?;
    let token = body
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::invalid_response(status))?;
    tracing::info!("login succeeded");
    Ok(token)
}

/// Create an account. Does not sign the new user in.
///
/// # Errors
///
/// [`ApiError::Validation`] if email or password is blank, otherwise as
/// [`login`] minus the token check.
pub async fn register(client: &ApiClient, user: &NewUser) -> Result<User, ApiError> {
    require_credentials(&user.email, &user.password)?;
    let request = client.public(Method::POST, REGISTER_PATH).json(user);
    client.send_json(request, REGISTER_FAILED_MESSAGE).await
}

/// Forget the stored token. The backend keeps no server-side session.
///
/// # Errors
///
/// Returns [`ApiError::Storage`] if the session store cannot be written.
pub fn logout(session: &Session) -> Result<(), ApiError> {
    session.clear_token()?;
    tracing::info!("logged out");
    Ok(())
}
