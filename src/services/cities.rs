//! Cities service: the user's registered cities.

#[cfg(test)]
#[path = "cities_test.rs"]
mod cities_test;

use reqwest::Method;

use crate::error::ApiError;
use crate::net::api::ApiClient;
use crate::net::types::{City, CityId, CityInput};
use crate::session::Session;

pub const CITIES_PATH: &str = "/api/cities/";
pub const CITIES_FAILED_MESSAGE: &str = "Failed to process your request.";

fn city_path(city_id: CityId) -> String {
    format!("/api/cities/{city_id}")
}

/// List all cities owned by the signed-in user.
///
/// # Errors
///
/// [`ApiError::Unauthenticated`] without a token, otherwise the shared
/// request errors.
pub async fn list(client: &ApiClient, session: &Session) -> Result<Vec<City>, ApiError> {
    let request = client.authed(session, Method::GET, CITIES_PATH)?;
    client.send_json(request, CITIES_FAILED_MESSAGE).await
}

/// Register a new city.
///
/// # Errors
///
/// As [`list`].
pub async fn create(client: &ApiClient, session: &Session, city: &CityInput) -> Result<City, ApiError> {
    let request = client.authed(session, Method::POST, CITIES_PATH)?.json(city);
    client.send_json(request, CITIES_FAILED_MESSAGE).await
}

/// Replace the given fields of an existing city.
///
/// # Errors
///
/// As [`list`].
pub async fn update(
    client: &ApiClient,
    session: &Session,
    city_id: CityId,
    city: &CityInput,
) -> Result<City, ApiError> {
    let request = client.authed(session, Method::PUT, &city_path(city_id))?.json(city);
    client.send_json(request, CITIES_FAILED_MESSAGE).await
}

/// Delete a city.
///
/// # Errors
///
/// As [`list`].
pub async fn delete(client: &ApiClient, session: &Session, city_id: CityId) -> Result<(), ApiError> {
    let request = client.authed(session, Method::DELETE, &city_path(city_id))?;
    client.send_empty(request, CITIES_FAILED_MESSAGE).await
}
