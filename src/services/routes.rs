//! Routes service: saved route plans and their CSV exports.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use reqwest::Method;

use crate::error::ApiError;
use crate::net::api::{self, ApiClient};
use crate::net::types::{CsvExport, RouteBulkDelete, RouteDetail, RouteId, RouteSummary};
use crate::session::Session;

pub const ROUTES_PATH: &str = "/api/routes/";
pub const ROUTES_FAILED_MESSAGE: &str = "Failed to load data.";
pub const NO_ROUTES_SELECTED_MESSAGE: &str = "Select at least one route.";

fn route_path(route_id: RouteId) -> String {
    format!("/api/routes/{route_id}")
}

fn route_csv_path(route_id: RouteId) -> String {
    format!("/api/routes/{route_id}/csv")
}

/// List the signed-in user's routes, newest first.
///
/// # Errors
///
/// [`ApiError::Unauthenticated`] without a token, otherwise the shared
/// request errors.
pub async fn list(client: &ApiClient, session: &Session) -> Result<Vec<RouteSummary>, ApiError> {
    let request = client.authed(session, Method::GET, ROUTES_PATH)?;
    client.send_json(request, ROUTES_FAILED_MESSAGE).await
}

/// Fetch one route with its planning details.
///
/// # Errors
///
/// As [`list`].
pub async fn get(client: &ApiClient, session: &Session, route_id: RouteId) -> Result<RouteDetail, ApiError> {
    let request = client.authed(session, Method::GET, &route_path(route_id))?;
    client.send_json(request, ROUTES_FAILED_MESSAGE).await
}

/// Download a route as CSV. The body is returned untouched.
///
/// # Errors
///
/// As [`list`], plus [`ApiError::InvalidResponse`] if the body cannot be read.
pub async fn csv(client: &ApiClient, session: &Session, route_id: RouteId) -> Result<CsvExport, ApiError> {
    let request = client.authed(session, Method::GET, &route_csv_path(route_id))?;
    let response = client.send(request, ROUTES_FAILED_MESSAGE).await?;
    let status = response.status().as_u16();
    let filename = api::attachment_filename(response.headers());
    let bytes = response.bytes().await.map_err(|e| {
        tracing::warn!(error = %e, route_id, "csv body unreadable");
        ApiError::invalid_response(status)
    })?;
    Ok(CsvExport { bytes: bytes.to_vec(), filename })
}

/// Delete several routes in one request.
///
/// # Errors
///
/// [`ApiError::Validation`] when `route_ids` is empty (nothing is sent),
/// otherwise as [`list`].
pub async fn delete_many(client: &ApiClient, session: &Session, route_ids: &[RouteId]) -> Result<(), ApiError> {
    if route_ids.is_empty() {
        return Err(ApiError::validation(NO_ROUTES_SELECTED_MESSAGE));
    }
    let body = RouteBulkDelete { route_ids };
    let request = client.authed(session, Method::DELETE, ROUTES_PATH)?.json(&body);
    client.send_empty(request, ROUTES_FAILED_MESSAGE).await
}
