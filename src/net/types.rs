//! Request and response payloads for the route-planning API.
//!
//! DESIGN
//! ======
//! These mirror the backend schemas loosely: identifiers and the fields the
//! client reads are required, everything the server may omit is optional.
//! No client-side validation happens here.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

pub type CityId = i64;
pub type RouteId = i64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Registration payload for `POST /api/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Where a city sits in the user's itinerary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CityRole {
    Origin,
    Destination,
    #[default]
    Intermediate,
}

impl std::str::FromStr for CityRole {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "origin" => Ok(Self::Origin),
            "destination" => Ok(Self::Destination),
            "intermediate" => Ok(Self::Intermediate),
            other => Err(format!("unknown city role '{other}' (expected origin, destination or intermediate)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub state: String,
    #[serde(default)]
    pub role: CityRole,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for city create/update. Omitted fields are left to the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CityInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<CityRole>,
}

/// Planning fields shared by every route view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub itinerary: String,
    #[serde(default)]
    pub travel_date: Option<String>,
    #[serde(default)]
    pub distance_km: Option<String>,
    #[serde(default)]
    pub travel_time: Option<String>,
    #[serde(default)]
    pub cost_brl: Option<String>,
    #[serde(default)]
    pub trip_type: Option<String>,
    #[serde(default)]
    pub transport_type: Option<String>,
}

/// A route as returned by list endpoints and AI chat replies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub id: RouteId,
    #[serde(flatten)]
    pub plan: RoutePlan,
}

/// A single route with its planning details.
///
/// The detail endpoint does not echo the route id; callers already hold it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDetail {
    #[serde(flatten)]
    pub plan: RoutePlan,
    #[serde(default)]
    pub lodging: Option<String>,
    #[serde(default)]
    pub food: Option<String>,
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default)]
    pub estimated_spend_brl: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for `DELETE /api/routes/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteBulkDelete<'a> {
    pub route_ids: &'a [RouteId],
}

/// Body for `POST /api/ai/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub routes: Vec<RouteSummary>,
}

/// Raw CSV download for one route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    pub bytes: Vec<u8>,
    /// Filename suggested by the server's `Content-Disposition`, if any.
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}
