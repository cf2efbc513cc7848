//! Resource services: one module per backend entity.
//!
//! DESIGN
//! ======
//! Each service is a set of free async functions taking the shared
//! [`ApiClient`](crate::net::api::ApiClient) and, for authenticated calls, the
//! caller's [`Session`](crate::session::Session). Every call is one round trip
//! through the contract in [`crate::net::api`]; the only per-module knowledge
//! is the path, the body, and the fallback error message.

pub mod ai;
pub mod auth;
pub mod cities;
pub mod routes;
pub mod users;
