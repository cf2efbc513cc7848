//! Client for the route-planning backend: cities, routes, users, AI chat.
//!
//! ARCHITECTURE
//! ============
//! - [`session`] keeps the bearer token in a persistent key-value store.
//! - [`net::api`] owns the HTTP client and the shared request/response contract.
//! - [`services`] expose one module of async operations per backend resource.
//! - [`guard`] decides whether an in-app navigation proceeds or redirects.
//!
//! Every operation takes its [`Session`] explicitly and returns
//! [`ApiError`] on failure. Nothing is retried or cached.

pub mod config;
pub mod error;
pub mod guard;
pub mod net;
pub mod services;
pub mod session;

pub use config::ApiConfig;
pub use error::{ApiError, ErrorKind};
pub use guard::{AuthState, GuardDecision, NavigationGuard};
pub use net::api::ApiClient;
pub use session::Session;
