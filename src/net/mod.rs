//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the HTTP client and the shared request/response contract;
//! `types` defines the wire schema the services exchange with the backend.

pub mod api;
pub mod types;

// =============================================================================
// TEST HELPERS
// =============================================================================
