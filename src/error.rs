//! Tagged error type shared by every client operation.
//!
//! DESIGN
//! ======
//! Each failure carries a kind, a human-readable message, and the HTTP status
//! when one applies. Callers match on [`ErrorKind`] instead of inspecting
//! strings; the front end only ever needs [`ApiError::message`] and
//! [`ApiError::status`] to render it.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Message used when no token is stored.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please sign in again.";

/// Message used when the server cannot be reached at all.
pub const CONNECTIVITY_MESSAGE: &str = "Could not connect to the server. Check your network.";

/// Message used when the local HTTP client cannot be constructed.
pub const SETUP_MESSAGE: &str = "Could not initialise the HTTP client.";

/// Message used when a success response lacks an expected field.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid server response.";

/// Coarse category of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unauthenticated,
    Transport,
    Http,
    InvalidResponse,
    Storage,
    Setup,
}

/// Errors produced by session, service, and guard operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Required input was missing or blank. Raised before any request.
    #[error("{message}")]
    Validation { message: String },

    /// No token is stored. Raised before any request.
    #[error("{message}")]
    Unauthenticated { message: String },

    /// The request never produced a response.
    #[error("{message}")]
    Transport { message: String },

    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },

    /// The server answered with success but the body had the wrong shape.
    #[error("{message}")]
    InvalidResponse { status: u16, message: String },

    /// The session store could not be written.
    #[error("session storage failed: {message}")]
    Storage { message: String },

    /// The client could not be set up locally. Nothing was sent.
    #[error("{message}")]
    Setup { message: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated { message: SESSION_EXPIRED_MESSAGE.to_owned() }
    }

    #[must_use]
    pub fn transport() -> Self {
        Self::Transport { message: CONNECTIVITY_MESSAGE.to_owned() }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http { status, message: message.into() }
    }

    #[must_use]
    pub fn invalid_response(status: u16) -> Self {
        Self::InvalidResponse { status, message: INVALID_RESPONSE_MESSAGE.to_owned() }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage { message: message.into() }
    }

    #[must_use]
    pub fn setup() -> Self {
        Self::Setup { message: SETUP_MESSAGE.to_owned() }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Unauthenticated { .. } => ErrorKind::Unauthenticated,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Http { .. } => ErrorKind::Http,
            Self::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            Self::Storage { .. } => ErrorKind::Storage,
            Self::Setup { .. } => ErrorKind::Setup,
        }
    }

    /// HTTP status associated with the failure, if any.
    ///
    /// Missing-token failures report 401 even though no request was sent.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthenticated { .. } => Some(401),
            Self::Http { status, .. } | Self::InvalidResponse { status, .. } => Some(*status),
            Self::Validation { .. } | Self::Transport { .. } | Self::Storage { .. } | Self::Setup { .. } => None,
        }
    }

    /// The human-readable message without any status decoration.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::Unauthenticated { message }
            | Self::Transport { message }
            | Self::Http { message, .. }
            | Self::InvalidResponse { message, .. }
            | Self::Storage { message }
            | Self::Setup { message } => message,
        }
    }

    /// Stable, grepable code for logs and scripted callers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "E_VALIDATION",
            Self::Unauthenticated { .. } => "E_UNAUTHENTICATED",
            Self::Transport { .. } => "E_TRANSPORT",
            Self::Http { .. } => "E_HTTP",
            Self::InvalidResponse { .. } => "E_INVALID_RESPONSE",
            Self::Storage { .. } => "E_STORAGE",
            Self::Setup { .. } => "E_SETUP",
        }
    }
}
