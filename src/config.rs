//! Client configuration parsed from environment variables.

use std::path::PathBuf;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const SESSION_FILE_NAME: &str = "session.json";
pub const APP_DIR_NAME: &str = "routeplanner";

/// Extra OAuth2 password-grant fields sent with every login form.
///
/// The backend accepts them empty; they stay configurable so a deployment
/// that expects real values can supply them without a code change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginGrant {
    pub scope: String,
    pub grant_type: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub session_file: PathBuf,
    pub login_grant: LoginGrant,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            session_file: default_session_file(),
            login_grant: LoginGrant::default(),
        }
    }
}

impl ApiConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `ROUTEPLANNER_API_BASE_URL`: default `http://localhost:8000`
    /// - `ROUTEPLANNER_SESSION_FILE`: default `<config dir>/routeplanner/session.json`
    /// - `ROUTEPLANNER_LOGIN_SCOPE`, `ROUTEPLANNER_LOGIN_GRANT_TYPE`,
    ///   `ROUTEPLANNER_LOGIN_CLIENT_ID`, `ROUTEPLANNER_LOGIN_CLIENT_SECRET`: default empty
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = normalize_base_url(
            &std::env::var("ROUTEPLANNER_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned()),
        );
        let session_file = std::env::var_os("ROUTEPLANNER_SESSION_FILE")
            .filter(|raw| !raw.is_empty())
            .map_or_else(default_session_file, PathBuf::from);
        let login_grant = LoginGrant {
            scope: env_or_empty("ROUTEPLANNER_LOGIN_SCOPE"),
            grant_type: env_or_empty("ROUTEPLANNER_LOGIN_GRANT_TYPE"),
            client_id: env_or_empty("ROUTEPLANNER_LOGIN_CLIENT_ID"),
            client_secret: env_or_empty("ROUTEPLANNER_LOGIN_CLIENT_SECRET"),
        };

        Self { base_url, session_file, login_grant }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }
}

/// Strip a single trailing slash; an empty value falls back to the default.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_API_BASE_URL.to_owned();
    }
    trimmed.strip_suffix('/').unwrap_or(trimmed).to_owned()
}

fn env_or_empty(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}

fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join(SESSION_FILE_NAME)
}
