//! Navigation guard: decides whether an in-app navigation proceeds.
//!
//! SYSTEM CONTEXT
//! ==============
//! Front ends call [`NavigationGuard::check`] before every route change. The
//! guard reads the session's token and nothing else; it never changes
//! session state.
//!
//! RULES
//! =====
//! - auth-required route, no token → login, with `?redirect=<original path>`
//! - login or registration route, token present → home
//! - anything else → proceed unchanged

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use url::form_urlencoded;

use crate::session::Session;

/// Query parameter carrying the path to resume after login.
pub const REDIRECT_PARAM: &str = "redirect";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    Login,
    Register,
    Home,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    pub name: RouteName,
    pub path: &'static str,
    pub requires_auth: bool,
}

/// Declared app routes, matched by exact path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![
            RouteDef { name: RouteName::Login, path: "/", requires_auth: false },
            RouteDef { name: RouteName::Register, path: "/register", requires_auth: false },
            RouteDef { name: RouteName::Home, path: "/home", requires_auth: true },
        ])
    }
}

impl RouteTable {
    #[must_use]
    pub fn new(routes: Vec<RouteDef>) -> Self {
        Self { routes }
    }

    /// Find the route for `full_path`, ignoring query, fragment and a trailing slash.
    #[must_use]
    pub fn resolve(&self, full_path: &str) -> Option<&RouteDef> {
        let path = route_path(full_path);
        self.routes.iter().find(|route| route.path == path)
    }

    /// Declared path for `name`; falls back to `/` if the table omits it.
    #[must_use]
    pub fn path_of(&self, name: RouteName) -> &'static str {
        self.routes
            .iter()
            .find(|route| route.name == name)
            .map_or("/", |route| route.path)
    }
}

fn route_path(full_path: &str) -> &str {
    let end = full_path.find(['?', '#']).unwrap_or(full_path.len());
    let path = &full_path[..end];
    if path.len() > 1 { path.trim_end_matches('/') } else { path }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Authenticated,
    Unauthenticated,
}

impl AuthState {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        if session.is_authenticated() { Self::Authenticated } else { Self::Unauthenticated }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
}

#[derive(Debug, Clone, Default)]
pub struct NavigationGuard {
    routes: RouteTable,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(routes: RouteTable) -> Self {
        Self { routes }
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Evaluate a navigation to `full_path` against the stored session.
    #[must_use]
    pub fn check(&self, full_path: &str, session: &Session) -> GuardDecision {
        self.evaluate(full_path, AuthState::from_session(session))
    }

    /// Evaluate a navigation to `full_path` for a known auth state.
    #[must_use]
    pub fn evaluate(&self, full_path: &str, state: AuthState) -> GuardDecision {
        let Some(route) = self.routes.resolve(full_path) else {
            return GuardDecision::Proceed;
        };

        match state {
            AuthState::Unauthenticated if route.requires_auth => {
                let login = self.routes.path_of(RouteName::Login);
                tracing::debug!(target_path = full_path, "guard: sign-in required");
                GuardDecision::Redirect(login_redirect(login, full_path))
            }
            AuthState::Authenticated if matches!(route.name, RouteName::Login | RouteName::Register) => {
                tracing::debug!(target_path = full_path, "guard: already signed in");
                GuardDecision::Redirect(self.routes.path_of(RouteName::Home).to_owned())
            }
            _ => GuardDecision::Proceed,
        }
    }

    /// Where to go after a successful login made from `login_full_path`.
    ///
    /// Honors the `redirect` parameter when it names an in-app path;
    /// anything else lands on home.
    #[must_use]
    pub fn post_login_target(&self, login_full_path: &str) -> String {
        let home = self.routes.path_of(RouteName::Home);
        let Some(target) = redirect_param(login_full_path) else {
            return home.to_owned();
        };
        let in_app = target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\");
        let is_auth_page = self
            .routes
            .resolve(&target)
            .is_some_and(|route| matches!(route.name, RouteName::Login | RouteName::Register));
        if in_app && !is_auth_page { target } else { home.to_owned() }
    }
}

fn login_redirect(login_path: &str, full_path: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(full_path.as_bytes()).collect();
    format!("{login_path}?{REDIRECT_PARAM}={encoded}")
}

/// Decoded `redirect` query value of `full_path`, if present and non-empty.
#[must_use]
pub fn redirect_param(full_path: &str) -> Option<String> {
    let query = full_path.split_once('?')?.1;
    let query = query.split_once('#').map_or(query, |(q, _)| q);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == REDIRECT_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
