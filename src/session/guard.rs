//! Access decision for management views.
//!
//! [`evaluate`] is a pure function of the session: it holds no state and is
//! re-run on every navigation.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::models::session::Session;

/// Views reachable in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Credential entry. Public.
    Login,
    /// Landing page linking to the management views.
    Home,
    /// Category management.
    Categories,
    /// Item management.
    Items,
    /// Stock management.
    Stocks,
    /// Order composition and order history.
    Orders,
}

impl Route {
    /// Every route, public first.
    pub const ALL: [Self; 6] = [
        Self::Login,
        Self::Home,
        Self::Categories,
        Self::Items,
        Self::Stocks,
        Self::Orders,
    ];

    /// Canonical path of the route.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/auth/login",
            Self::Home => "/home",
            Self::Categories => "/categories",
            Self::Items => "/items",
            Self::Stocks => "/stocks",
            Self::Orders => "/orders",
        }
    }

    /// Resolve a path; `/` is an alias of [`Route::Home`].
    ///
    /// `/` is guarded like any protected view; once authenticated it
    /// renders the landing page rather than the login form.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => return Some(Self::Home),
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Whether the route requires an authenticated session.
    #[must_use]
    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "decision", content = "route")]
pub enum GuardDecision {
    /// Restore still pending; show a neutral placeholder, do not redirect.
    Placeholder,
    /// Navigate elsewhere instead.
    Redirect(Route),
    /// Show the requested view.
    Render(Route),
}

/// Decide what to show for a navigation to `target`.
#[must_use]
pub fn evaluate(session: &Session, target: Route) -> GuardDecision {
    if !target.is_protected() {
        return GuardDecision::Render(target);
    }
    if session.is_initializing() {
        GuardDecision::Placeholder
    } else if session.is_authenticated() {
        GuardDecision::Render(target)
    } else {
        GuardDecision::Redirect(Route::Login)
    }
}
