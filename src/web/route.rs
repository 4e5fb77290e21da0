//! Route definitions and guard rules.
//!
//! Pure domain layer: no DOM or `web_sys` dependency, so the guard
//! logic is unit-testable on the native host.

use std::fmt::Display;

/// Whether the route guard actually enforces authentication.
///
/// The shipped behavior is the bypass: every route is reachable without
/// a session. Enforcement is fully implemented behind this flag; flip
/// it to require a verified credential on protected routes.
pub const ENFORCE_AUTH: bool = false;

/// Application routes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Login / registration page (default route)
    #[default]
    Login,
    /// Analytics dashboard
    Dashboard,
    /// Single-customer prediction form
    Predict,
    /// CSV batch upload
    Batch,
    /// Prediction history
    History,
    /// Per-customer report, carries the customer id
    Report(String),
    NotFound,
}

/// Outcome of the route guard for a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the navigation through.
    Allow,
    /// Session verification is still in flight; render nothing
    /// conclusive and re-evaluate once it resolves.
    Pending,
    /// Send the user to the login page, remembering the target.
    RedirectToLogin,
}

impl AppRoute {
    /// Parse a URL path into a route.
    pub fn from_path(path: &str) -> Self {
        if let Some(id) = path.strip_prefix("/report/") {
            let id = id.trim_end_matches('/');
            if !id.is_empty() {
                return Self::Report(id.to_string());
            }
            return Self::NotFound;
        }

        match path {
            "/" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/predict" => Self::Predict,
            "/batch" => Self::Batch,
            "/history" => Self::History,
            _ => Self::NotFound,
        }
    }

    /// URL path for this route.
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Predict => "/predict".to_string(),
            Self::Batch => "/batch".to_string(),
            Self::History => "/history".to_string(),
            Self::Report(id) => format!("/report/{}", id),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Whether this route is meant to sit behind the session guard.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// Authenticated users should not linger on the login page.
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

/// Guard state machine. Called on every navigation, popstate, and
/// session-state change.
pub fn guard_decision(
    route: &AppRoute,
    enforce: bool,
    authenticated: bool,
    verifying: bool,
) -> GuardDecision {
    if !enforce || !route.requires_auth() {
        return GuardDecision::Allow;
    }
    if verifying {
        return GuardDecision::Pending;
    }
    if authenticated {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectToLogin
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::Predict,
            AppRoute::Batch,
            AppRoute::History,
            AppRoute::Report("CUST-42".to_string()),
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn report_path_carries_customer_id() {
        assert_eq!(
            AppRoute::from_path("/report/CUST-42"),
            AppRoute::Report("CUST-42".to_string())
        );
        assert_eq!(
            AppRoute::Report("CUST-42".to_string()).to_path(),
            "/report/CUST-42"
        );
        // An empty id is not a report route
        assert_eq!(AppRoute::from_path("/report/"), AppRoute::NotFound);
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn login_and_not_found_are_public() {
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::Report("x".to_string()).requires_auth());
    }

    #[test]
    fn bypass_allows_everything() {
        // The shipped configuration: no session, guard disabled.
        for route in [
            AppRoute::Dashboard,
            AppRoute::History,
            AppRoute::Report("CUST-42".to_string()),
        ] {
            assert_eq!(
                guard_decision(&route, false, false, false),
                GuardDecision::Allow
            );
        }
    }

    #[test]
    fn enforcing_guard_waits_for_verification() {
        assert_eq!(
            guard_decision(&AppRoute::Dashboard, true, false, true),
            GuardDecision::Pending
        );
    }

    #[test]
    fn enforcing_guard_redirects_unauthenticated() {
        assert_eq!(
            guard_decision(&AppRoute::Dashboard, true, false, false),
            GuardDecision::RedirectToLogin
        );
        assert_eq!(
            guard_decision(&AppRoute::Dashboard, true, true, false),
            GuardDecision::Allow
        );
        // Public routes stay reachable even while enforcing
        assert_eq!(
            guard_decision(&AppRoute::Login, true, false, false),
            GuardDecision::Allow
        );
    }
}
