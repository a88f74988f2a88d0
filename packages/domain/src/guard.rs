//! # Route guard policy
//!
//! Every route declares a [`RouteAccess`]. [`guard`] combines it with the
//! current [`AuthState`] into a [`GuardOutcome`]:
//!
//! | State | `Landing` | `GuestOnly` (`/login`) | `Requires(role)` |
//! |-------|-----------|------------------------|------------------|
//! | resolving | Loading | Loading | Loading |
//! | anonymous | → `/login` | Render | → `/login` |
//! | signed in, role matches | → home | → home | Render |
//! | signed in, other role | → home | → home | → home |
//!
//! Role mismatches redirect to the user's own home rather than showing an error.

use crate::role::Role;
use crate::session::AuthState;

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// The root path: always redirects once resolved.
    Landing,
    /// Only for anonymous visitors (the login page).
    GuestOnly,
    /// Only for signed-in users holding this role.
    Requires(Role),
}

/// Where a redirect goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Login,
    Home(Role),
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Login => "/login",
            Destination::Home(Role::Admin) => "/admin",
            Destination::Home(Role::Distributor) => "/portal",
        }
    }
}

/// What a guarded route should do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Loading,
    Render,
    Redirect(Destination),
}

/// Decide whether to render, wait, or redirect.
pub fn guard(access: RouteAccess, state: &AuthState) -> GuardOutcome {
    if state.loading {
        return GuardOutcome::Loading;
    }

    match (access, state.role()) {
        (RouteAccess::Landing, None) => GuardOutcome::Redirect(Destination::Login),
        (RouteAccess::Landing, Some(role)) => GuardOutcome::Redirect(Destination::Home(role)),
        (RouteAccess::GuestOnly, None) => GuardOutcome::Render,
        (RouteAccess::GuestOnly, Some(role)) => GuardOutcome::Redirect(Destination::Home(role)),
        (RouteAccess::Requires(_), None) => GuardOutcome::Redirect(Destination::Login),
        (RouteAccess::Requires(required), Some(role)) if required == role => GuardOutcome::Render,
        (RouteAccess::Requires(_), Some(role)) => GuardOutcome::Redirect(Destination::Home(role)),
    }
}

/// Access level for a path, for callers that only have the URL.
pub fn access_for_path(path: &str) -> RouteAccess {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();
    match first {
        "admin" => RouteAccess::Requires(Role::Admin),
        "portal" => RouteAccess::Requires(Role::Distributor),
        "login" => RouteAccess::GuestOnly,
        _ => RouteAccess::Landing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ResolvedUser;

    fn resolved(role: Option<Role>) -> AuthState {
        AuthState {
            user: role.map(|role| ResolvedUser {
                id: "u-1".to_string(),
                email: "dana@example.com".to_string(),
                role,
            }),
            loading: false,
            online: true,
        }
    }

    const PROTECTED: &[&str] = &[
        "/admin",
        "/admin/products",
        "/admin/distributors",
        "/admin/users",
        "/portal",
        "/portal/products/3f1c",
        "/portal/training",
        "/portal/account?tab=language",
    ];

    #[test]
    fn test_everything_waits_while_loading() {
        let loading = AuthState::default();
        for path in PROTECTED.iter().chain(["/", "/login"].iter()) {
            assert_eq!(guard(access_for_path(path), &loading), GuardOutcome::Loading, "{path}");
        }
    }

    #[test]
    fn test_anonymous_protected_paths_go_to_login() {
        let state = resolved(None);
        for path in PROTECTED {
            assert_eq!(
                guard(access_for_path(path), &state),
                GuardOutcome::Redirect(Destination::Login),
                "{path}"
            );
        }
        assert_eq!(guard(access_for_path("/login"), &state), GuardOutcome::Render);
    }

    #[test]
    fn test_distributor_on_admin_paths_goes_to_portal() {
        let state = resolved(Some(Role::Distributor));
        for path in ["/admin", "/admin/products", "/admin/users"] {
            let outcome = guard(access_for_path(path), &state);
            assert_eq!(outcome, GuardOutcome::Redirect(Destination::Home(Role::Distributor)));
        }
        assert_eq!(Destination::Home(Role::Distributor).path(), "/portal");
        assert_eq!(guard(access_for_path("/portal/products"), &state), GuardOutcome::Render);
    }

    #[test]
    fn test_admin_on_login_and_portal_goes_to_admin() {
        let state = resolved(Some(Role::Admin));
        assert_eq!(
            guard(access_for_path("/login"), &state),
            GuardOutcome::Redirect(Destination::Home(Role::Admin))
        );
        assert_eq!(
            guard(access_for_path("/portal"), &state),
            GuardOutcome::Redirect(Destination::Home(Role::Admin))
        );
        assert_eq!(Destination::Home(Role::Admin).path(), "/admin");
        assert_eq!(guard(access_for_path("/admin/announcements"), &state), GuardOutcome::Render);
    }

    #[test]
    fn test_landing_redirects_by_role() {
        assert_eq!(
            guard(RouteAccess::Landing, &resolved(None)),
            GuardOutcome::Redirect(Destination::Login)
        );
        assert_eq!(
            guard(RouteAccess::Landing, &resolved(Some(Role::Distributor))),
            GuardOutcome::Redirect(Destination::Home(Role::Distributor))
        );
    }

    #[test]
    fn test_access_for_path_ignores_lookalike_prefixes() {
        assert_eq!(access_for_path("/administrator"), RouteAccess::Landing);
        assert_eq!(access_for_path("/portals"), RouteAccess::Landing);
        assert_eq!(access_for_path("/login#top"), RouteAccess::GuestOnly);
        assert_eq!(access_for_path(""), RouteAccess::Landing);
    }
}
