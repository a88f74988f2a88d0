//! Session records and client-side auth state.

use serde::{Deserialize, Serialize};

use crate::events::AuthEvent;
use crate::role::Role;

/// The authenticated account behind the current session, before role resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
}

/// A session user with its resolved role. Lives only as long as the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl ResolvedUser {
    pub fn new(session: SessionUser, role: Role) -> Self {
        Self {
            id: session.id,
            email: session.email,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<ResolvedUser>,
    /// True while a role resolution is in flight.
    pub loading: bool,
    /// Whether the server answered the last session check.
    pub online: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            online: false,
        }
    }
}

impl AuthState {
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    /// Mark a resolution as pending if `event` starts one. The user is kept
    /// until the resolution replaces the whole state. Returns whether the
    /// state changed.
    pub fn begin_resolution(&mut self, event: AuthEvent) -> bool {
        if !event.triggers_resolution() || self.loading {
            return false;
        }
        self.loading = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved() -> AuthState {
        AuthState {
            user: Some(ResolvedUser::new(
                SessionUser {
                    id: "u-1".to_string(),
                    email: "dana@example.com".to_string(),
                },
                Role::Admin,
            )),
            loading: false,
            online: true,
        }
    }

    #[test]
    fn test_sign_out_marks_state_loading() {
        let mut state = resolved();
        assert!(state.begin_resolution(AuthEvent::SignedOut));
        assert!(state.loading);
        assert_eq!(state.role(), Some(Role::Admin));

        // Already pending
        assert!(!state.begin_resolution(AuthEvent::SignedIn));
    }

    #[test]
    fn test_token_refresh_never_marks_loading() {
        let mut state = resolved();
        assert!(!state.begin_resolution(AuthEvent::TokenRefreshed));
        assert_eq!(state, resolved());
    }
}
