//! # Auth events and the resolution controller
//!
//! Role resolution is re-run on the initial mount and on sign-in, sign-out and
//! user-updated events. Token refreshes never re-resolve: they only tell the
//! client whether the server is still reachable, so switching tabs or a
//! periodic keep-alive cannot reload the UI.
//!
//! Two resolutions may overlap (a sign-out arriving while the initial lookup is
//! still waiting on the network). Each resolution takes a [`ResolutionTicket`]
//! and its result is dropped unless that ticket is still the newest one, so the
//! last event issued decides the state, not the last response received.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::identity::IdentityBackend;
use crate::resolve::resolve_session;
use crate::session::AuthState;

/// Auth-state change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    UserUpdated,
    TokenRefreshed,
}

impl AuthEvent {
    pub fn triggers_resolution(self) -> bool {
        !matches!(self, AuthEvent::TokenRefreshed)
    }
}

/// Identifies one resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionTicket(u64);

/// Hands out monotonically increasing tickets; only the newest is current.
#[derive(Clone, Debug, Default)]
pub struct ResolutionTracker {
    latest: Arc<AtomicU64>,
}

impl ResolutionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> ResolutionTicket {
        ResolutionTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: ResolutionTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// The newest ticket handed out so far, without starting a resolution.
    pub fn latest(&self) -> ResolutionTicket {
        ResolutionTicket(self.latest.load(Ordering::SeqCst))
    }
}

/// Result of a keep-alive (token refresh) check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepAlive {
    /// Same session as before; the server is reachable.
    Unchanged,
    /// The session fetch failed; keep the user, mark offline.
    Offline,
    /// The session changed underneath us; raise this event.
    Changed(AuthEvent),
    /// A resolution started while the check was in flight; its result wins.
    Superseded,
}

impl KeepAlive {
    /// Fold the outcome of a check made against `checked` into the live state.
    ///
    /// Only the `online` flag is written, and only while `state` still holds the
    /// user the check was made for and no resolution is pending. Returns the
    /// event to raise, if any.
    pub fn apply(self, checked: &AuthState, state: &mut AuthState) -> Option<AuthEvent> {
        if state.loading || state.user_id() != checked.user_id() {
            return None;
        }
        match self {
            KeepAlive::Unchanged => state.online = true,
            KeepAlive::Offline => state.online = false,
            KeepAlive::Changed(event) => return Some(event),
            KeepAlive::Superseded => {}
        }
        None
    }
}

/// Drives [`AuthState`] transitions from [`AuthEvent`]s.
#[derive(Clone, Debug)]
pub struct AuthController<B> {
    backend: B,
    tracker: ResolutionTracker,
}

impl<B: IdentityBackend> AuthController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            tracker: ResolutionTracker::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolve the state an event leads to.
    ///
    /// Returns `None` when the event does not trigger resolution or when a newer
    /// resolution started while this one was in flight.
    pub async fn handle(&self, event: AuthEvent) -> Option<AuthState> {
        if !event.triggers_resolution() {
            return None;
        }

        let ticket = self.tracker.begin();
        let resolution = resolve_session(&self.backend).await;

        if !self.tracker.is_current(ticket) {
            tracing::debug!("Dropping stale resolution for {event:?}");
            return None;
        }

        Some(AuthState {
            user: resolution.user,
            loading: false,
            online: resolution.online,
        })
    }

    /// Check the session without re-resolving the role.
    pub async fn keep_alive(&self, current: &AuthState) -> KeepAlive {
        let ticket = self.tracker.latest();
        let session = self.backend.session().await;

        if !self.tracker.is_current(ticket) {
            tracing::debug!("Dropping keep-alive overtaken by a resolution");
            return KeepAlive::Superseded;
        }

        let session = match session {
            Ok(session) => session,
            Err(e) => {
                tracing::debug!("Keep-alive failed: {e}");
                return KeepAlive::Offline;
            }
        };

        match (session, current.user.as_ref()) {
            (None, None) => KeepAlive::Unchanged,
            (Some(s), Some(u)) if s.id == u.id => KeepAlive::Unchanged,
            (None, Some(_)) => KeepAlive::Changed(AuthEvent::SignedOut),
            (Some(_), _) => KeepAlive::Changed(AuthEvent::SignedIn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::DirectoryError;
    use crate::memory::MemoryIdentity;
    use crate::models::{AdminUser, Profile};
    use crate::role::Role;
    use crate::session::SessionUser;

    fn dana() -> SessionUser {
        SessionUser {
            id: "u-1".to_string(),
            email: "dana@example.com".to_string(),
        }
    }

    #[test]
    fn test_only_token_refresh_skips_resolution() {
        assert!(AuthEvent::InitialSession.triggers_resolution());
        assert!(AuthEvent::SignedIn.triggers_resolution());
        assert!(AuthEvent::SignedOut.triggers_resolution());
        assert!(AuthEvent::UserUpdated.triggers_resolution());
        assert!(!AuthEvent::TokenRefreshed.triggers_resolution());
    }

    fn signed_in(online: bool) -> AuthState {
        AuthState {
            user: Some(crate::session::ResolvedUser::new(dana(), Role::Distributor)),
            loading: false,
            online,
        }
    }

    #[test]
    fn test_tracker_only_latest_ticket_is_current() {
        let tracker = ResolutionTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_current(first));

        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));

        // Clones share the counter
        let clone = tracker.clone();
        let third = clone.begin();
        assert!(!tracker.is_current(second));
        assert!(tracker.is_current(third));
        assert_eq!(tracker.latest(), third);
    }

    #[tokio::test]
    async fn test_initial_session_resolves_admin() {
        let backend = MemoryIdentity::new()
            .with_session(dana())
            .with_admin("u-1", "dana@example.com");
        let controller = AuthController::new(backend);

        let state = controller.handle(AuthEvent::InitialSession).await.unwrap();
        assert!(!state.loading);
        assert!(state.online);
        assert_eq!(state.role(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn test_token_refresh_never_changes_state() {
        let backend = MemoryIdentity::new()
            .with_session(dana())
            .with_admin("u-1", "dana@example.com");
        let controller = AuthController::new(backend.clone());
        let before = controller.handle(AuthEvent::InitialSession).await.unwrap();

        // Even if the role would now resolve differently, a refresh does not look.
        backend.revoke_admin("u-1");
        let calls = backend.session_calls();
        assert_eq!(controller.handle(AuthEvent::TokenRefreshed).await, None);
        assert_eq!(backend.session_calls(), calls);
        assert_eq!(before.role(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn test_sign_out_clears_user() {
        let backend = MemoryIdentity::new().with_session(dana());
        let controller = AuthController::new(backend.clone());
        let state = controller.handle(AuthEvent::InitialSession).await.unwrap();
        assert!(state.user.is_some());

        backend.set_session(None);
        let state = controller.handle(AuthEvent::SignedOut).await.unwrap();
        assert!(state.user.is_none());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_user_updated_re_resolves_role() {
        let backend = MemoryIdentity::new()
            .with_session(dana())
            .with_admin("u-1", "dana@example.com");
        let controller = AuthController::new(backend.clone());
        assert_eq!(
            controller.handle(AuthEvent::InitialSession).await.unwrap().role(),
            Some(Role::Admin)
        );

        backend.revoke_admin("u-1");
        assert_eq!(
            controller.handle(AuthEvent::UserUpdated).await.unwrap().role(),
            Some(Role::Distributor)
        );
    }

    /// Delegates to a MemoryIdentity but stalls the first session fetch.
    #[derive(Clone)]
    struct SlowFirstSession {
        inner: MemoryIdentity,
    }

    impl IdentityBackend for SlowFirstSession {
        async fn session(&self) -> Result<Option<SessionUser>, DirectoryError> {
            let first = self.inner.session_calls() == 0;
            let result = self.inner.session().await;
            if first {
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            }
            result
        }

        async fn admin_account(&self, user_id: &str) -> Result<Option<AdminUser>, DirectoryError> {
            self.inner.admin_account(user_id).await
        }

        async fn profile(&self, user_id: &str) -> Result<Option<Profile>, DirectoryError> {
            self.inner.profile(user_id).await
        }

        async fn language_preference(
            &self,
            user_id: &str,
        ) -> Result<Option<String>, DirectoryError> {
            self.inner.language_preference(user_id).await
        }
    }

    #[tokio::test]
    async fn test_overlapping_resolutions_latest_event_wins() {
        let inner = MemoryIdentity::new()
            .with_session(dana())
            .with_admin("u-1", "dana@example.com");
        let controller = AuthController::new(SlowFirstSession {
            inner: inner.clone(),
        });

        // The initial lookup sees a session but answers late; meanwhile the user
        // signs out and the second lookup answers first.
        let slow = controller.handle(AuthEvent::InitialSession);
        let fast = async {
            inner.set_session(None);
            controller.handle(AuthEvent::SignedOut).await
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow, None);
        let state = fast.unwrap();
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn test_keep_alive_outcomes() {
        let backend = MemoryIdentity::new().with_session(dana());
        let controller = AuthController::new(backend.clone());
        let state = controller.handle(AuthEvent::InitialSession).await.unwrap();

        assert_eq!(controller.keep_alive(&state).await, KeepAlive::Unchanged);

        backend.set_session(None);
        assert_eq!(
            controller.keep_alive(&state).await,
            KeepAlive::Changed(AuthEvent::SignedOut)
        );

        backend.set_session(Some(SessionUser {
            id: "u-2".to_string(),
            email: "lee@example.com".to_string(),
        }));
        assert_eq!(
            controller.keep_alive(&state).await,
            KeepAlive::Changed(AuthEvent::SignedIn)
        );

        let anonymous = AuthState {
            user: None,
            loading: false,
            online: true,
        };
        backend.set_session(None);
        assert_eq!(controller.keep_alive(&anonymous).await, KeepAlive::Unchanged);
    }

    #[tokio::test]
    async fn test_keep_alive_offline_keeps_user() {
        let backend = MemoryIdentity::new()
            .with_session(dana())
            .fail_session(DirectoryError::Query("network".into()));
        let controller = AuthController::new(backend);
        let state = AuthState {
            user: Some(crate::session::ResolvedUser::new(dana(), Role::Distributor)),
            loading: false,
            online: true,
        };
        assert_eq!(controller.keep_alive(&state).await, KeepAlive::Offline);
    }

    #[tokio::test]
    async fn test_keep_alive_after_sign_out_keeps_user_cleared() {
        let backend = MemoryIdentity::new().with_session(dana());
        let controller = AuthController::new(backend.clone());
        let mut state = controller.handle(AuthEvent::InitialSession).await.unwrap();
        state.online = false;

        // The check answers for the signed-in snapshot, but sign-out resolves
        // before its answer is applied.
        let checked = state.clone();
        let outcome = controller.keep_alive(&checked).await;
        assert_eq!(outcome, KeepAlive::Unchanged);

        backend.set_session(None);
        let mut live = controller.handle(AuthEvent::SignedOut).await.unwrap();
        assert!(live.user.is_none());

        assert_eq!(outcome.apply(&checked, &mut live), None);
        assert!(live.user.is_none());
    }

    #[test]
    fn test_failed_check_does_not_undo_sign_in() {
        let checked = AuthState {
            user: None,
            loading: false,
            online: true,
        };
        let mut live = signed_in(true);

        assert_eq!(KeepAlive::Offline.apply(&checked, &mut live), None);
        assert_eq!(live, signed_in(true));
    }

    #[test]
    fn test_apply_only_touches_online_flag() {
        let checked = signed_in(true);

        let mut live = signed_in(true);
        assert_eq!(KeepAlive::Offline.apply(&checked, &mut live), None);
        assert_eq!(live, signed_in(false));

        assert_eq!(KeepAlive::Unchanged.apply(&checked, &mut live), None);
        assert_eq!(live, signed_in(true));

        assert_eq!(
            KeepAlive::Changed(AuthEvent::SignedOut).apply(&checked, &mut live),
            Some(AuthEvent::SignedOut)
        );
        assert_eq!(live, signed_in(true));

        let mut pending = AuthState {
            loading: true,
            ..signed_in(true)
        };
        assert_eq!(KeepAlive::Offline.apply(&checked, &mut pending), None);
        assert!(pending.online);
    }

    #[tokio::test]
    async fn test_keep_alive_overtaken_by_resolution_is_superseded() {
        let inner = MemoryIdentity::new().with_session(dana());
        let controller = AuthController::new(SlowFirstSession {
            inner: inner.clone(),
        });
        let checked = signed_in(true);

        // The keep-alive takes the slow first fetch; a sign-out resolution
        // starts while it is waiting.
        let check = controller.keep_alive(&checked);
        let sign_out = async {
            tokio::task::yield_now().await;
            inner.set_session(None);
            controller.handle(AuthEvent::SignedOut).await
        };
        let (outcome, resolved) = tokio::join!(check, sign_out);

        assert_eq!(outcome, KeepAlive::Superseded);
        assert!(resolved.unwrap().user.is_none());
    }
}
