//! # Session and role resolution
//!
//! The lookup order is fixed:
//!
//! 1. Fetch the current session. No session (or a failed fetch) means anonymous.
//! 2. Look for an `admin_users` row with the session's user id. A row means
//!    [`Role::Admin`], whatever the profile says.
//! 3. Otherwise read the `profiles` row and use its `role` column, defaulting to
//!    [`Role::Distributor`] when the column is null or the row is missing.
//!    A failed admin lookup skips straight to this step.
//!
//! No error in the chain is surfaced; the worst case is the distributor role.

use crate::identity::IdentityBackend;
use crate::locale::Locale;
use crate::role::Role;
use crate::session::ResolvedUser;

/// Outcome of a full session resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResolution {
    pub user: Option<ResolvedUser>,
    /// False when the session fetch itself failed.
    pub online: bool,
}

/// Resolve the role for a known user id.
pub async fn resolve_role<B: IdentityBackend>(backend: &B, user_id: &str) -> Role {
    match backend.admin_account(user_id).await {
        Ok(Some(_)) => return Role::Admin,
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("Admin lookup failed for {user_id}, falling back to profile: {e}");
        }
    }

    match backend.profile(user_id).await {
        Ok(Some(profile)) => Role::from_stored(profile.role.as_deref()),
        Ok(None) => Role::default(),
        Err(e) => {
            tracing::warn!("Profile lookup failed for {user_id}, defaulting role: {e}");
            Role::default()
        }
    }
}

/// Fetch the session and, if present, resolve its role.
pub async fn resolve_session<B: IdentityBackend>(backend: &B) -> SessionResolution {
    let session = match backend.session().await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Session fetch failed: {e}");
            return SessionResolution {
                user: None,
                online: false,
            };
        }
    };

    let Some(session) = session else {
        return SessionResolution {
            user: None,
            online: true,
        };
    };

    let role = resolve_role(backend, &session.id).await;
    SessionResolution {
        user: Some(ResolvedUser::new(session, role)),
        online: true,
    }
}

/// Best-effort load of the user's language preference.
///
/// Errors, missing rows and unknown codes all yield `None`.
pub async fn preferred_locale<B: IdentityBackend>(backend: &B, user_id: &str) -> Option<Locale> {
    match backend.language_preference(user_id).await {
        Ok(Some(code)) => Locale::from_code(&code),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!("Ignoring language preference error: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::DirectoryError;
    use crate::memory::MemoryIdentity;
    use crate::session::SessionUser;

    fn session() -> SessionUser {
        SessionUser {
            id: "u-1".to_string(),
            email: "dana@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_admin_row_wins_over_profile() {
        let backend = MemoryIdentity::new()
            .with_session(session())
            .with_admin("u-1", "dana@example.com")
            .with_profile("u-1", Some("distributor"));

        assert_eq!(resolve_role(&backend, "u-1").await, Role::Admin);
    }

    #[tokio::test]
    async fn test_no_admin_row_uses_profile_role() {
        let backend = MemoryIdentity::new().with_profile("u-1", Some("distributor"));
        assert_eq!(resolve_role(&backend, "u-1").await, Role::Distributor);

        let backend = MemoryIdentity::new().with_profile("u-1", Some("admin"));
        assert_eq!(resolve_role(&backend, "u-1").await, Role::Admin);
    }

    #[tokio::test]
    async fn test_admin_error_falls_back_to_profile_default() {
        let backend = MemoryIdentity::new()
            .with_profile("u-1", None)
            .fail_admin_lookup(DirectoryError::Query("relation does not exist".into()));

        assert_eq!(resolve_role(&backend, "u-1").await, Role::Distributor);
    }

    #[tokio::test]
    async fn test_admin_error_still_reads_profile_role() {
        let backend = MemoryIdentity::new()
            .with_profile("u-1", Some("admin"))
            .fail_admin_lookup(DirectoryError::Unauthorized);

        assert_eq!(resolve_role(&backend, "u-1").await, Role::Admin);
    }

    #[tokio::test]
    async fn test_missing_profile_defaults_to_distributor() {
        let backend = MemoryIdentity::new();
        assert_eq!(resolve_role(&backend, "u-1").await, Role::Distributor);

        let backend = MemoryIdentity::new()
            .fail_admin_lookup(DirectoryError::Query("timeout".into()))
            .fail_profile_lookup(DirectoryError::Query("timeout".into()));
        assert_eq!(resolve_role(&backend, "u-1").await, Role::Distributor);
    }

    #[tokio::test]
    async fn test_resolve_session_anonymous() {
        let backend = MemoryIdentity::new().with_admin("u-1", "dana@example.com");
        let resolution = resolve_session(&backend).await;
        assert!(resolution.user.is_none());
        assert!(resolution.online);
    }

    #[tokio::test]
    async fn test_resolve_session_fetch_error_is_offline_anonymous() {
        let backend = MemoryIdentity::new()
            .with_session(session())
            .fail_session(DirectoryError::Query("connection refused".into()));
        let resolution = resolve_session(&backend).await;
        assert!(resolution.user.is_none());
        assert!(!resolution.online);
    }

    #[tokio::test]
    async fn test_resolve_session_carries_id_and_email() {
        let backend = MemoryIdentity::new()
            .with_session(session())
            .with_admin("u-1", "dana@example.com");
        let user = resolve_session(&backend).await.user.unwrap();
        assert_eq!(user.id, "u-1");
        assert_eq!(user.email, "dana@example.com");
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_preferred_locale_swallows_errors() {
        let backend = MemoryIdentity::new().with_language("u-1", "es-MX");
        assert_eq!(preferred_locale(&backend, "u-1").await, Some(Locale::Es));

        let backend = MemoryIdentity::new().with_language("u-1", "tlh");
        assert_eq!(preferred_locale(&backend, "u-1").await, None);

        let backend = MemoryIdentity::new()
            .with_language("u-1", "fr")
            .fail_language_lookup(DirectoryError::Query("boom".into()));
        assert_eq!(preferred_locale(&backend, "u-1").await, None);
    }
}
