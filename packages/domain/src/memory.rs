use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::identity::{DirectoryError, IdentityBackend};
use crate::models::{AccountStatus, AdminRole, AdminUser, Profile};
use crate::session::SessionUser;

#[derive(Debug, Default)]
struct Inner {
    session: Option<SessionUser>,
    admins: HashMap<String, AdminUser>,
    profiles: HashMap<String, Profile>,
    languages: HashMap<String, String>,
    session_error: Option<DirectoryError>,
    admin_error: Option<DirectoryError>,
    profile_error: Option<DirectoryError>,
    language_error: Option<DirectoryError>,
    session_calls: usize,
}

/// In-memory IdentityBackend for testing, with injectable lookup failures.
#[derive(Clone, Debug, Default)]
pub struct MemoryIdentity {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(self, session: SessionUser) -> Self {
        self.set_session(Some(session));
        self
    }

    pub fn with_admin(self, user_id: &str, email: &str) -> Self {
        let row = AdminUser {
            id: Uuid::nil(),
            email: email.to_string(),
            full_name: None,
            role: AdminRole::Admin,
            status: AccountStatus::Active,
            created_at: Utc::now(),
        };
        self.lock().admins.insert(user_id.to_string(), row);
        self
    }

    pub fn with_profile(self, user_id: &str, role: Option<&str>) -> Self {
        let now = Utc::now();
        let row = Profile {
            id: Uuid::nil(),
            email: format!("{user_id}@example.com"),
            full_name: None,
            company_name: None,
            territory: None,
            phone: None,
            role: role.map(str::to_string),
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.lock().profiles.insert(user_id.to_string(), row);
        self
    }

    pub fn with_language(self, user_id: &str, code: &str) -> Self {
        self.lock()
            .languages
            .insert(user_id.to_string(), code.to_string());
        self
    }

    pub fn fail_session(self, error: DirectoryError) -> Self {
        self.lock().session_error = Some(error);
        self
    }

    pub fn fail_admin_lookup(self, error: DirectoryError) -> Self {
        self.lock().admin_error = Some(error);
        self
    }

    pub fn fail_profile_lookup(self, error: DirectoryError) -> Self {
        self.lock().profile_error = Some(error);
        self
    }

    pub fn fail_language_lookup(self, error: DirectoryError) -> Self {
        self.lock().language_error = Some(error);
        self
    }

    /// Replace the current session, e.g. to simulate a sign-in or sign-out.
    pub fn set_session(&self, session: Option<SessionUser>) {
        self.lock().session = session;
    }

    /// Remove a user's admin row.
    pub fn revoke_admin(&self, user_id: &str) {
        self.lock().admins.remove(user_id);
    }

    /// How many times the session has been fetched.
    pub fn session_calls(&self) -> usize {
        self.lock().session_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl IdentityBackend for MemoryIdentity {
    async fn session(&self) -> Result<Option<SessionUser>, DirectoryError> {
        let mut inner = self.lock();
        inner.session_calls += 1;
        match &inner.session_error {
            Some(e) => Err(e.clone()),
            None => Ok(inner.session.clone()),
        }
    }

    async fn admin_account(&self, user_id: &str) -> Result<Option<AdminUser>, DirectoryError> {
        let inner = self.lock();
        match &inner.admin_error {
            Some(e) => Err(e.clone()),
            None => Ok(inner.admins.get(user_id).cloned()),
        }
    }

    async fn profile(&self, user_id: &str) -> Result<Option<Profile>, DirectoryError> {
        let inner = self.lock();
        match &inner.profile_error {
            Some(e) => Err(e.clone()),
            None => Ok(inner.profiles.get(user_id).cloned()),
        }
    }

    async fn language_preference(&self, user_id: &str) -> Result<Option<String>, DirectoryError> {
        let inner = self.lock();
        match &inner.language_error {
            Some(e) => Err(e.clone()),
            None => Ok(inner.languages.get(user_id).cloned()),
        }
    }
}
