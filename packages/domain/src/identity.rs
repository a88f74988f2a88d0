//! # Identity backend — the lookups role resolution depends on
//!
//! [`IdentityBackend`] abstracts the four reads the session/role flow needs:
//! the current session, the caller's admin account row, the caller's profile
//! row and their language preference. Implementations:
//!
//! - `ui::ServerIdentity` — calls the `api` server functions from the client.
//! - `api::identity::PgIdentity` — queries PostgreSQL directly to authorize
//!   server functions.
//! - [`crate::MemoryIdentity`] — in-memory rows with injectable failures.

use std::future::Future;

use crate::models::{AdminUser, Profile};
use crate::session::SessionUser;

/// Errors raised by identity lookups. Role resolution never propagates these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DirectoryError {
    #[error("query failed: {0}")]
    Query(String),
    #[error("not authorized to read this row")]
    Unauthorized,
}

/// Async lookups backing session and role resolution.
pub trait IdentityBackend {
    fn session(&self) -> impl Future<Output = Result<Option<SessionUser>, DirectoryError>>;

    fn admin_account(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<AdminUser>, DirectoryError>>;

    fn profile(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<Profile>, DirectoryError>>;

    fn language_preference(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<String>, DirectoryError>>;
}
