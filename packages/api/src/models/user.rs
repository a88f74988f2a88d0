//! # Authentication account
//!
//! [`User`] is the full `users` row. It never leaves the server: clients only see
//! the [`SessionUser`] projection returned by [`User::to_session`], which omits the
//! password hash and converts the `Uuid` to a `String`.

use chrono::{DateTime, Utc};
use domain::SessionUser;
use sqlx::FromRow;
use uuid::Uuid;

/// Full account row from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Convert to SessionUser for client consumption.
    pub fn to_session(&self) -> SessionUser {
        SessionUser {
            id: self.id.to_string(),
            email: self.email.clone(),
        }
    }
}
