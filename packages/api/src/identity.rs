//! # Server-side identity and authorization
//!
//! [`PgIdentity`] implements [`IdentityBackend`] directly over PostgreSQL so the
//! server authorizes requests with the same admin → profile → default chain the
//! client uses to pick routes. Every server function starts with
//! [`require_session`] or [`require_admin`].

use domain::models::{AdminUser, Profile};
use domain::{resolve_role, DirectoryError, IdentityBackend, Role, SessionUser};
use sqlx::PgPool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::auth::session_user_id;
use crate::db::get_pool;
use crate::error::ApiError;
use crate::models::User;

/// The authenticated caller of a server function.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Identity lookups against PostgreSQL for an already-known session user.
pub struct PgIdentity {
    pool: &'static PgPool,
    session_user: Option<SessionUser>,
}

impl PgIdentity {
    pub fn new(pool: &'static PgPool, session_user: Option<SessionUser>) -> Self {
        Self { pool, session_user }
    }
}

fn query_error(e: sqlx::Error) -> DirectoryError {
    DirectoryError::Query(e.to_string())
}

impl IdentityBackend for PgIdentity {
    async fn session(&self) -> Result<Option<SessionUser>, DirectoryError> {
        Ok(self.session_user.clone())
    }

    async fn admin_account(&self, user_id: &str) -> Result<Option<AdminUser>, DirectoryError> {
        let Ok(id) = Uuid::parse_str(user_id) else {
            return Ok(None);
        };
        sqlx::query_as("SELECT * FROM admin_users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(query_error)
    }

    async fn profile(&self, user_id: &str) -> Result<Option<Profile>, DirectoryError> {
        let Ok(id) = Uuid::parse_str(user_id) else {
            return Ok(None);
        };
        sqlx::query_as("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(query_error)
    }

    async fn language_preference(&self, user_id: &str) -> Result<Option<String>, DirectoryError> {
        let Ok(id) = Uuid::parse_str(user_id) else {
            return Ok(None);
        };
        let row: Option<(String,)> =
            sqlx::query_as("SELECT language FROM language_preferences WHERE user_id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await
                .map_err(query_error)?;
        Ok(row.map(|(language,)| language))
    }
}

/// Load the account bound to the session, if any.
pub async fn current_user(session: &Session) -> Result<Option<User>, ApiError> {
    let Some(user_id) = session_user_id(session).await? else {
        return Ok(None);
    };

    let pool = get_pool().await?;
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// The signed-in account, without resolving its role.
pub async fn require_user(session: &Session) -> Result<User, ApiError> {
    current_user(session).await?.ok_or(ApiError::NotAuthenticated)
}

/// The signed-in caller with their resolved role.
pub async fn require_session(session: &Session) -> Result<Caller, ApiError> {
    let user = require_user(session).await?;

    let pool = get_pool().await?;
    let identity = PgIdentity::new(pool, Some(user.to_session()));
    let role = resolve_role(&identity, &user.id.to_string()).await;

    Ok(Caller {
        id: user.id,
        email: user.email,
        role,
    })
}

/// The signed-in caller, who must resolve to the admin role.
pub async fn require_admin(session: &Session) -> Result<Caller, ApiError> {
    let caller = require_session(session).await?;
    if !caller.is_admin() {
        tracing::warn!("Rejected admin call from {}", caller.email);
        return Err(ApiError::Forbidden);
    }
    Ok(caller)
}

/// Identity rows may only be read by their owner.
pub fn require_self(user: &User, user_id: &str) -> Result<Uuid, ApiError> {
    match Uuid::parse_str(user_id) {
        Ok(id) if id == user.id => Ok(id),
        _ => Err(ApiError::Forbidden),
    }
}
