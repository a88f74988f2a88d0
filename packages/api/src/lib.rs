//! # API crate — shared fullstack server functions for the distributor portal
//!
//! This crate is the portal's backend surface. It defines every Dioxus server
//! function that the web, desktop and mobile frontends call, along with the
//! server-side modules they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` | Argon2 password hashing, session keys |
//! | [`config`] | `server` | Environment configuration |
//! | [`db`] | — | PostgreSQL connection pool (lazy `OnceCell` singleton) |
//! | [`error`] | `server` | [`error::ApiError`] and its conversion to `ServerFnError` |
//! | [`identity`] | `server` | `PgIdentity`, caller authorization helpers |
//! | [`models`] | — | The server-only `users` row |
//! | [`catalog`] | — | Products and announcements |
//! | [`assets`] | — | Documentation, marketing and training libraries |
//! | [`accounts`] | — | Distributor and admin account management |
//! | [`storage`] | — | File uploads and public URLs |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` is a Dioxus server function, annotated with `#[get(...)]`
//! or `#[post(...)]` and compiled twice: once with full server logic (behind
//! `#[cfg(feature = "server")]`) and once as a thin client stub that forwards the
//! call over HTTP.
//!
//! - **Session**: `get_session`, `sign_in`, `sign_out`, `update_password`
//! - **Identity lookups** (role resolution): `get_admin_account`, `get_profile`,
//!   `get_language_preference`, `set_language_preference`

use dioxus::prelude::*;

use domain::models::{AdminUser, Profile};
use domain::SessionUser;

pub mod accounts;
pub mod assets;
#[cfg(feature = "server")]
pub mod auth;
pub mod catalog;
#[cfg(feature = "server")]
pub mod config;
pub mod db;
#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod identity;
pub mod models;
pub mod storage;

pub use accounts::*;
pub use assets::*;
pub use catalog::*;
pub use storage::*;

#[cfg(feature = "server")]
use error::{server_error, ApiError};

/// Get the account bound to the current session.
#[cfg(feature = "server")]
#[get("/api/auth/session", session: tower_sessions::Session)]
pub async fn get_session() -> Result<Option<SessionUser>, ServerFnError> {
    let user = identity::current_user(&session).await.map_err(server_error)?;
    Ok(user.map(|u| u.to_session()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/session")]
pub async fn get_session() -> Result<Option<SessionUser>, ServerFnError> {
    Ok(None)
}

#[cfg(feature = "server")]
async fn sign_in_inner(
    session: &tower_sessions::Session,
    email: String,
    password: String,
) -> Result<SessionUser, ApiError> {
    use crate::db::get_pool;
    use crate::models::User;

    let email = email.trim().to_lowercase();
    let pool = get_pool().await?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;

    let Some(user) = user else {
        return Err(ApiError::InvalidCredentials);
    };

    let valid = auth::verify_password(&password, &user.password_hash).unwrap_or_else(|e| {
        tracing::error!("Stored hash for {email} is unusable: {e}");
        false
    });
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let (inactive,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM profiles WHERE id = $1 AND status = 'inactive')
             OR EXISTS (SELECT 1 FROM admin_users WHERE id = $1 AND status = 'inactive')",
    )
    .bind(user.id)
    .fetch_one(pool)
    .await?;
    if inactive {
        return Err(ApiError::Inactive);
    }

    auth::sign_in_session(session, user.id).await?;
    tracing::info!("Signed in {email}");

    Ok(user.to_session())
}

/// Sign in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/sign-in", session: tower_sessions::Session)]
pub async fn sign_in(email: String, password: String) -> Result<SessionUser, ServerFnError> {
    sign_in_inner(&session, email, password)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-in")]
pub async fn sign_in(email: String, password: String) -> Result<SessionUser, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Sign out by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/sign-out", session: tower_sessions::Session)]
pub async fn sign_out() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| server_error(ApiError::from(e)))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-out")]
pub async fn sign_out() -> Result<(), ServerFnError> {
    Ok(())
}

#[cfg(feature = "server")]
async fn update_password_inner(
    session: &tower_sessions::Session,
    current_password: String,
    new_password: String,
) -> Result<(), ApiError> {
    use crate::db::get_pool;

    let user = identity::require_user(session).await?;

    if let Some(msg) = domain::validation::password_error(&new_password) {
        return Err(ApiError::Validation(msg.to_string()));
    }
    let valid = auth::verify_password(&current_password, &user.password_hash).unwrap_or(false);
    if !valid {
        return Err(ApiError::Validation("Current password is incorrect".to_string()));
    }

    let hash = auth::hash_password(&new_password).map_err(ApiError::Config)?;
    let pool = get_pool().await?;
    sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
        .bind(user.id)
        .bind(&hash)
        .execute(pool)
        .await?;

    tracing::info!("Password updated for {}", user.email);
    Ok(())
}

/// Change the signed-in user's password.
#[cfg(feature = "server")]
#[post("/api/auth/password", session: tower_sessions::Session)]
pub async fn update_password(
    current_password: String,
    new_password: String,
) -> Result<(), ServerFnError> {
    update_password_inner(&session, current_password, new_password)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/password")]
pub async fn update_password(
    current_password: String,
    new_password: String,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// The caller's `admin_users` row, if they have one.
#[cfg(feature = "server")]
#[post("/api/identity/admin-account", session: tower_sessions::Session)]
pub async fn get_admin_account(user_id: String) -> Result<Option<AdminUser>, ServerFnError> {
    use domain::IdentityBackend;

    let user = identity::require_user(&session).await.map_err(server_error)?;
    identity::require_self(&user, &user_id).map_err(server_error)?;

    let pool = db::get_pool().await.map_err(server_error)?;
    identity::PgIdentity::new(pool, Some(user.to_session()))
        .admin_account(&user_id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/identity/admin-account")]
pub async fn get_admin_account(user_id: String) -> Result<Option<AdminUser>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// The caller's `profiles` row, if they have one.
#[cfg(feature = "server")]
#[post("/api/identity/profile", session: tower_sessions::Session)]
pub async fn get_profile(user_id: String) -> Result<Option<Profile>, ServerFnError> {
    use domain::IdentityBackend;

    let user = identity::require_user(&session).await.map_err(server_error)?;
    identity::require_self(&user, &user_id).map_err(server_error)?;

    let pool = db::get_pool().await.map_err(server_error)?;
    identity::PgIdentity::new(pool, Some(user.to_session()))
        .profile(&user_id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/identity/profile")]
pub async fn get_profile(user_id: String) -> Result<Option<Profile>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// The caller's stored language code, if any.
#[cfg(feature = "server")]
#[post("/api/identity/language", session: tower_sessions::Session)]
pub async fn get_language_preference(user_id: String) -> Result<Option<String>, ServerFnError> {
    use domain::IdentityBackend;

    let user = identity::require_user(&session).await.map_err(server_error)?;
    identity::require_self(&user, &user_id).map_err(server_error)?;

    let pool = db::get_pool().await.map_err(server_error)?;
    identity::PgIdentity::new(pool, Some(user.to_session()))
        .language_preference(&user_id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/identity/language")]
pub async fn get_language_preference(user_id: String) -> Result<Option<String>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn set_language_preference_inner(
    session: &tower_sessions::Session,
    language: String,
) -> Result<(), ApiError> {
    let locale = domain::Locale::from_code(&language)
        .ok_or_else(|| ApiError::Validation(format!("Unsupported language: {language}")))?;
    let user = identity::require_user(session).await?;

    let pool = db::get_pool().await?;
    sqlx::query(
        "INSERT INTO language_preferences (user_id, language) VALUES ($1, $2)
         ON CONFLICT (user_id) DO UPDATE SET language = $2, updated_at = NOW()",
    )
    .bind(user.id)
    .bind(locale.code())
    .execute(pool)
    .await?;
    Ok(())
}

/// Store the caller's preferred language.
#[cfg(feature = "server")]
#[post("/api/identity/language/set", session: tower_sessions::Session)]
pub async fn set_language_preference(language: String) -> Result<(), ServerFnError> {
    set_language_preference_inner(&session, language)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/identity/language/set")]
pub async fn set_language_preference(language: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
