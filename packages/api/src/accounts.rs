//! # Account management server functions
//!
//! Distributors are `users` rows with a `profiles` row and no `admin_users` row.
//! Admins are `users` rows with an `admin_users` row. Every function here
//! requires an admin caller; the ones touching more than one table run in a
//! transaction.

use dioxus::prelude::*;
use uuid::Uuid;

use domain::models::{AccountStatus, AdminUser, AdminUserDraft, DistributorDraft, Profile};

#[cfg(feature = "server")]
use crate::{
    auth::hash_password,
    config::ServerConfig,
    db::get_pool,
    error::{check, server_error, ApiError},
    identity::require_admin,
};
#[cfg(feature = "server")]
use domain::models::non_blank;
#[cfg(feature = "server")]
use sqlx::{PgPool, Postgres, Transaction};

#[cfg(feature = "server")]
fn check_password(password: &str) -> Result<(), ApiError> {
    match domain::validation::password_error(password) {
        Some(msg) => Err(ApiError::Validation(format!("password: {msg}"))),
        None => Ok(()),
    }
}

/// Insert the `users` row every account starts with.
#[cfg(feature = "server")]
async fn insert_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
) -> Result<Uuid, ApiError> {
    let hash = hash_password(password).map_err(ApiError::Config)?;
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(email)
        .bind(&hash)
        .execute(&mut **tx)
        .await
        .map_err(ApiError::from_insert)?;
    Ok(id)
}

#[cfg(feature = "server")]
async fn list_distributors_inner(session: &tower_sessions::Session) -> Result<Vec<Profile>, ApiError> {
    require_admin(session).await?;
    let pool = get_pool().await?;

    let rows: Vec<Profile> = sqlx::query_as(
        "SELECT p.* FROM profiles p
         WHERE NOT EXISTS (SELECT 1 FROM admin_users a WHERE a.id = p.id)
         ORDER BY p.company_name NULLS LAST, p.email",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Every distributor profile, by company.
#[cfg(feature = "server")]
#[get("/api/distributors", session: tower_sessions::Session)]
pub async fn list_distributors() -> Result<Vec<Profile>, ServerFnError> {
    list_distributors_inner(&session)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/distributors")]
pub async fn list_distributors() -> Result<Vec<Profile>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn create_distributor_inner(
    session: &tower_sessions::Session,
    draft: DistributorDraft,
    password: String,
) -> Result<Profile, ApiError> {
    let caller = require_admin(session).await?;
    check(&draft)?;
    check_password(&password)?;
    let email = draft.email.trim().to_lowercase();

    let pool = get_pool().await?;
    let mut tx = pool.begin().await?;

    let id = insert_user(&mut tx, &email, &password).await?;
    let profile: Profile = sqlx::query_as(
        "INSERT INTO profiles (id, email, full_name, company_name, territory, phone, role)
         VALUES ($1, $2, $3, $4, $5, $6, 'distributor') RETURNING *",
    )
    .bind(id)
    .bind(&email)
    .bind(non_blank(&draft.full_name))
    .bind(non_blank(&draft.company_name))
    .bind(non_blank(&draft.territory))
    .bind(non_blank(&draft.phone))
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!("{} created distributor {email}", caller.email);
    Ok(profile)
}

/// Create a distributor login and profile.
#[cfg(feature = "server")]
#[post("/api/distributors/create", session: tower_sessions::Session)]
pub async fn create_distributor(
    draft: DistributorDraft,
    password: String,
) -> Result<Profile, ServerFnError> {
    create_distributor_inner(&session, draft, password)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/distributors/create")]
pub async fn create_distributor(
    draft: DistributorDraft,
    password: String,
) -> Result<Profile, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn update_distributor_inner(
    session: &tower_sessions::Session,
    id: Uuid,
    draft: DistributorDraft,
) -> Result<Profile, ApiError> {
    require_admin(session).await?;
    check(&draft)?;
    let email = draft.email.trim().to_lowercase();

    let pool = get_pool().await?;
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE users SET email = $2 WHERE id = $1")
        .bind(id)
        .bind(&email)
        .execute(&mut *tx)
        .await
        .map_err(ApiError::from_insert)?;

    let profile: Option<Profile> = sqlx::query_as(
        "UPDATE profiles SET email = $2, full_name = $3, company_name = $4, territory = $5,
             phone = $6, updated_at = NOW()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&email)
    .bind(non_blank(&draft.full_name))
    .bind(non_blank(&draft.company_name))
    .bind(non_blank(&draft.territory))
    .bind(non_blank(&draft.phone))
    .fetch_optional(&mut *tx)
    .await?;

    let profile = profile.ok_or(ApiError::NotFound)?;
    tx.commit().await?;
    Ok(profile)
}

/// Update a distributor's contact details (and login email).
#[cfg(feature = "server")]
#[post("/api/distributors/update", session: tower_sessions::Session)]
pub async fn update_distributor(id: Uuid, draft: DistributorDraft) -> Result<Profile, ServerFnError> {
    update_distributor_inner(&session, id, draft)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/distributors/update")]
pub async fn update_distributor(id: Uuid, draft: DistributorDraft) -> Result<Profile, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn delete_distributor_inner(session: &tower_sessions::Session, id: Uuid) -> Result<(), ApiError> {
    let caller = require_admin(session).await?;
    let pool = get_pool().await?;
    let mut tx = pool.begin().await?;

    let (is_admin,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM admin_users WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
    if is_admin {
        return Err(ApiError::Validation(
            "Admin accounts are managed from the admin users page".to_string(),
        ));
    }

    sqlx::query("DELETE FROM language_preferences WHERE user_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }

    tx.commit().await?;
    tracing::info!("{} deleted distributor {id}", caller.email);
    Ok(())
}

/// Delete a distributor's profile and login.
#[cfg(feature = "server")]
#[post("/api/distributors/delete", session: tower_sessions::Session)]
pub async fn delete_distributor(id: Uuid) -> Result<(), ServerFnError> {
    delete_distributor_inner(&session, id)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/distributors/delete")]
pub async fn delete_distributor(id: Uuid) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn update_distributor_status_inner(
    session: &tower_sessions::Session,
    id: Uuid,
    status: AccountStatus,
) -> Result<Profile, ApiError> {
    let caller = require_admin(session).await?;
    let pool = get_pool().await?;

    let profile: Option<Profile> = sqlx::query_as(
        "UPDATE profiles SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;

    let profile = profile.ok_or(ApiError::NotFound)?;
    tracing::info!("{} set {} to {}", caller.email, profile.email, status.as_str());
    Ok(profile)
}

/// Activate or deactivate a distributor. Inactive distributors cannot sign in.
#[cfg(feature = "server")]
#[post("/api/distributors/status", session: tower_sessions::Session)]
pub async fn update_distributor_status(
    id: Uuid,
    status: AccountStatus,
) -> Result<Profile, ServerFnError> {
    update_distributor_status_inner(&session, id, status)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/distributors/status")]
pub async fn update_distributor_status(
    id: Uuid,
    status: AccountStatus,
) -> Result<Profile, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn list_admin_users_inner(session: &tower_sessions::Session) -> Result<Vec<AdminUser>, ApiError> {
    require_admin(session).await?;
    let pool = get_pool().await?;

    let rows: Vec<AdminUser> = sqlx::query_as("SELECT * FROM admin_users ORDER BY created_at")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

#[cfg(feature = "server")]
#[get("/api/admins", session: tower_sessions::Session)]
pub async fn list_admin_users() -> Result<Vec<AdminUser>, ServerFnError> {
    list_admin_users_inner(&session)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/admins")]
pub async fn list_admin_users() -> Result<Vec<AdminUser>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Insert the `users` + `admin_users` pair inside an open transaction.
#[cfg(feature = "server")]
async fn insert_admin(
    tx: &mut Transaction<'_, Postgres>,
    draft: &AdminUserDraft,
    password: &str,
) -> Result<AdminUser, ApiError> {
    let email = draft.email.trim().to_lowercase();
    let id = insert_user(tx, &email, password).await?;

    let admin: AdminUser = sqlx::query_as(
        "INSERT INTO admin_users (id, email, full_name, role) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(id)
    .bind(&email)
    .bind(non_blank(&draft.full_name))
    .bind(draft.role.as_str())
    .fetch_one(&mut **tx)
    .await?;
    Ok(admin)
}

#[cfg(feature = "server")]
async fn create_admin_user_inner(
    session: &tower_sessions::Session,
    draft: AdminUserDraft,
    password: String,
) -> Result<AdminUser, ApiError> {
    let caller = require_admin(session).await?;
    check(&draft)?;
    check_password(&password)?;

    let pool = get_pool().await?;
    let mut tx = pool.begin().await?;
    let admin = insert_admin(&mut tx, &draft, &password).await?;
    tx.commit().await?;

    tracing::info!("{} created admin {}", caller.email, admin.email);
    Ok(admin)
}

/// Create a staff login.
#[cfg(feature = "server")]
#[post("/api/admins/create", session: tower_sessions::Session)]
pub async fn create_admin_user(draft: AdminUserDraft, password: String) -> Result<AdminUser, ServerFnError> {
    create_admin_user_inner(&session, draft, password)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/admins/create")]
pub async fn create_admin_user(draft: AdminUserDraft, password: String) -> Result<AdminUser, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn update_admin_user_status_inner(
    session: &tower_sessions::Session,
    id: Uuid,
    status: AccountStatus,
) -> Result<AdminUser, ApiError> {
    let caller = require_admin(session).await?;
    if id == caller.id && status == AccountStatus::Inactive {
        return Err(ApiError::Validation(
            "You cannot deactivate your own account".to_string(),
        ));
    }

    let pool = get_pool().await?;
    let admin: Option<AdminUser> =
        sqlx::query_as("UPDATE admin_users SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await?;

    let admin = admin.ok_or(ApiError::NotFound)?;
    tracing::info!("{} set admin {} to {}", caller.email, admin.email, status.as_str());
    Ok(admin)
}

/// Activate or deactivate a staff login.
#[cfg(feature = "server")]
#[post("/api/admins/status", session: tower_sessions::Session)]
pub async fn update_admin_user_status(
    id: Uuid,
    status: AccountStatus,
) -> Result<AdminUser, ServerFnError> {
    update_admin_user_status_inner(&session, id, status)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/admins/status")]
pub async fn update_admin_user_status(
    id: Uuid,
    status: AccountStatus,
) -> Result<AdminUser, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create the configured first admin when the `admin_users` table is empty.
#[cfg(feature = "server")]
pub async fn bootstrap_admin(pool: &PgPool, config: &ServerConfig) -> Result<(), ApiError> {
    let Some(bootstrap) = &config.bootstrap_admin else {
        return Ok(());
    };

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_users")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        tracing::debug!("Admin accounts exist, skipping bootstrap");
        return Ok(());
    }

    let draft = AdminUserDraft {
        email: bootstrap.email.clone(),
        full_name: "Administrator".to_string(),
        role: domain::models::AdminRole::SuperAdmin,
    };
    check(&draft)?;
    check_password(&bootstrap.password)?;

    let mut tx = pool.begin().await?;
    let admin = insert_admin(&mut tx, &draft, &bootstrap.password).await?;
    tx.commit().await?;

    tracing::info!("Bootstrapped admin account {}", admin.email);
    Ok(())
}
