//! Documentation, marketing and training library server functions.
//!
//! The three tables share one row shape, so each function takes the
//! [`AssetKind`] and formats its table name into the query.

use dioxus::prelude::*;
use uuid::Uuid;

use domain::models::{Asset, AssetDraft, AssetKind};

#[cfg(feature = "server")]
use crate::{
    db::get_pool,
    error::{check, server_error, ApiError},
    identity::{require_admin, require_session},
};

#[cfg(feature = "server")]
fn unknown_product(e: sqlx::Error) -> ApiError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            ApiError::Validation("product_id: Linked product no longer exists".to_string())
        }
        _ => ApiError::Database(e),
    }
}

#[cfg(feature = "server")]
async fn list_assets_inner(
    session: &tower_sessions::Session,
    kind: AssetKind,
) -> Result<Vec<Asset>, ApiError> {
    require_session(session).await?;
    let pool = get_pool().await?;

    let sql = format!("SELECT * FROM {} ORDER BY created_at DESC", kind.table());
    let assets: Vec<Asset> = sqlx::query_as(&sql).fetch_all(pool).await?;
    Ok(assets)
}

/// Every file in one library, newest first.
#[cfg(feature = "server")]
#[post("/api/assets", session: tower_sessions::Session)]
pub async fn list_assets(kind: AssetKind) -> Result<Vec<Asset>, ServerFnError> {
    list_assets_inner(&session, kind)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/assets")]
pub async fn list_assets(kind: AssetKind) -> Result<Vec<Asset>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn save_asset_inner(
    session: &tower_sessions::Session,
    kind: AssetKind,
    id: Option<Uuid>,
    draft: AssetDraft,
) -> Result<Asset, ApiError> {
    let caller = require_admin(session).await?;
    check(&draft)?;
    let pool = get_pool().await?;

    let table = kind.table();
    let sql = match id {
        Some(_) => format!(
            "UPDATE {table} SET title = $2, description = $3, category = $4, file_url = $5,
                 file_name = $6, file_size = $7, file_type = $8, product_id = $9
             WHERE id = $1 RETURNING *"
        ),
        None => format!(
            "INSERT INTO {table} (id, title, description, category, file_url, file_name,
                 file_size, file_type, product_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *"
        ),
    };

    let asset: Option<Asset> = sqlx::query_as(&sql)
        .bind(id.unwrap_or_else(Uuid::new_v4))
        .bind(draft.title.trim())
        .bind(draft.description())
        .bind(draft.category())
        .bind(draft.file_url.trim())
        .bind(draft.file_name())
        .bind(draft.file_size)
        .bind(draft.file_type())
        .bind(draft.product_id)
        .fetch_optional(pool)
        .await
        .map_err(unknown_product)?;

    let asset = asset.ok_or(ApiError::NotFound)?;
    tracing::info!("{} saved {kind} file {}", caller.email, asset.title);
    Ok(asset)
}

/// Create (`id = None`) or update a library file.
#[cfg(feature = "server")]
#[post("/api/assets/save", session: tower_sessions::Session)]
pub async fn save_asset(
    kind: AssetKind,
    id: Option<Uuid>,
    draft: AssetDraft,
) -> Result<Asset, ServerFnError> {
    save_asset_inner(&session, kind, id, draft)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/assets/save")]
pub async fn save_asset(
    kind: AssetKind,
    id: Option<Uuid>,
    draft: AssetDraft,
) -> Result<Asset, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn delete_asset_inner(
    session: &tower_sessions::Session,
    kind: AssetKind,
    id: Uuid,
) -> Result<(), ApiError> {
    let caller = require_admin(session).await?;
    let pool = get_pool().await?;

    let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }
    tracing::info!("{} deleted {kind} file {id}", caller.email);
    Ok(())
}

/// Delete a library row. The stored file itself is left in place.
#[cfg(feature = "server")]
#[post("/api/assets/delete", session: tower_sessions::Session)]
pub async fn delete_asset(kind: AssetKind, id: Uuid) -> Result<(), ServerFnError> {
    delete_asset_inner(&session, kind, id)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/assets/delete")]
pub async fn delete_asset(kind: AssetKind, id: Uuid) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn record_asset_download_inner(
    session: &tower_sessions::Session,
    kind: AssetKind,
    id: Uuid,
) -> Result<(), ApiError> {
    require_session(session).await?;
    let pool = get_pool().await?;

    let sql = format!(
        "UPDATE {} SET download_count = download_count + 1 WHERE id = $1",
        kind.table()
    );
    sqlx::query(&sql).bind(id).execute(pool).await?;
    Ok(())
}

/// Count a library download.
#[cfg(feature = "server")]
#[post("/api/assets/download", session: tower_sessions::Session)]
pub async fn record_asset_download(kind: AssetKind, id: Uuid) -> Result<(), ServerFnError> {
    record_asset_download_inner(&session, kind, id)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/assets/download")]
pub async fn record_asset_download(kind: AssetKind, id: Uuid) -> Result<(), ServerFnError> {
    Ok(())
}
