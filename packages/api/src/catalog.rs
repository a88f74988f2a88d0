//! Product catalog and announcement server functions.
//!
//! Distributors read only active products and published announcements; every
//! write requires an admin caller.

use dioxus::prelude::*;
use uuid::Uuid;

use domain::models::{Announcement, AnnouncementDraft, Product, ProductDraft};

#[cfg(feature = "server")]
use crate::{
    db::get_pool,
    error::{check, server_error, ApiError},
    identity::{require_admin, require_session},
};

#[cfg(feature = "server")]
fn sku_conflict(e: sqlx::Error) -> ApiError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::Validation("sku: A product with this SKU already exists".to_string())
        }
        _ => ApiError::Database(e),
    }
}

#[cfg(feature = "server")]
async fn list_products_inner(session: &tower_sessions::Session) -> Result<Vec<Product>, ApiError> {
    let caller = require_session(session).await?;
    let pool = get_pool().await?;

    let sql = if caller.is_admin() {
        "SELECT * FROM products ORDER BY name"
    } else {
        "SELECT * FROM products WHERE active ORDER BY name"
    };
    let products: Vec<Product> = sqlx::query_as(sql).fetch_all(pool).await?;
    Ok(products)
}

/// All products the caller may see, by name.
#[cfg(feature = "server")]
#[get("/api/products", session: tower_sessions::Session)]
pub async fn list_products() -> Result<Vec<Product>, ServerFnError> {
    list_products_inner(&session).await.map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/products")]
pub async fn list_products() -> Result<Vec<Product>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn get_product_inner(session: &tower_sessions::Session, id: Uuid) -> Result<Product, ApiError> {
    let caller = require_session(session).await?;
    let pool = get_pool().await?;

    let product: Option<Product> = sqlx::query_as("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match product {
        Some(p) if p.active || caller.is_admin() => Ok(p),
        _ => Err(ApiError::NotFound),
    }
}

/// A single product.
#[cfg(feature = "server")]
#[post("/api/products/get", session: tower_sessions::Session)]
pub async fn get_product(id: Uuid) -> Result<Product, ServerFnError> {
    get_product_inner(&session, id).await.map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/products/get")]
pub async fn get_product(id: Uuid) -> Result<Product, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn save_product_inner(
    session: &tower_sessions::Session,
    id: Option<Uuid>,
    draft: ProductDraft,
) -> Result<Product, ApiError> {
    let caller = require_admin(session).await?;
    check(&draft)?;
    let pool = get_pool().await?;

    let query = match id {
        Some(id) => sqlx::query_as(
            "UPDATE products SET name = $2, sku = $3, description = $4, category = $5,
                 price = $6, distributor_price = $7, image_url = $8, video_url = $9,
                 brochure_url = $10, active = $11, updated_at = NOW()
             WHERE id = $1 RETURNING *",
        )
        .bind(id),
        None => sqlx::query_as(
            "INSERT INTO products (id, name, sku, description, category, price,
                 distributor_price, image_url, video_url, brochure_url, active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(Uuid::new_v4()),
    };

    let product: Option<Product> = query
        .bind(draft.name.trim())
        .bind(draft.sku.trim())
        .bind(draft.description())
        .bind(draft.category.trim())
        .bind(draft.price)
        .bind(draft.distributor_price)
        .bind(draft.image_url())
        .bind(draft.video_url())
        .bind(draft.brochure_url())
        .bind(draft.active)
        .fetch_optional(pool)
        .await
        .map_err(sku_conflict)?;

    let product = product.ok_or(ApiError::NotFound)?;
    tracing::info!("{} saved product {}", caller.email, product.sku);
    Ok(product)
}

/// Create (`id = None`) or update a product.
#[cfg(feature = "server")]
#[post("/api/products/save", session: tower_sessions::Session)]
pub async fn save_product(id: Option<Uuid>, draft: ProductDraft) -> Result<Product, ServerFnError> {
    save_product_inner(&session, id, draft)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/products/save")]
pub async fn save_product(id: Option<Uuid>, draft: ProductDraft) -> Result<Product, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn delete_product_inner(session: &tower_sessions::Session, id: Uuid) -> Result<(), ApiError> {
    let caller = require_admin(session).await?;
    let pool = get_pool().await?;

    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }
    tracing::info!("{} deleted product {id}", caller.email);
    Ok(())
}

/// Delete a product. Linked library files keep their rows with `product_id` cleared.
#[cfg(feature = "server")]
#[post("/api/products/delete", session: tower_sessions::Session)]
pub async fn delete_product(id: Uuid) -> Result<(), ServerFnError> {
    delete_product_inner(&session, id).await.map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/products/delete")]
pub async fn delete_product(id: Uuid) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn bump_product_counter(
    session: &tower_sessions::Session,
    id: Uuid,
    column: &'static str,
) -> Result<(), ApiError> {
    require_session(session).await?;
    let pool = get_pool().await?;

    // `column` is one of two literals below
    sqlx::query(&format!(
        "UPDATE products SET {column} = {column} + 1 WHERE id = $1 AND active"
    ))
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Count a product detail view.
#[cfg(feature = "server")]
#[post("/api/products/view", session: tower_sessions::Session)]
pub async fn record_product_view(id: Uuid) -> Result<(), ServerFnError> {
    bump_product_counter(&session, id, "view_count")
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/products/view")]
pub async fn record_product_view(id: Uuid) -> Result<(), ServerFnError> {
    Ok(())
}

/// Count a brochure download.
#[cfg(feature = "server")]
#[post("/api/products/download", session: tower_sessions::Session)]
pub async fn record_product_download(id: Uuid) -> Result<(), ServerFnError> {
    bump_product_counter(&session, id, "download_count")
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/products/download")]
pub async fn record_product_download(id: Uuid) -> Result<(), ServerFnError> {
    Ok(())
}

#[cfg(feature = "server")]
async fn list_announcements_inner(
    session: &tower_sessions::Session,
) -> Result<Vec<Announcement>, ApiError> {
    let caller = require_session(session).await?;
    let pool = get_pool().await?;

    let sql = if caller.is_admin() {
        "SELECT * FROM announcements ORDER BY created_at DESC"
    } else {
        "SELECT * FROM announcements WHERE published ORDER BY created_at DESC"
    };
    let rows: Vec<Announcement> = sqlx::query_as(sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Announcements the caller may see, newest first.
#[cfg(feature = "server")]
#[get("/api/announcements", session: tower_sessions::Session)]
pub async fn list_announcements() -> Result<Vec<Announcement>, ServerFnError> {
    list_announcements_inner(&session)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/announcements")]
pub async fn list_announcements() -> Result<Vec<Announcement>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn save_announcement_inner(
    session: &tower_sessions::Session,
    id: Option<Uuid>,
    draft: AnnouncementDraft,
) -> Result<Announcement, ApiError> {
    let caller = require_admin(session).await?;
    check(&draft)?;
    let pool = get_pool().await?;

    let query = match id {
        Some(id) => sqlx::query_as(
            "UPDATE announcements SET title = $2, content = $3, category = $4, link = $5,
                 published = $6
             WHERE id = $1 RETURNING *",
        )
        .bind(id),
        None => sqlx::query_as(
            "INSERT INTO announcements (id, title, content, category, link, published)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::new_v4()),
    };

    let row: Option<Announcement> = query
        .bind(sqlx::types::Json(&draft.title))
        .bind(sqlx::types::Json(&draft.content))
        .bind(draft.category.as_str())
        .bind(draft.link())
        .bind(draft.published)
        .fetch_optional(pool)
        .await?;

    let row = row.ok_or(ApiError::NotFound)?;
    tracing::info!("{} saved announcement {}", caller.email, row.id);
    Ok(row)
}

/// Create (`id = None`) or update an announcement.
#[cfg(feature = "server")]
#[post("/api/announcements/save", session: tower_sessions::Session)]
pub async fn save_announcement(
    id: Option<Uuid>,
    draft: AnnouncementDraft,
) -> Result<Announcement, ServerFnError> {
    save_announcement_inner(&session, id, draft)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/announcements/save")]
pub async fn save_announcement(
    id: Option<Uuid>,
    draft: AnnouncementDraft,
) -> Result<Announcement, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn delete_announcement_inner(session: &tower_sessions::Session, id: Uuid) -> Result<(), ApiError> {
    require_admin(session).await?;
    let pool = get_pool().await?;

    let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(())
}

#[cfg(feature = "server")]
#[post("/api/announcements/delete", session: tower_sessions::Session)]
pub async fn delete_announcement(id: Uuid) -> Result<(), ServerFnError> {
    delete_announcement_inner(&session, id)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/announcements/delete")]
pub async fn delete_announcement(id: Uuid) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
