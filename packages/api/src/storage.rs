//! File upload server function.
//!
//! Objects are written to `STORAGE_DIR/<bucket>/<object>` and the web binary
//! serves that directory under `PUBLIC_STORAGE_URL`.

use dioxus::prelude::*;

use domain::StorageBucket;

#[cfg(feature = "server")]
use crate::{
    config::ServerConfig,
    error::{server_error, ApiError},
    identity::require_admin,
};
#[cfg(feature = "server")]
use domain::storage::{object_name, public_url, MAX_UPLOAD_BYTES};

#[cfg(feature = "server")]
async fn upload_file_inner(
    session: &tower_sessions::Session,
    bucket: StorageBucket,
    file_name: String,
    bytes: Vec<u8>,
) -> Result<String, ApiError> {
    let caller = require_admin(session).await?;
    if bytes.is_empty() {
        return Err(ApiError::Validation("file: File is empty".to_string()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::Validation(
            "file: Files must be 50 MB or smaller".to_string(),
        ));
    }

    let config = ServerConfig::load()?;
    let object = object_name(&uuid::Uuid::new_v4().simple().to_string(), &file_name);
    let dir = config.storage_dir.join(bucket.as_str());
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(&object), &bytes).await?;

    tracing::info!(
        "{} uploaded {} bytes to {bucket}/{object}",
        caller.email,
        bytes.len()
    );
    Ok(public_url(&config.public_storage_url, bucket, &object))
}

/// Store a file and return its public URL.
#[cfg(feature = "server")]
#[post("/api/storage/upload", session: tower_sessions::Session)]
pub async fn upload_file(
    bucket: StorageBucket,
    file_name: String,
    bytes: Vec<u8>,
) -> Result<String, ServerFnError> {
    upload_file_inner(&session, bucket, file_name, bytes)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/storage/upload")]
pub async fn upload_file(
    bucket: StorageBucket,
    file_name: String,
    bytes: Vec<u8>,
) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
