//! Session keys and helpers over `tower_sessions::Session`.

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::ApiError;

/// Key for storing the signed-in user id in the session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// The signed-in user id, if any. A malformed id counts as signed out.
pub async fn session_user_id(session: &Session) -> Result<Option<Uuid>, ApiError> {
    let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
    Ok(user_id.and_then(|id| Uuid::parse_str(&id).ok()))
}

/// Bind the session to a user, rotating the session id first.
pub async fn sign_in_session(session: &Session, user_id: Uuid) -> Result<(), ApiError> {
    session.cycle_id().await?;
    session
        .insert(SESSION_USER_ID_KEY, user_id.to_string())
        .await?;
    Ok(())
}
