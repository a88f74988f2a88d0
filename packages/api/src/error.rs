//! Server-side error type.
//!
//! Server functions build their results with [`ApiError`] and convert at the
//! boundary with [`server_error`], so the client toast shows the `Display` text.

use dioxus::prelude::ServerFnError;
use domain::Validate;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Forbidden")]
    Forbidden,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is inactive")]
    Inactive,
    #[error("{0}")]
    Validation(String),
    #[error("Not found")]
    NotFound,
    #[error("An account with this email already exists")]
    DuplicateEmail,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Map a unique-constraint violation on insert to a friendlier message.
    pub fn from_insert(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::DuplicateEmail,
            _ => ApiError::Database(e),
        }
    }
}

/// Reject a draft with the first field error, mirroring the inline form checks.
pub fn check(draft: &impl Validate) -> Result<(), ApiError> {
    match draft.validate().first() {
        Some(msg) => Err(ApiError::Validation(msg)),
        None => Ok(()),
    }
}

/// Convert at the server-function boundary, logging anything unexpected.
pub fn server_error(e: ApiError) -> ServerFnError {
    match &e {
        ApiError::Database(_) | ApiError::Session(_) | ApiError::Storage(_) | ApiError::Config(_) => {
            tracing::error!("{e}");
        }
        _ => {}
    }
    ServerFnError::new(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_shown_to_users() {
        assert_eq!(ApiError::InvalidCredentials.to_string(), "Invalid email or password");
        assert_eq!(ApiError::Validation("sku: SKU is required".into()).to_string(), "sku: SKU is required");
        assert_eq!(ApiError::Config("DATABASE_URL not set".into()).to_string(), "Configuration error: DATABASE_URL not set");
    }

    #[test]
    fn test_check_reports_first_field() {
        let draft = domain::models::AdminUserDraft {
            email: "not-an-email".into(),
            ..Default::default()
        };
        match check(&draft) {
            Err(ApiError::Validation(msg)) => assert_eq!(msg, "email: Please enter a valid email"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
