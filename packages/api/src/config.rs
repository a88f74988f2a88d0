//! # Server configuration from environment variables
//!
//! Loaded once (after `dotenvy` reads any `.env` file) and cached for the life
//! of the process.
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | `DATABASE_URL` | — (required) | PostgreSQL connection string |
//! | `DATABASE_MAX_CONNECTIONS` | `5` | Pool size |
//! | `STORAGE_DIR` | `./storage` | Where uploaded files are written |
//! | `PUBLIC_STORAGE_URL` | `/storage` | URL prefix uploaded files are served under |
//! | `SESSION_SECURE` | `false` | Mark the session cookie `Secure` (enable behind HTTPS) |
//! | `BOOTSTRAP_ADMIN_EMAIL` / `BOOTSTRAP_ADMIN_PASSWORD` | unset | Create this admin on startup if no admin exists |

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::error::ApiError;

static CONFIG: OnceLock<ServerConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub storage_dir: PathBuf,
    pub public_storage_url: String,
    pub session_secure: bool,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

#[derive(Clone, PartialEq)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    /// The process-wide configuration, read from the environment on first use.
    pub fn load() -> Result<&'static ServerConfig, ApiError> {
        if let Some(config) = CONFIG.get() {
            return Ok(config);
        }
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        Ok(CONFIG.get_or_init(|| config))
    }

    /// Build a config from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ApiError::Config("DATABASE_URL not set".to_string()))?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ApiError::Config(format!("DATABASE_MAX_CONNECTIONS invalid: {v}")))?,
            None => 5,
        };

        let session_secure = match lookup("SESSION_SECURE").as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ApiError::Config(format!("SESSION_SECURE invalid: {other}")));
            }
        };

        let bootstrap_admin = match (lookup("BOOTSTRAP_ADMIN_EMAIL"), lookup("BOOTSTRAP_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) if !email.trim().is_empty() => Some(BootstrapAdmin {
                email: email.trim().to_lowercase(),
                password,
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            max_connections,
            storage_dir: lookup("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./storage")),
            public_storage_url: lookup("PUBLIC_STORAGE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "/storage".to_string()),
            session_secure,
            bootstrap_admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<ServerConfig, ApiError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/portal")]).unwrap();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.storage_dir, PathBuf::from("./storage"));
        assert_eq!(config.public_storage_url, "/storage");
        assert!(!config.session_secure);
        assert!(config.bootstrap_admin.is_none());
    }

    #[test]
    fn test_database_url_required() {
        assert!(matches!(config(&[]), Err(ApiError::Config(_))));
        assert!(matches!(config(&[("DATABASE_URL", "  ")]), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("DATABASE_URL", "postgres://db/portal"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("PUBLIC_STORAGE_URL", "https://files.example.com/"),
            ("SESSION_SECURE", "true"),
            ("BOOTSTRAP_ADMIN_EMAIL", " Ops@Example.com "),
            ("BOOTSTRAP_ADMIN_PASSWORD", "correct horse"),
        ])
        .unwrap();
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.public_storage_url, "https://files.example.com");
        assert!(config.session_secure);
        assert_eq!(config.bootstrap_admin.unwrap().email, "ops@example.com");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config(&[("DATABASE_URL", "x"), ("DATABASE_MAX_CONNECTIONS", "0")]).is_err());
        assert!(config(&[("DATABASE_URL", "x"), ("SESSION_SECURE", "maybe")]).is_err());
    }

    #[test]
    fn test_bootstrap_password_is_redacted() {
        let admin = BootstrapAdmin {
            email: "ops@example.com".into(),
            password: "hunter22".into(),
        };
        assert!(!format!("{admin:?}").contains("hunter22"));
    }
}
