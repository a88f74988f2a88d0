//! Portal roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which route subtree a user may access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    /// The under-privileged default for anything that cannot be resolved.
    #[default]
    Distributor,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Distributor => "distributor",
        }
    }

    /// Map the nullable `profiles.role` column onto a role.
    ///
    /// Missing, empty and unrecognised values all resolve to [`Role::Distributor`].
    pub fn from_stored(value: Option<&str>) -> Role {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "distributor" => Ok(Role::Distributor),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Admin ".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("DISTRIBUTOR".parse::<Role>(), Ok(Role::Distributor));
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_from_stored_defaults_to_distributor() {
        assert_eq!(Role::from_stored(None), Role::Distributor);
        assert_eq!(Role::from_stored(Some("")), Role::Distributor);
        assert_eq!(Role::from_stored(Some("superuser")), Role::Distributor);
        assert_eq!(Role::from_stored(Some("admin")), Role::Admin);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"distributor\"").unwrap();
        assert_eq!(role, Role::Distributor);
    }
}
