//! Admin accounts and user profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UnknownVariant;

/// `status` column shared by admin accounts and distributor profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AccountStatus::Active => AccountStatus::Inactive,
            AccountStatus::Inactive => AccountStatus::Active,
        }
    }
}

impl TryFrom<String> for AccountStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "active" => Ok(AccountStatus::Active),
            "inactive" => Ok(AccountStatus::Inactive),
            _ => Err(UnknownVariant {
                column: "status",
                value,
            }),
        }
    }
}

/// `admin_users.role`. Any of these resolves to the portal's admin role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    #[default]
    Admin,
    Editor,
}

impl AdminRole {
    pub const ALL: [AdminRole; 3] = [AdminRole::SuperAdmin, AdminRole::Admin, AdminRole::Editor];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Admin => "admin",
            AdminRole::Editor => "editor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "Super admin",
            AdminRole::Admin => "Admin",
            AdminRole::Editor => "Editor",
        }
    }
}

impl TryFrom<String> for AdminRole {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AdminRole::ALL
            .into_iter()
            .find(|r| r.as_str() == value)
            .ok_or(UnknownVariant {
                column: "role",
                value,
            })
    }
}

/// A row from `admin_users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    #[cfg_attr(feature = "server", sqlx(try_from = "String"))]
    pub role: AdminRole,
    #[cfg_attr(feature = "server", sqlx(try_from = "String"))]
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminUserDraft {
    pub email: String,
    pub full_name: String,
    pub role: AdminRole,
}

/// A row from `profiles`. Distributors are profiles without an admin account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub territory: Option<String>,
    pub phone: Option<String>,
    /// Nullable; see [`crate::Role::from_stored`].
    pub role: Option<String>,
    #[cfg_attr(feature = "server", sqlx(try_from = "String"))]
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

/// Editable distributor fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributorDraft {
    pub email: String,
    pub full_name: String,
    pub company_name: String,
    pub territory: String,
    pub phone: String,
}

impl From<&Profile> for DistributorDraft {
    fn from(p: &Profile) -> Self {
        Self {
            email: p.email.clone(),
            full_name: p.full_name.clone().unwrap_or_default(),
            company_name: p.company_name.clone().unwrap_or_default(),
            territory: p.territory.clone().unwrap_or_default(),
            phone: p.phone.clone().unwrap_or_default(),
        }
    }
}

/// Trim a form value, mapping blank to `None` for nullable columns.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_toggle() {
        assert_eq!(AccountStatus::try_from("inactive".to_string()), Ok(AccountStatus::Inactive));
        assert!(AccountStatus::try_from("banned".to_string()).is_err());
        assert_eq!(AccountStatus::Active.toggled(), AccountStatus::Inactive);
    }

    #[test]
    fn test_admin_role_parse() {
        assert_eq!(AdminRole::try_from("super_admin".to_string()), Ok(AdminRole::SuperAdmin));
        let err = AdminRole::try_from("root".to_string()).unwrap_err();
        assert_eq!(err.column, "role");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank(" North "), Some("North".to_string()));
    }
}
