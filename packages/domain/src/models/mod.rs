//! # Table rows and editable drafts
//!
//! One struct per backend table row. Rows are `Serialize + Deserialize` so they
//! cross the server-function boundary unchanged, and derive `sqlx::FromRow` when
//! the `server` feature is on. Each writable table has a `*Draft` carrying only
//! the fields a form edits; the server fills in ids, counters and timestamps.
//!
//! | Module | Tables |
//! |--------|--------|
//! | [`account`] | `admin_users`, `profiles` |
//! | [`product`] | `products` |
//! | [`asset`] | `documentation`, `marketing_assets`, `training_materials` |
//! | [`announcement`] | `announcements` |

pub mod account;
pub mod announcement;
pub mod asset;
pub mod product;

pub use account::{non_blank, AccountStatus, AdminRole, AdminUser, AdminUserDraft, DistributorDraft, Profile};
pub use announcement::{visible_announcements, Announcement, AnnouncementCategory, AnnouncementDraft};
pub use asset::{filter_assets, format_size, Asset, AssetDraft, AssetKind};
pub use product::{categories, filter_products, Product, ProductDraft, ProductQuery};

/// A stored enum column held an unexpected value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unexpected {column} value: {value}")]
pub struct UnknownVariant {
    pub column: &'static str,
    pub value: String,
}

/// Case-insensitive substring match used by the catalog and library filters.
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
