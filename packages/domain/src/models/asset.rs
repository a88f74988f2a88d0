//! Documentation, marketing and training files.
//!
//! The three libraries share one row shape and differ only in table, storage
//! bucket and labels, all derived from [`AssetKind`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::non_blank;
use super::{contains_folded, UnknownVariant};
use crate::storage::StorageBucket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Documentation,
    Marketing,
    Training,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Documentation, AssetKind::Marketing, AssetKind::Training];

    /// Backing table. Only ever one of these constants, so safe to format into SQL.
    pub fn table(self) -> &'static str {
        match self {
            AssetKind::Documentation => "documentation",
            AssetKind::Marketing => "marketing_assets",
            AssetKind::Training => "training_materials",
        }
    }

    pub fn bucket(self) -> StorageBucket {
        match self {
            AssetKind::Documentation => StorageBucket::Documentation,
            AssetKind::Marketing => StorageBucket::Marketing,
            AssetKind::Training => StorageBucket::Training,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            AssetKind::Documentation => "documentation",
            AssetKind::Marketing => "marketing",
            AssetKind::Training => "training",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AssetKind::Documentation => "Documentation",
            AssetKind::Marketing => "Marketing Assets",
            AssetKind::Training => "Training Materials",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for AssetKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetKind::ALL
            .into_iter()
            .find(|k| k.slug() == s)
            .ok_or_else(|| UnknownVariant {
                column: "kind",
                value: s.to_string(),
            })
    }
}

/// A row from one of the asset tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Asset {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub file_url: String,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    pub product_id: Option<Uuid>,
    pub download_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Asset {
    /// Human-readable file size, e.g. `2.4 MB`.
    pub fn size_label(&self) -> Option<String> {
        self.file_size.map(format_size)
    }
}

pub fn format_size(bytes: i64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes.max(0) as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub file_url: String,
    pub file_name: String,
    pub file_size: Option<i64>,
    pub file_type: String,
    pub product_id: Option<Uuid>,
}

impl AssetDraft {
    pub fn description(&self) -> Option<String> {
        non_blank(&self.description)
    }

    pub fn category(&self) -> Option<String> {
        non_blank(&self.category)
    }

    pub fn file_name(&self) -> Option<String> {
        non_blank(&self.file_name)
    }

    pub fn file_type(&self) -> Option<String> {
        non_blank(&self.file_type)
    }
}

impl From<&Asset> for AssetDraft {
    fn from(a: &Asset) -> Self {
        Self {
            title: a.title.clone(),
            description: a.description.clone().unwrap_or_default(),
            category: a.category.clone().unwrap_or_default(),
            file_url: a.file_url.clone(),
            file_name: a.file_name.clone().unwrap_or_default(),
            file_size: a.file_size,
            file_type: a.file_type.clone().unwrap_or_default(),
            product_id: a.product_id,
        }
    }
}

/// Library search over title, description and category.
pub fn filter_assets(assets: &[Asset], text: &str) -> Vec<Asset> {
    let text = text.trim();
    assets
        .iter()
        .filter(|a| {
            text.is_empty()
                || contains_folded(&a.title, text)
                || a.description.as_deref().is_some_and(|d| contains_folded(d, text))
                || a.category.as_deref().is_some_and(|c| contains_folded(c, text))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(title: &str, category: Option<&str>) -> Asset {
        Asset {
            id: Uuid::nil(),
            title: title.to_string(),
            description: None,
            category: category.map(str::to_string),
            file_url: "https://files.example.com/a.pdf".to_string(),
            file_name: Some("a.pdf".to_string()),
            file_size: Some(2_500_000),
            file_type: Some("application/pdf".to_string()),
            product_id: None,
            download_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_kind_slug_round_trip() {
        for kind in AssetKind::ALL {
            assert_eq!(kind.slug().parse::<AssetKind>(), Ok(kind));
        }
        assert!("brochures".parse::<AssetKind>().is_err());
        assert_eq!(AssetKind::Marketing.table(), "marketing_assets");
        assert_eq!(AssetKind::Training.bucket(), StorageBucket::Training);
    }

    #[test]
    fn test_filter_assets_by_title_and_category() {
        let rows = vec![
            asset("Installation Guide", Some("Manuals")),
            asset("Spring Promo", Some("Campaigns")),
            asset("Safety Sheet", None),
        ];
        assert_eq!(filter_assets(&rows, "guide").len(), 1);
        assert_eq!(filter_assets(&rows, "campaign")[0].title, "Spring Promo");
        assert_eq!(filter_assets(&rows, "  ").len(), 3);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(asset("x", None).size_label().as_deref(), Some("2.4 MB"));
    }
}
