//! Announcements shown on the distributor home page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::non_blank;
use super::UnknownVariant;
use crate::locale::LocalizedText;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementCategory {
    #[default]
    General,
    Product,
    Training,
    Promotion,
    Urgent,
}

impl AnnouncementCategory {
    pub const ALL: [AnnouncementCategory; 5] = [
        AnnouncementCategory::General,
        AnnouncementCategory::Product,
        AnnouncementCategory::Training,
        AnnouncementCategory::Promotion,
        AnnouncementCategory::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementCategory::General => "general",
            AnnouncementCategory::Product => "product",
            AnnouncementCategory::Training => "training",
            AnnouncementCategory::Promotion => "promotion",
            AnnouncementCategory::Urgent => "urgent",
        }
    }
}

impl TryFrom<String> for AnnouncementCategory {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AnnouncementCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or(UnknownVariant {
                column: "category",
                value,
            })
    }
}

/// A row from `announcements`. Title and content are JSON objects keyed by locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Announcement {
    pub id: Uuid,
    #[cfg_attr(feature = "server", sqlx(json))]
    pub title: LocalizedText,
    /// Markdown.
    #[cfg_attr(feature = "server", sqlx(json))]
    pub content: LocalizedText,
    #[cfg_attr(feature = "server", sqlx(try_from = "String"))]
    pub category: AnnouncementCategory,
    pub link: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementDraft {
    pub title: LocalizedText,
    pub content: LocalizedText,
    pub category: AnnouncementCategory,
    pub link: String,
    pub published: bool,
}

impl Default for AnnouncementDraft {
    fn default() -> Self {
        Self {
            title: LocalizedText::new(),
            content: LocalizedText::new(),
            category: AnnouncementCategory::default(),
            link: String::new(),
            published: true,
        }
    }
}

impl AnnouncementDraft {
    pub fn link(&self) -> Option<String> {
        non_blank(&self.link)
    }
}

impl From<&Announcement> for AnnouncementDraft {
    fn from(a: &Announcement) -> Self {
        Self {
            title: a.title.clone(),
            content: a.content.clone(),
            category: a.category,
            link: a.link.clone().unwrap_or_default(),
            published: a.published,
        }
    }
}

/// Published announcements, newest first.
pub fn visible_announcements(rows: &[Announcement]) -> Vec<Announcement> {
    let mut out: Vec<Announcement> = rows.iter().filter(|a| a.published).cloned().collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_visible_announcements_newest_first() {
        let now = Utc::now();
        let make = |days: i64, published: bool| Announcement {
            id: Uuid::nil(),
            title: LocalizedText::english(format!("day {days}")),
            content: LocalizedText::new(),
            category: AnnouncementCategory::General,
            link: None,
            published,
            created_at: now - Duration::days(days),
        };
        let rows = vec![make(3, true), make(1, true), make(0, false), make(2, true)];
        let visible = visible_announcements(&rows);
        let titles: Vec<&str> = visible.iter().map(|a| a.title.get(crate::Locale::En)).collect();
        assert_eq!(titles, vec!["day 1", "day 2", "day 3"]);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            AnnouncementCategory::try_from("urgent".to_string()),
            Ok(AnnouncementCategory::Urgent)
        );
        assert!(AnnouncementCategory::try_from("spam".to_string()).is_err());
    }
}
