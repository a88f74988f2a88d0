//! # Form validation
//!
//! Views run [`Validate::validate`] before calling a server function and show
//! each message next to its field. Server functions run the same checks and
//! reject the first failure, so a hand-crafted request cannot skip them.

use std::collections::BTreeMap;

use crate::locale::Locale;
use crate::models::{AdminUserDraft, AnnouncementDraft, AssetDraft, DistributorDraft, ProductDraft};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first message, for contexts that can only show one.
    pub fn first(&self) -> Option<String> {
        self.0
            .iter()
            .next()
            .map(|(field, message)| format!("{field}: {message}"))
    }
}

pub trait Validate {
    fn validate(&self) -> FieldErrors;
}

pub fn email_error(email: &str) -> Option<&'static str> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Some("Please enter a valid email");
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Some("Please enter a valid email");
    }
    None
}

pub fn password_error(password: &str) -> Option<&'static str> {
    (password.chars().count() < MIN_PASSWORD_LEN).then_some("Password must be at least 8 characters")
}

/// Whether `url` is an absolute http(s) URL or a path on this site.
/// Protocol-relative `//host` links point elsewhere and are refused.
pub fn is_safe_link(url: &str) -> bool {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        return true;
    }
    url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\")
}

/// Optional links must be absolute http(s) URLs or site-relative paths.
fn link_error(url: &str) -> Option<&'static str> {
    if url.trim().is_empty() || is_safe_link(url) {
        None
    } else {
        Some("Must be a URL starting with http:// or https://")
    }
}

fn required(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
    }
}

impl Validate for ProductDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name", &self.name, "Name");
        required(&mut errors, "sku", &self.sku, "SKU");
        required(&mut errors, "category", &self.category, "Category");
        if !self.price.is_finite() || self.price < 0.0 {
            errors.add("price", "Price must be zero or more");
        }
        if let Some(p) = self.distributor_price {
            if !p.is_finite() || p < 0.0 {
                errors.add("distributor_price", "Price must be zero or more");
            }
        }
        for (field, value) in [
            ("image_url", &self.image_url),
            ("video_url", &self.video_url),
            ("brochure_url", &self.brochure_url),
        ] {
            if let Some(msg) = link_error(value) {
                errors.add(field, msg);
            }
        }
        errors
    }
}

impl Validate for AssetDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        required(&mut errors, "title", &self.title, "Title");
        if self.file_url.trim().is_empty() {
            errors.add("file_url", "Upload a file or enter its URL");
        } else if let Some(msg) = link_error(&self.file_url) {
            errors.add("file_url", msg);
        }
        if self.file_size.is_some_and(|s| s < 0) {
            errors.add("file_size", "File size cannot be negative");
        }
        errors
    }
}

impl Validate for AnnouncementDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.title.exact(Locale::En).is_none() {
            errors.add("title", "An English title is required");
        }
        if self.content.is_empty() {
            errors.add("content", "Content is required");
        }
        if let Some(msg) = link_error(&self.link) {
            errors.add("link", msg);
        }
        errors
    }
}

impl Validate for DistributorDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(msg) = email_error(&self.email) {
            errors.add("email", msg);
        }
        required(&mut errors, "full_name", &self.full_name, "Contact name");
        required(&mut errors, "company_name", &self.company_name, "Company");
        errors
    }
}

impl Validate for AdminUserDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(msg) = email_error(&self.email) {
            errors.add("email", msg);
        }
        required(&mut errors, "full_name", &self.full_name, "Name");
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedText;

    #[test]
    fn test_email_error() {
        assert_eq!(email_error("dana@example.com"), None);
        assert!(email_error("dana").is_some());
        assert!(email_error("@example.com").is_some());
        assert!(email_error("dana@localhost").is_some());
        assert!(email_error("dana@example.").is_some());
    }

    #[test]
    fn test_password_error_counts_chars() {
        assert!(password_error("short").is_some());
        assert_eq!(password_error("ñandú-pw"), None);
    }

    #[test]
    fn test_product_draft_field_errors() {
        let draft = ProductDraft {
            price: -1.0,
            image_url: "ftp://old".into(),
            ..ProductDraft::default()
        };
        let errors = draft.validate();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("sku"), Some("SKU is required"));
        assert!(errors.get("price").is_some());
        assert!(errors.get("image_url").is_some());
        assert_eq!(errors.get("video_url"), None);
    }

    #[test]
    fn test_valid_product_draft() {
        let draft = ProductDraft {
            name: "Valve".into(),
            sku: "V-1".into(),
            category: "Valves".into(),
            price: 12.5,
            image_url: "/storage/product-media/abc-valve.png".into(),
            ..ProductDraft::default()
        };
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_announcement_requires_english_title() {
        let mut draft = AnnouncementDraft::default();
        draft.title.set(Locale::Es, "Hola");
        draft.content = LocalizedText::english("Body");
        let errors = draft.validate();
        assert!(errors.get("title").is_some());
        assert_eq!(errors.get("content"), None);
    }

    #[test]
    fn test_first_error_names_field() {
        let errors = DistributorDraft::default().validate();
        assert_eq!(errors.first().as_deref(), Some("company_name: Company is required"));
    }

    #[test]
    fn test_asset_requires_file() {
        let draft = AssetDraft {
            title: "Guide".into(),
            ..AssetDraft::default()
        };
        assert_eq!(draft.validate().get("file_url"), Some("Upload a file or enter its URL"));
    }

    #[test]
    fn test_link_error_refuses_other_hosts_and_schemes() {
        assert_eq!(link_error(""), None);
        assert_eq!(link_error("/storage/marketing/a.png"), None);
        assert_eq!(link_error("HTTPS://example.com/a.png"), None);
        assert!(link_error("//evil.example/a.png").is_some());
        assert!(link_error("/\\evil.example").is_some());
        assert!(link_error("javascript:alert(1)").is_some());
    }
}
