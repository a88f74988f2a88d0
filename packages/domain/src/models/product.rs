//! Product catalog rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::non_blank;
use super::contains_folded;

/// A row from `products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub category: String,
    /// List price.
    pub price: f64,
    /// Price offered to distributors, when it differs from list.
    pub distributor_price: Option<f64>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub brochure_url: Option<String>,
    pub view_count: i64,
    pub download_count: i64,
    /// Inactive products are hidden from distributors.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The price a distributor pays.
    pub fn net_price(&self) -> f64 {
        self.distributor_price.unwrap_or(self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub distributor_price: Option<f64>,
    pub image_url: String,
    pub video_url: String,
    pub brochure_url: String,
    pub active: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            sku: String::new(),
            description: String::new(),
            category: String::new(),
            price: 0.0,
            distributor_price: None,
            image_url: String::new(),
            video_url: String::new(),
            brochure_url: String::new(),
            active: true,
        }
    }
}

impl ProductDraft {
    pub fn description(&self) -> Option<String> {
        non_blank(&self.description)
    }

    pub fn image_url(&self) -> Option<String> {
        non_blank(&self.image_url)
    }

    pub fn video_url(&self) -> Option<String> {
        non_blank(&self.video_url)
    }

    pub fn brochure_url(&self) -> Option<String> {
        non_blank(&self.brochure_url)
    }
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            sku: p.sku.clone(),
            description: p.description.clone().unwrap_or_default(),
            category: p.category.clone(),
            price: p.price,
            distributor_price: p.distributor_price,
            image_url: p.image_url.clone().unwrap_or_default(),
            video_url: p.video_url.clone().unwrap_or_default(),
            brochure_url: p.brochure_url.clone().unwrap_or_default(),
            active: p.active,
        }
    }
}

/// Catalog search: free text over name/SKU/description plus an optional category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub text: String,
    pub category: Option<String>,
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        let text = self.text.trim();
        text.is_empty()
            || contains_folded(&product.name, text)
            || contains_folded(&product.sku, text)
            || product
                .description
                .as_deref()
                .is_some_and(|d| contains_folded(d, text))
    }
}

pub fn filter_products(products: &[Product], query: &ProductQuery) -> Vec<Product> {
    products
        .iter()
        .filter(|p| query.matches(p))
        .cloned()
        .collect()
}

/// Distinct non-empty categories, sorted.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut out: Vec<String> = products
        .iter()
        .map(|p| p.category.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn product(name: &str, sku: &str, category: &str) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::nil(),
            name: name.to_string(),
            sku: sku.to_string(),
            description: Some(format!("{name} for industrial use")),
            category: category.to_string(),
            price: 100.0,
            distributor_price: None,
            image_url: None,
            video_url: None,
            brochure_url: None,
            view_count: 0,
            download_count: 0,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn sample_products() -> Vec<Product> {
        vec![
            product("Pressure Valve", "PV-100", "Valves"),
            product("Check Valve", "CV-200", "valves"),
            product("Flow Meter", "FM-10", "Sensors"),
            product("Gasket Kit", "GK-1", ""),
        ]
    }

    #[test]
    fn test_query_matches_name_sku_and_description() {
        let rows = sample_products();
        let by_name = ProductQuery { text: "valve".into(), category: None };
        assert_eq!(filter_products(&rows, &by_name).len(), 2);

        let by_sku = ProductQuery { text: "fm-10".into(), category: None };
        assert_eq!(filter_products(&rows, &by_sku)[0].name, "Flow Meter");

        let by_description = ProductQuery { text: "industrial".into(), category: None };
        assert_eq!(filter_products(&rows, &by_description).len(), 4);
    }

    #[test]
    fn test_query_category_is_case_insensitive() {
        let rows = sample_products();
        let query = ProductQuery {
            text: String::new(),
            category: Some("VALVES".into()),
        };
        assert_eq!(filter_products(&rows, &query).len(), 2);
    }

    #[test]
    fn test_categories_sorted_distinct_non_empty() {
        let rows = sample_products();
        assert_eq!(categories(&rows), vec!["Sensors", "Valves", "valves"]);
    }

    #[test]
    fn test_net_price_prefers_distributor_price() {
        let mut p = product("Pump", "P-1", "Pumps");
        assert_eq!(p.net_price(), 100.0);
        p.distributor_price = Some(80.0);
        assert_eq!(p.net_price(), 80.0);
    }

    #[test]
    fn test_draft_round_trips_optional_fields() {
        let mut p = product("Pump", "P-1", "Pumps");
        p.image_url = Some("https://cdn.example.com/p.png".into());
        let draft = ProductDraft::from(&p);
        assert_eq!(draft.image_url(), p.image_url);
        assert_eq!(draft.video_url(), None);
    }
}
