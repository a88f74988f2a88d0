use dioxus::prelude::*;

use domain::models::{AccountStatus, AssetKind, Product};
use domain::Layout;

use crate::components::use_error_toast;
use crate::routes::Route;
use crate::views::{LoadingScreen, PageHeader};

#[derive(Debug, Clone, PartialEq)]
struct DashboardStats {
    products: usize,
    active_products: usize,
    distributors: usize,
    active_distributors: usize,
    announcements: usize,
    files: usize,
    most_viewed: Vec<Product>,
}

async fn load_stats() -> Result<DashboardStats, ServerFnError> {
    let products = api::list_products().await?;
    let distributors = api::list_distributors().await?;
    let announcements = api::list_announcements().await?;
    let mut files = 0;
    for kind in AssetKind::ALL {
        files += api::list_assets(kind).await?.len();
    }

    let mut most_viewed = products.clone();
    most_viewed.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    most_viewed.truncate(5);

    Ok(DashboardStats {
        products: products.len(),
        active_products: products.iter().filter(|p| p.active).count(),
        distributors: distributors.len(),
        active_distributors: distributors
            .iter()
            .filter(|d| d.status == AccountStatus::Active)
            .count(),
        announcements: announcements.len(),
        files,
        most_viewed,
    })
}

#[component]
pub fn DashboardView(layout: Layout) -> Element {
    let mut stats = use_resource(load_stats);
    use_error_toast(stats);

    rsx! {
        div {
            class: if layout.is_mobile() { "view-page view-page--mobile" } else { "view-page" },
            PageHeader {
                title: "Dashboard",
                on_refresh: move |_| stats.restart(),
            }
            match &*stats.read() {
                None => rsx! { LoadingScreen {} },
                Some(Err(e)) => rsx! { crate::views::LoadError { message: e.to_string() } },
                Some(Ok(stats)) => rsx! {
                    div {
                        class: if layout.is_mobile() { "stat-grid stat-grid--stacked" } else { "stat-grid" },
                        StatCard {
                            to: Route::AdminProducts {},
                            label: "Products",
                            value: "{stats.products}",
                            detail: "{stats.active_products} active",
                        }
                        StatCard {
                            to: Route::AdminDistributors {},
                            label: "Distributors",
                            value: "{stats.distributors}",
                            detail: "{stats.active_distributors} active",
                        }
                        StatCard {
                            to: Route::AdminAnnouncements {},
                            label: "Announcements",
                            value: "{stats.announcements}",
                        }
                        StatCard {
                            to: Route::AdminDocumentation {},
                            label: "Library files",
                            value: "{stats.files}",
                        }
                    }
                    h2 { class: "view-section-title", "Most viewed products" }
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Product" }
                                th { "Views" }
                                th { "Downloads" }
                            }
                        }
                        tbody {
                            for product in stats.most_viewed.iter() {
                                tr {
                                    key: "{product.id}",
                                    td { "{product.name}" }
                                    td { "{product.view_count}" }
                                    td { "{product.download_count}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn StatCard(to: Route, label: String, value: String, #[props(default)] detail: Option<String>) -> Element {
    rsx! {
        Link {
            to: to,
            class: "card stat-card",
            span { class: "view-muted", "{label}" }
            span { class: "stat-value", "{value}" }
            if let Some(detail) = detail {
                span { class: "view-muted", "{detail}" }
            }
        }
    }
}
