use dioxus::prelude::*;
use uuid::Uuid;

use domain::models::{Asset, AssetKind, Product};
use domain::Layout;

use crate::components::{use_error_toast, Button, ButtonVariant};
use crate::icons::{FaArrowLeft, FaDownload, FaPlay};
use crate::routes::Route;
use crate::views::{EmptyState, LoadingScreen};
use crate::Icon;

/// One product, its media links and any documentation linked to it.
/// Opening the page counts a view; following the brochure counts a download.
#[component]
pub fn ProductDetailView(id: String, layout: Layout) -> Element {
    let product = use_resource({
        let id = id.clone();
        use_reactive!(|(id,)| async move {
            let id = Uuid::parse_str(&id).map_err(|_| ServerFnError::new("Product not found"))?;
            let product = api::get_product(id).await?;
            if let Err(e) = api::record_product_view(id).await {
                tracing::debug!("View not recorded: {e}");
            }
            Ok(product)
        })
    });
    use_error_toast(product);

    let docs = use_resource(use_reactive!(|(id,)| async move {
        let Ok(id) = Uuid::parse_str(&id) else {
            return Vec::new();
        };
        match api::list_assets(AssetKind::Documentation).await {
            Ok(rows) => rows.into_iter().filter(|a| a.product_id == Some(id)).collect(),
            Err(_) => Vec::new(),
        }
    }));

    let nav = use_navigator();

    rsx! {
        div {
            class: if layout.is_mobile() { "view-page view-page--mobile" } else { "view-page max-w-4xl" },
            Button {
                variant: ButtonVariant::Ghost,
                onclick: move |_| { nav.push(Route::PortalProducts {}); },
                Icon { icon: FaArrowLeft, width: 12, height: 12 }
                " All products"
            }

            match &*product.read() {
                None => rsx! { LoadingScreen {} },
                Some(Err(_)) => rsx! { EmptyState { message: "This product is not available." } },
                Some(Ok(product)) => rsx! {
                    ProductSummary {
                        product: product.clone(),
                        docs: docs.read().clone().unwrap_or_default(),
                        layout,
                    }
                },
            }
        }
    }
}

#[component]
fn ProductSummary(product: Product, docs: Vec<Asset>, layout: Layout) -> Element {
    let id = product.id;
    let list_price = format!("{:.2}", product.price);
    let net_price = format!("{:.2}", product.net_price());
    let discounted = product.distributor_price.is_some_and(|p| p < product.price);

    rsx! {
        div {
            class: if layout.is_mobile() { "product-detail product-detail--stacked" } else { "product-detail" },
            if let Some(image) = &product.image_url {
                img { class: "product-detail-image", src: "{image}", alt: "{product.name}" }
            }
            div {
                class: "product-detail-body",
                span { class: "badge", "{product.category}" }
                h1 { class: "view-title", "{product.name}" }
                p { class: "view-muted", "SKU {product.sku}" }
                div {
                    class: "product-price",
                    if discounted {
                        span { class: "price-list", "${list_price}" }
                    }
                    span { "${net_price}" }
                }
                if let Some(description) = &product.description {
                    p { class: "product-description", "{description}" }
                }
                div {
                    class: "form-actions",
                    if let Some(video) = &product.video_url {
                        a {
                            class: "button",
                            "data-style": "outline",
                            href: "{video}",
                            target: "_blank",
                            Icon { icon: FaPlay, width: 12, height: 12 }
                            " Watch video"
                        }
                    }
                    if let Some(brochure) = &product.brochure_url {
                        a {
                            class: "button",
                            "data-style": "primary",
                            href: "{brochure}",
                            target: "_blank",
                            onclick: move |_| async move {
                                if let Err(e) = api::record_product_download(id).await {
                                    tracing::debug!("Download not recorded: {e}");
                                }
                            },
                            Icon { icon: FaDownload, width: 12, height: 12 }
                            " Brochure"
                        }
                    }
                }
            }
        }

        if !docs.is_empty() {
            h2 { class: "view-section-title", "Documentation" }
            ul {
                class: "doc-links",
                for doc in docs {
                    li {
                        key: "{doc.id}",
                        a {
                            href: "{doc.file_url}",
                            target: "_blank",
                            onclick: move |_| async move {
                                if let Err(e) = api::record_asset_download(AssetKind::Documentation, doc.id).await {
                                    tracing::debug!("Download not recorded: {e}");
                                }
                            },
                            "{doc.title}"
                        }
                    }
                }
            }
        }
    }
}
