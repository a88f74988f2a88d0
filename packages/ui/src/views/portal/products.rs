use dioxus::prelude::*;

use domain::models::{categories, filter_products, Product, ProductQuery};
use domain::Layout;

use crate::components::{use_error_toast, Input, Select};
use crate::routes::Route;
use crate::views::{EmptyState, LoadingScreen, PageHeader};

/// Product catalog with text search and a category filter.
#[component]
pub fn ProductCatalogView(layout: Layout) -> Element {
    let mut products = use_resource(|| async move { api::list_products().await });
    use_error_toast(products);

    let mut text = use_signal(String::new);
    let mut category = use_signal(|| Option::<String>::None);

    rsx! {
        div {
            class: if layout.is_mobile() { "view-page view-page--mobile" } else { "view-page" },
            PageHeader {
                title: "Products",
                on_refresh: move |_| products.restart(),
            }

            match &*products.read() {
                None => rsx! { LoadingScreen {} },
                Some(Err(_)) => rsx! { EmptyState { message: "Products could not be loaded." } },
                Some(Ok(all)) => {
                    let query = ProductQuery { text: text(), category: category() };
                    let shown = filter_products(all, &query);
                    let options = categories(all);
                    rsx! {
                        div {
                            class: if layout.is_mobile() { "filters filters--stacked" } else { "filters" },
                            Input {
                                r#type: "search",
                                placeholder: "Search by name, SKU or description",
                                value: text(),
                                oninput: move |evt: FormEvent| text.set(evt.value()),
                            }
                            Select {
                                onchange: move |evt: FormEvent| {
                                    let value = evt.value();
                                    category.set((!value.is_empty()).then_some(value));
                                },
                                option { value: "", "All categories" }
                                for name in options {
                                    option {
                                        value: "{name}",
                                        selected: category().as_deref() == Some(name.as_str()),
                                        "{name}"
                                    }
                                }
                            }
                        }
                        if shown.is_empty() {
                            EmptyState { message: "No products match your search." }
                        } else {
                            div {
                                class: if layout.is_mobile() { "product-list" } else { "product-grid" },
                                for product in shown {
                                    ProductCard { key: "{product.id}", product: product.clone(), layout }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProductCard(product: Product, layout: Layout) -> Element {
    let price = format!("{:.2}", product.net_price());
    rsx! {
        Link {
            to: Route::PortalProductDetail { id: product.id.to_string() },
            class: if layout.is_mobile() { "product-card product-card--row" } else { "product-card" },
            if let Some(image) = &product.image_url {
                img { class: "product-image", src: "{image}", alt: "{product.name}" }
            } else {
                div { class: "product-image product-image--empty" }
            }
            div {
                class: "product-body",
                span { class: "badge", "{product.category}" }
                h3 { class: "product-name", "{product.name}" }
                p { class: "view-muted", "SKU {product.sku}" }
                p { class: "product-price", "${price}" }
            }
        }
    }
}
