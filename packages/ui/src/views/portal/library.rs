use dioxus::prelude::*;

use domain::models::{filter_assets, Asset, AssetKind};
use domain::Layout;

use crate::components::{use_error_toast, Input};
use crate::icons::FaDownload;
use crate::views::{EmptyState, LoadingScreen, PageHeader};
use crate::Icon;

/// A searchable documentation, training or marketing library.
#[component]
pub fn LibraryView(kind: AssetKind, layout: Layout) -> Element {
    let mut assets = use_resource(use_reactive!(|(kind,)| async move { api::list_assets(kind).await }));
    use_error_toast(assets);
    let mut text = use_signal(String::new);

    rsx! {
        div {
            class: if layout.is_mobile() { "view-page view-page--mobile" } else { "view-page" },
            PageHeader {
                title: kind.title(),
                on_refresh: move |_| assets.restart(),
            }
            Input {
                r#type: "search",
                placeholder: "Search files",
                value: text(),
                oninput: move |evt: FormEvent| text.set(evt.value()),
            }

            match &*assets.read() {
                None => rsx! { LoadingScreen {} },
                Some(Err(_)) => rsx! { EmptyState { message: "Files could not be loaded." } },
                Some(Ok(all)) => {
                    let shown = filter_assets(all, &text());
                    if shown.is_empty() {
                        rsx! { EmptyState { message: "No files found." } }
                    } else {
                        rsx! {
                            div {
                                class: if layout.is_mobile() { "asset-list" } else { "asset-grid" },
                                for asset in shown {
                                    AssetCard { key: "{asset.id}", kind, asset: asset.clone() }
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
fn AssetCard(kind: AssetKind, asset: Asset) -> Element {
    let id = asset.id;
    let details = [asset.file_type.clone(), asset.size_label()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");

    rsx! {
        div {
            class: "card asset-card",
            div {
                class: "asset-body",
                if let Some(category) = &asset.category {
                    span { class: "badge", "{category}" }
                }
                h3 { class: "asset-title", "{asset.title}" }
                if let Some(description) = &asset.description {
                    p { class: "view-muted", "{description}" }
                }
                if !details.is_empty() {
                    p { class: "asset-details", "{details}" }
                }
            }
            a {
                class: "button",
                "data-style": "outline",
                href: "{asset.file_url}",
                target: "_blank",
                onclick: move |_| async move {
                    if let Err(e) = api::record_asset_download(kind, id).await {
                        tracing::debug!("Download not recorded: {e}");
                    }
                },
                Icon { icon: FaDownload, width: 12, height: 12 }
                " Download"
            }
        }
    }
}
