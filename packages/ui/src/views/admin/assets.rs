use dioxus::prelude::*;
use uuid::Uuid;

use domain::models::{Asset, AssetDraft, AssetKind, Product};
use domain::{FieldErrors, Layout, Validate};

use crate::components::{
    use_error_toast, use_toast, Button, ButtonVariant, Field, Input, Select, Textarea, ToastOptions,
};
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::views::admin::upload::{FileUpload, UploadedFile};
use crate::views::{ConfirmDialog, EmptyState, LoadingScreen, ModalOverlay, PageHeader};
use crate::Icon;

/// Manage one library: documentation, marketing or training files.
#[component]
pub fn AssetAdminView(kind: AssetKind, layout: Layout) -> Element {
    let mut assets = use_resource(use_reactive!(|(kind,)| async move { api::list_assets(kind).await }));
    use_error_toast(assets);
    let products = use_resource(|| async move { api::list_products().await.unwrap_or_default() });
    let toast = use_toast();

    // `Some(None)` is a new file, `Some(Some(asset))` an edit
    let mut editing = use_signal(|| Option::<Option<Asset>>::None);
    let mut deleting = use_signal(|| Option::<Asset>::None);

    let confirm_delete = move |_| async move {
        let Some(asset) = deleting() else {
            return;
        };
        deleting.set(None);
        match api::delete_asset(kind, asset.id).await {
            Ok(()) => {
                toast.success(format!("Deleted {}", asset.title), ToastOptions::new());
                assets.restart();
            }
            Err(e) => toast.error(e.to_string(), ToastOptions::new()),
        }
    };

    rsx! {
        div {
            class: if layout.is_mobile() { "view-page view-page--mobile" } else { "view-page" },
            PageHeader {
                title: kind.title(),
                on_refresh: move |_| assets.restart(),
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| editing.set(Some(None)),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Add file"
                }
            }

            match &*assets.read() {
                None => rsx! { LoadingScreen {} },
                Some(Err(e)) => rsx! { crate::views::LoadError { message: e.to_string() } },
                Some(Ok(rows)) if rows.is_empty() => rsx! { EmptyState { message: "No files yet." } },
                Some(Ok(rows)) => rsx! {
                    table {
                        class: if layout.is_mobile() { "data-table data-table--compact" } else { "data-table" },
                        thead {
                            tr {
                                th { "Title" }
                                if !layout.is_mobile() {
                                    th { "Category" }
                                    th { "Size" }
                                    th { "Downloads" }
                                }
                                th {}
                            }
                        }
                        tbody {
                            for asset in rows.iter().cloned() {
                                tr {
                                    key: "{asset.id}",
                                    td {
                                        a { href: "{asset.file_url}", target: "_blank", "{asset.title}" }
                                    }
                                    if !layout.is_mobile() {
                                        td { "{asset.category.clone().unwrap_or_default()}" }
                                        td { "{asset.size_label().unwrap_or_default()}" }
                                        td { "{asset.download_count}" }
                                    }
                                    td {
                                        class: "row-actions",
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Edit",
                                            onclick: {
                                                let asset = asset.clone();
                                                move |_| editing.set(Some(Some(asset.clone())))
                                            },
                                            Icon { icon: FaPen, width: 12, height: 12 }
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Delete",
                                            onclick: {
                                                let asset = asset.clone();
                                                move |_| deleting.set(Some(asset.clone()))
                                            },
                                            Icon { icon: FaTrash, width: 12, height: 12 }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }

        if let Some(target) = editing() {
            ModalOverlay {
                wide: true,
                on_close: move |_| editing.set(None),
                AssetForm {
                    kind,
                    id: target.as_ref().map(|a| a.id),
                    initial: target.as_ref().map(AssetDraft::from).unwrap_or_default(),
                    products: products.read().clone().unwrap_or_default(),
                    on_saved: move |saved: Asset| {
                        editing.set(None);
                        toast.success(format!("Saved {}", saved.title), ToastOptions::new());
                        assets.restart();
                    },
                    on_cancel: move |_| editing.set(None),
                }
            }
        }

        if let Some(asset) = deleting() {
            ConfirmDialog {
                title: "Delete file",
                message: format!("Remove {} from {}?", asset.title, kind.title()),
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn AssetForm(
    kind: AssetKind,
    id: Option<Uuid>,
    initial: AssetDraft,
    products: Vec<Product>,
    on_saved: EventHandler<Asset>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut draft = use_signal(|| initial.clone());
    let mut errors = use_signal(FieldErrors::new);
    let mut server_error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| async move {
        evt.prevent_default();
        let next = draft();
        let problems = next.validate();
        if !problems.is_empty() {
            errors.set(problems);
            return;
        }
        errors.set(FieldErrors::new());

        saving.set(true);
        match api::save_asset(kind, id, next).await {
            Ok(saved) => on_saved.call(saved),
            Err(e) => server_error.set(Some(e.to_string())),
        }
        saving.set(false);
    };

    let on_uploaded = move |file: UploadedFile| {
        let mut d = draft.write();
        if d.title.trim().is_empty() {
            d.title = file.file_name.clone();
        }
        d.file_url = file.url;
        d.file_name = file.file_name;
        d.file_size = Some(file.size);
        d.file_type = file.file_type;
    };

    let err = move |field: &str| errors.read().get(field).map(str::to_string);
    let selected_product = draft().product_id.map(|p| p.to_string()).unwrap_or_default();

    rsx! {
        form {
            class: "modal-body",
            onsubmit: onsubmit,
            h2 { class: "modal-title", if id.is_some() { "Edit file" } else { "Add file" } }

            Field { id: "asset-file", label: "File", error: err("file_url"),
                FileUpload {
                    id: "asset-file",
                    bucket: kind.bucket(),
                    on_uploaded: on_uploaded,
                }
                Input {
                    placeholder: "or paste a URL",
                    value: draft().file_url,
                    oninput: move |evt: FormEvent| draft.write().file_url = evt.value(),
                }
            }
            Field { id: "asset-title", label: "Title", error: err("title"),
                Input {
                    id: "asset-title",
                    value: draft().title,
                    oninput: move |evt: FormEvent| draft.write().title = evt.value(),
                }
            }
            Field { id: "asset-description", label: "Description",
                Textarea {
                    id: "asset-description",
                    rows: "3",
                    value: draft().description,
                    oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                }
            }
            div {
                class: "form-grid",
                Field { id: "asset-category", label: "Category",
                    Input {
                        id: "asset-category",
                        value: draft().category,
                        oninput: move |evt: FormEvent| draft.write().category = evt.value(),
                    }
                }
                Field { id: "asset-product", label: "Product",
                    Select {
                        id: "asset-product",
                        onchange: move |evt: FormEvent| {
                            draft.write().product_id = Uuid::parse_str(&evt.value()).ok();
                        },
                        option { value: "", selected: selected_product.is_empty(), "None" }
                        for product in products {
                            option {
                                key: "{product.id}",
                                value: "{product.id}",
                                selected: selected_product == product.id.to_string(),
                                "{product.name} ({product.sku})"
                            }
                        }
                    }
                }
            }

            if let Some(msg) = server_error() {
                div { class: "form-error", "{msg}" }
            }

            div {
                class: "form-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Save" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}
