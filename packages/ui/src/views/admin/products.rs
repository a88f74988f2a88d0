use dioxus::prelude::*;
use uuid::Uuid;

use domain::models::{Product, ProductDraft};
use domain::{FieldErrors, Layout, StorageBucket, Validate};

use crate::components::{
    use_error_toast, use_toast, Button, ButtonVariant, Field, Input, Textarea, ToastOptions,
};
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::views::admin::upload::FileUpload;
use crate::views::{ConfirmDialog, EmptyState, LoadingScreen, ModalOverlay, PageHeader};
use crate::Icon;

/// Which product the editor is open for.
#[derive(Debug, Clone, PartialEq)]
enum Editing {
    New,
    Existing(Product),
}

#[component]
pub fn ProductAdminView(layout: Layout) -> Element {
    let mut products = use_resource(|| async move { api::list_products().await });
    use_error_toast(products);
    let toast = use_toast();

    let mut editing = use_signal(|| Option::<Editing>::None);
    let mut deleting = use_signal(|| Option::<Product>::None);

    let confirm_delete = move |_| async move {
        let Some(product) = deleting() else {
            return;
        };
        deleting.set(None);
        match api::delete_product(product.id).await {
            Ok(()) => {
                toast.success(format!("Deleted {}", product.name), ToastOptions::new());
                products.restart();
            }
            Err(e) => toast.error(e.to_string(), ToastOptions::new()),
        }
    };

    rsx! {
        div {
            class: if layout.is_mobile() { "view-page view-page--mobile" } else { "view-page" },
            PageHeader {
                title: "Products",
                on_refresh: move |_| products.restart(),
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| editing.set(Some(Editing::New)),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " New product"
                }
            }

            match &*products.read() {
                None => rsx! { LoadingScreen {} },
                Some(Err(e)) => rsx! { crate::views::LoadError { message: e.to_string() } },
                Some(Ok(rows)) if rows.is_empty() => rsx! { EmptyState { message: "No products yet." } },
                Some(Ok(rows)) => rsx! {
                    table {
                        class: if layout.is_mobile() { "data-table data-table--compact" } else { "data-table" },
                        thead {
                            tr {
                                th { "Name" }
                                th { "SKU" }
                                if !layout.is_mobile() {
                                    th { "Category" }
                                    th { "Price" }
                                    th { "Views" }
                                }
                                th { "Status" }
                                th {}
                            }
                        }
                        tbody {
                            for product in rows.iter().cloned() {
                                ProductRow {
                                    key: "{product.id}",
                                    product: product.clone(),
                                    compact: layout.is_mobile(),
                                    on_edit: move |p| editing.set(Some(Editing::Existing(p))),
                                    on_delete: move |p| deleting.set(Some(p)),
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
                ProductForm {
                    id: match &target { Editing::Existing(p) => Some(p.id), Editing::New => None },
                    initial: match &target { Editing::Existing(p) => ProductDraft::from(p), Editing::New => ProductDraft::default() },
                    on_saved: move |saved: Product| {
                        editing.set(None);
                        toast.success(format!("Saved {}", saved.name), ToastOptions::new());
                        products.restart();
                    },
                    on_cancel: move |_| editing.set(None),
                }
            }
        }

        if let Some(product) = deleting() {
            ConfirmDialog {
                title: "Delete product",
                message: format!("Delete {} ({})? Linked library files stay but lose the link.", product.name, product.sku),
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[component]
fn ProductRow(
    product: Product,
    compact: bool,
    on_edit: EventHandler<Product>,
    on_delete: EventHandler<Product>,
) -> Element {
    let price = format!("{:.2}", product.price);
    let edit_target = product.clone();
    let delete_target = product.clone();

    rsx! {
        tr {
            td { "{product.name}" }
            td { "{product.sku}" }
            if !compact {
                td { "{product.category}" }
                td { "${price}" }
                td { "{product.view_count}" }
            }
            td {
                if product.active {
                    span { class: "badge badge--success", "Active" }
                } else {
                    span { class: "badge", "Hidden" }
                }
            }
            td {
                class: "row-actions",
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Edit",
                    onclick: move |_| on_edit.call(edit_target.clone()),
                    Icon { icon: FaPen, width: 12, height: 12 }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Delete",
                    onclick: move |_| on_delete.call(delete_target.clone()),
                    Icon { icon: FaTrash, width: 12, height: 12 }
                }
            }
        }
    }
}

fn parse_price(text: &str) -> Result<Option<f64>, ()> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<f64>().map(Some).map_err(|_| ())
}

#[component]
fn ProductForm(
    id: Option<Uuid>,
    initial: ProductDraft,
    on_saved: EventHandler<Product>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut draft = use_signal(|| initial.clone());
    let mut price_text = use_signal(|| if id.is_some() { initial.price.to_string() } else { String::new() });
    let mut net_text = use_signal(|| initial.distributor_price.map(|p| p.to_string()).unwrap_or_default());
    let mut errors = use_signal(FieldErrors::new);
    let mut server_error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| async move {
        evt.prevent_default();
        let mut next = draft();
        let price = parse_price(&price_text());
        let net = parse_price(&net_text());
        next.price = price.unwrap_or_default().unwrap_or(0.0);
        next.distributor_price = net.unwrap_or_default();

        let mut problems = next.validate();
        if price.is_err() {
            problems.add("price", "Enter a number");
        }
        if net.is_err() {
            problems.add("distributor_price", "Enter a number");
        }
        if !problems.is_empty() {
            errors.set(problems);
            return;
        }
        errors.set(FieldErrors::new());

        saving.set(true);
        match api::save_product(id, next).await {
            Ok(saved) => on_saved.call(saved),
            Err(e) => server_error.set(Some(e.to_string())),
        }
        saving.set(false);
    };

    let err = move |field: &str| errors.read().get(field).map(str::to_string);

    rsx! {
        form {
            class: "modal-body",
            onsubmit: onsubmit,
            h2 { class: "modal-title", if id.is_some() { "Edit product" } else { "New product" } }

            div {
                class: "form-grid",
                Field { id: "product-name", label: "Name", error: err("name"),
                    Input {
                        id: "product-name",
                        value: draft().name,
                        oninput: move |evt: FormEvent| draft.write().name = evt.value(),
                    }
                }
                Field { id: "product-sku", label: "SKU", error: err("sku"),
                    Input {
                        id: "product-sku",
                        value: draft().sku,
                        oninput: move |evt: FormEvent| draft.write().sku = evt.value(),
                    }
                }
                Field { id: "product-category", label: "Category", error: err("category"),
                    Input {
                        id: "product-category",
                        value: draft().category,
                        oninput: move |evt: FormEvent| draft.write().category = evt.value(),
                    }
                }
                Field { id: "product-price", label: "List price", error: err("price"),
                    Input {
                        id: "product-price",
                        r#type: "number",
                        step: "0.01",
                        min: "0",
                        value: price_text(),
                        oninput: move |evt: FormEvent| price_text.set(evt.value()),
                    }
                }
                Field {
                    id: "product-net-price",
                    label: "Distributor price",
                    error: err("distributor_price"),
                    hint: "Leave empty to use the list price.",
                    Input {
                        id: "product-net-price",
                        r#type: "number",
                        step: "0.01",
                        min: "0",
                        value: net_text(),
                        oninput: move |evt: FormEvent| net_text.set(evt.value()),
                    }
                }
            }

            Field { id: "product-description", label: "Description",
                Textarea {
                    id: "product-description",
                    rows: "4",
                    value: draft().description,
                    oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                }
            }

            Field { id: "product-image", label: "Image URL", error: err("image_url"),
                Input {
                    id: "product-image",
                    value: draft().image_url,
                    oninput: move |evt: FormEvent| draft.write().image_url = evt.value(),
                }
                FileUpload {
                    id: "product-image-file",
                    bucket: StorageBucket::ProductMedia,
                    accept: "image/*",
                    on_uploaded: move |file: super::upload::UploadedFile| draft.write().image_url = file.url,
                }
            }
            Field { id: "product-video", label: "Video URL", error: err("video_url"),
                Input {
                    id: "product-video",
                    value: draft().video_url,
                    oninput: move |evt: FormEvent| draft.write().video_url = evt.value(),
                }
            }
            Field { id: "product-brochure", label: "Brochure URL", error: err("brochure_url"),
                Input {
                    id: "product-brochure",
                    value: draft().brochure_url,
                    oninput: move |evt: FormEvent| draft.write().brochure_url = evt.value(),
                }
                FileUpload {
                    id: "product-brochure-file",
                    bucket: StorageBucket::ProductMedia,
                    accept: ".pdf",
                    on_uploaded: move |file: super::upload::UploadedFile| draft.write().brochure_url = file.url,
                }
            }

            label {
                class: "checkbox",
                input {
                    r#type: "checkbox",
                    checked: draft().active,
                    onchange: move |evt: FormEvent| draft.write().active = evt.checked(),
                }
                " Visible to distributors"
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
