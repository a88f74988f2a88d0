use dioxus::prelude::*;
use uuid::Uuid;

use domain::models::{DistributorDraft, Profile};
use domain::validation::password_error;
use domain::{FieldErrors, Layout, Validate};

use crate::components::{use_error_toast, use_toast, Button, ButtonVariant, Field, Input, ToastOptions};
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::views::{ConfirmDialog, EmptyState, LoadingScreen, ModalOverlay, PageHeader};
use crate::Icon;

#[component]
pub fn DistributorAdminView(layout: Layout) -> Element {
    let mut distributors = use_resource(|| async move { api::list_distributors().await });
    use_error_toast(distributors);
    let toast = use_toast();

    let mut editing = use_signal(|| Option::<Option<Profile>>::None);
    let mut deleting = use_signal(|| Option::<Profile>::None);

    let toggle_status = move |profile: Profile| async move {
        let next = profile.status.toggled();
        match api::update_distributor_status(profile.id, next).await {
            Ok(updated) => {
                toast.success(
                    format!("{} is now {}", updated.display_name(), next.as_str()),
                    ToastOptions::new(),
                );
                distributors.restart();
            }
            Err(e) => toast.error(e.to_string(), ToastOptions::new()),
        }
    };

    let confirm_delete = move |_| async move {
        let Some(profile) = deleting() else {
            return;
        };
        deleting.set(None);
        match api::delete_distributor(profile.id).await {
            Ok(()) => {
                toast.success(format!("Deleted {}", profile.display_name()), ToastOptions::new());
                distributors.restart();
            }
            Err(e) => toast.error(e.to_string(), ToastOptions::new()),
        }
    };

    rsx! {
        div {
            class: if layout.is_mobile() { "view-page view-page--mobile" } else { "view-page" },
            PageHeader {
                title: "Distributors",
                on_refresh: move |_| distributors.restart(),
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| editing.set(Some(None)),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " New distributor"
                }
            }

            match &*distributors.read() {
                None => rsx! { LoadingScreen {} },
                Some(Err(e)) => rsx! { crate::views::LoadError { message: e.to_string() } },
                Some(Ok(rows)) if rows.is_empty() => rsx! { EmptyState { message: "No distributors yet." } },
                Some(Ok(rows)) => rsx! {
                    table {
                        class: if layout.is_mobile() { "data-table data-table--compact" } else { "data-table" },
                        thead {
                            tr {
                                th { "Company" }
                                th { "Contact" }
                                if !layout.is_mobile() {
                                    th { "Email" }
                                    th { "Territory" }
                                }
                                th { "Status" }
                                th {}
                            }
                        }
                        tbody {
                            for profile in rows.iter().cloned() {
                                tr {
                                    key: "{profile.id}",
                                    td { "{profile.company_name.clone().unwrap_or_default()}" }
                                    td { "{profile.display_name()}" }
                                    if !layout.is_mobile() {
                                        td { "{profile.email}" }
                                        td { "{profile.territory.clone().unwrap_or_default()}" }
                                    }
                                    td {
                                        button {
                                            r#type: "button",
                                            class: if profile.is_active() { "badge badge--success" } else { "badge badge--danger" },
                                            title: "Toggle status",
                                            onclick: {
                                                let profile = profile.clone();
                                                move |_| toggle_status(profile.clone())
                                            },
                                            "{profile.status.as_str()}"
                                        }
                                    }
                                    td {
                                        class: "row-actions",
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Edit",
                                            onclick: {
                                                let profile = profile.clone();
                                                move |_| editing.set(Some(Some(profile.clone())))
                                            },
                                            Icon { icon: FaPen, width: 12, height: 12 }
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Delete",
                                            onclick: {
                                                let profile = profile.clone();
                                                move |_| deleting.set(Some(profile.clone()))
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
                on_close: move |_| editing.set(None),
                DistributorForm {
                    id: target.as_ref().map(|p| p.id),
                    initial: target.as_ref().map(DistributorDraft::from).unwrap_or_default(),
                    on_saved: move |saved: Profile| {
                        editing.set(None);
                        toast.success(format!("Saved {}", saved.display_name()), ToastOptions::new());
                        distributors.restart();
                    },
                    on_cancel: move |_| editing.set(None),
                }
            }
        }

        if let Some(profile) = deleting() {
            ConfirmDialog {
                title: "Delete distributor",
                message: format!("Delete {} and their login? This cannot be undone.", profile.display_name()),
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

/// New distributors also get an initial password; edits leave it alone.
#[component]
fn DistributorForm(
    id: Option<Uuid>,
    initial: DistributorDraft,
    on_saved: EventHandler<Profile>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut draft = use_signal(|| initial.clone());
    let mut password = use_signal(String::new);
    let mut errors = use_signal(FieldErrors::new);
    let mut server_error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| async move {
        evt.prevent_default();
        let next = draft();
        let mut problems = next.validate();
        if id.is_none() {
            if let Some(msg) = password_error(&password()) {
                problems.add("password", msg);
            }
        }
        if !problems.is_empty() {
            errors.set(problems);
            return;
        }
        errors.set(FieldErrors::new());

        saving.set(true);
        let result = match id {
            Some(id) => api::update_distributor(id, next).await,
            None => api::create_distributor(next, password()).await,
        };
        match result {
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
            h2 { class: "modal-title", if id.is_some() { "Edit distributor" } else { "New distributor" } }

            Field { id: "distributor-company", label: "Company", error: err("company_name"),
                Input {
                    id: "distributor-company",
                    value: draft().company_name,
                    oninput: move |evt: FormEvent| draft.write().company_name = evt.value(),
                }
            }
            Field { id: "distributor-name", label: "Contact name", error: err("full_name"),
                Input {
                    id: "distributor-name",
                    value: draft().full_name,
                    oninput: move |evt: FormEvent| draft.write().full_name = evt.value(),
                }
            }
            Field { id: "distributor-email", label: "Email", error: err("email"),
                Input {
                    id: "distributor-email",
                    r#type: "email",
                    value: draft().email,
                    oninput: move |evt: FormEvent| draft.write().email = evt.value(),
                }
            }
            div {
                class: "form-grid",
                Field { id: "distributor-territory", label: "Territory",
                    Input {
                        id: "distributor-territory",
                        value: draft().territory,
                        oninput: move |evt: FormEvent| draft.write().territory = evt.value(),
                    }
                }
                Field { id: "distributor-phone", label: "Phone",
                    Input {
                        id: "distributor-phone",
                        r#type: "tel",
                        value: draft().phone,
                        oninput: move |evt: FormEvent| draft.write().phone = evt.value(),
                    }
                }
            }
            if id.is_none() {
                Field {
                    id: "distributor-password",
                    label: "Initial password",
                    error: err("password"),
                    hint: "Share this with the distributor; they can change it from their account page.",
                    Input {
                        id: "distributor-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
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
