//! Admin accounts. Admins can add other admins and deactivate them, but never
//! themselves.

use dioxus::prelude::*;

use domain::models::{AccountStatus, AdminRole, AdminUser, AdminUserDraft};
use domain::validation::password_error;
use domain::{FieldErrors, Layout, Validate};

use crate::auth::use_auth;
use crate::components::{
    use_error_toast, use_toast, Button, ButtonVariant, Field, Input, Select, ToastOptions,
};
use crate::icons::FaPlus;
use crate::views::{EmptyState, LoadingScreen, ModalOverlay, PageHeader};
use crate::Icon;

#[component]
pub fn AdminUsersView(layout: Layout) -> Element {
    let auth = use_auth();
    let mut admins = use_resource(|| async move { api::list_admin_users().await });
    use_error_toast(admins);
    let toast = use_toast();
    let mut creating = use_signal(|| false);

    let toggle_status = move |admin: AdminUser| async move {
        let next = admin.status.toggled();
        match api::update_admin_user_status(admin.id, next).await {
            Ok(updated) => {
                toast.success(format!("{} is now {}", updated.email, next.as_str()), ToastOptions::new());
                admins.restart();
            }
            Err(e) => toast.error(e.to_string(), ToastOptions::new()),
        }
    };

    let me = auth().user_id().map(str::to_string);

    rsx! {
        div {
            class: if layout.is_mobile() { "view-page view-page--mobile" } else { "view-page" },
            PageHeader {
                title: "Admin users",
                on_refresh: move |_| admins.restart(),
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| creating.set(true),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " New admin"
                }
            }

            match &*admins.read() {
                None => rsx! { LoadingScreen {} },
                Some(Err(e)) => rsx! { crate::views::LoadError { message: e.to_string() } },
                Some(Ok(rows)) if rows.is_empty() => rsx! { EmptyState { message: "No admin users." } },
                Some(Ok(rows)) => rsx! {
                    table {
                        class: if layout.is_mobile() { "data-table data-table--compact" } else { "data-table" },
                        thead {
                            tr {
                                th { "Name" }
                                if !layout.is_mobile() {
                                    th { "Email" }
                                }
                                th { "Role" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            for admin in rows.iter().cloned() {
                                tr {
                                    key: "{admin.id}",
                                    td { "{admin.full_name.clone().unwrap_or_else(|| admin.email.clone())}" }
                                    if !layout.is_mobile() {
                                        td { "{admin.email}" }
                                    }
                                    td { "{admin.role.label()}" }
                                    td {
                                        if me.as_deref() == Some(admin.id.to_string().as_str()) {
                                            span { class: "badge badge--success", title: "You", "{admin.status.as_str()}" }
                                        } else {
                                            button {
                                                r#type: "button",
                                                class: if admin.status == AccountStatus::Active { "badge badge--success" } else { "badge badge--danger" },
                                                title: "Toggle status",
                                                onclick: {
                                                    let admin = admin.clone();
                                                    move |_| toggle_status(admin.clone())
                                                },
                                                "{admin.status.as_str()}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }

        if creating() {
            ModalOverlay {
                on_close: move |_| creating.set(false),
                AdminUserForm {
                    on_saved: move |saved: AdminUser| {
                        creating.set(false);
                        toast.success(format!("Added {}", saved.email), ToastOptions::new());
                        admins.restart();
                    },
                    on_cancel: move |_| creating.set(false),
                }
            }
        }
    }
}

#[component]
fn AdminUserForm(on_saved: EventHandler<AdminUser>, on_cancel: EventHandler<()>) -> Element {
    let mut draft = use_signal(AdminUserDraft::default);
    let mut password = use_signal(String::new);
    let mut errors = use_signal(FieldErrors::new);
    let mut server_error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| async move {
        evt.prevent_default();
        let next = draft();
        let mut problems = next.validate();
        if let Some(msg) = password_error(&password()) {
            problems.add("password", msg);
        }
        if !problems.is_empty() {
            errors.set(problems);
            return;
        }
        errors.set(FieldErrors::new());

        saving.set(true);
        match api::create_admin_user(next, password()).await {
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
            h2 { class: "modal-title", "New admin" }

            Field { id: "admin-name", label: "Name", error: err("full_name"),
                Input {
                    id: "admin-name",
                    value: draft().full_name,
                    oninput: move |evt: FormEvent| draft.write().full_name = evt.value(),
                }
            }
            Field { id: "admin-email", label: "Email", error: err("email"),
                Input {
                    id: "admin-email",
                    r#type: "email",
                    value: draft().email,
                    oninput: move |evt: FormEvent| draft.write().email = evt.value(),
                }
            }
            Field { id: "admin-role", label: "Role",
                Select {
                    id: "admin-role",
                    onchange: move |evt: FormEvent| {
                        if let Ok(role) = AdminRole::try_from(evt.value()) {
                            draft.write().role = role;
                        }
                    },
                    for role in AdminRole::ALL {
                        option {
                            value: role.as_str(),
                            selected: draft().role == role,
                            "{role.label()}"
                        }
                    }
                }
            }
            Field { id: "admin-password", label: "Initial password", error: err("password"),
                Input {
                    id: "admin-password",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
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
                    if saving() { "Saving..." } else { "Create" }
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
