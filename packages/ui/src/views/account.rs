use dioxus::prelude::*;

use domain::validation::password_error;
use domain::{AuthEvent, Layout, Locale, Role};

use crate::auth::{use_auth, use_auth_events};
use crate::components::{use_toast, Button, ButtonVariant, Field, Input, Select, ToastOptions};
use crate::locale::use_locale;

/// Account page shared by both portals: profile summary, language and password.
#[component]
pub fn AccountView(layout: Layout) -> Element {
    let auth = use_auth();
    let user = auth().user;

    let profile = use_resource(move || async move {
        let user = auth().user?;
        if user.role != Role::Distributor {
            return None;
        }
        api::get_profile(user.id).await.ok().flatten()
    });

    rsx! {
        div {
            class: if layout.is_mobile() { "view-page view-page--mobile" } else { "view-page max-w-3xl" },
            h1 { class: "view-title", "Account" }

            if let Some(user) = user {
                section {
                    class: "card",
                    h2 { class: "view-section-title", "Profile" }
                    dl {
                        class: "details",
                        dt { "Email" }
                        dd { "{user.email}" }
                        dt { "Role" }
                        dd { "{user.role}" }
                        if let Some(Some(profile)) = &*profile.read() {
                            dt { "Name" }
                            dd { "{profile.display_name()}" }
                            if let Some(company) = &profile.company_name {
                                dt { "Company" }
                                dd { "{company}" }
                            }
                            if let Some(territory) = &profile.territory {
                                dt { "Territory" }
                                dd { "{territory}" }
                            }
                            if let Some(phone) = &profile.phone {
                                dt { "Phone" }
                                dd { "{phone}" }
                            }
                        }
                    }
                }
            }

            LanguageSection {}
            PasswordSection {}
        }
    }
}

#[component]
fn LanguageSection() -> Element {
    let mut locale = use_locale();
    let toast = use_toast();

    let onchange = move |evt: FormEvent| async move {
        let Some(next) = Locale::from_code(&evt.value()) else {
            return;
        };
        match api::set_language_preference(next.code().to_string()).await {
            Ok(()) => {
                locale.set(next);
                toast.success(format!("Language set to {}", next.label()), ToastOptions::new());
            }
            Err(e) => toast.error(e.to_string(), ToastOptions::new()),
        }
    };

    rsx! {
        section {
            class: "card",
            h2 { class: "view-section-title", "Language" }
            Field {
                id: "language",
                label: "Announcement language",
                hint: "Announcements without a translation are shown in English.",
                Select {
                    id: "language",
                    value: locale().code(),
                    onchange: onchange,
                    for choice in Locale::ALL {
                        option {
                            value: choice.code(),
                            selected: choice == locale(),
                            "{choice.label()}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PasswordSection() -> Element {
    let events = use_auth_events();
    let toast = use_toast();
    let mut current = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| async move {
        evt.prevent_default();
        if let Some(msg) = password_error(&new_password()) {
            error.set(Some(msg.to_string()));
            return;
        }
        if new_password() != confirm() {
            error.set(Some("Passwords do not match".to_string()));
            return;
        }
        error.set(None);

        saving.set(true);
        match api::update_password(current(), new_password()).await {
            Ok(()) => {
                current.set(String::new());
                new_password.set(String::new());
                confirm.set(String::new());
                toast.success("Password updated".to_string(), ToastOptions::new());
                events.send(AuthEvent::UserUpdated);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
        saving.set(false);
    };

    rsx! {
        section {
            class: "card",
            h2 { class: "view-section-title", "Change password" }
            form {
                onsubmit: onsubmit,
                Field {
                    id: "current-password",
                    label: "Current password",
                    Input {
                        id: "current-password",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: current(),
                        oninput: move |evt: FormEvent| current.set(evt.value()),
                    }
                }
                Field {
                    id: "new-password",
                    label: "New password",
                    hint: "At least 8 characters.",
                    Input {
                        id: "new-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: new_password(),
                        oninput: move |evt: FormEvent| new_password.set(evt.value()),
                    }
                }
                Field {
                    id: "confirm-password",
                    label: "Confirm new password",
                    Input {
                        id: "confirm-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: confirm(),
                        oninput: move |evt: FormEvent| confirm.set(evt.value()),
                    }
                }
                if let Some(msg) = error() {
                    div { class: "form-error", "{msg}" }
                }
                div {
                    class: "form-actions",
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Update password" }
                    }
                }
            }
        }
    }
}
