//! Email/password sign-in.

use dioxus::prelude::*;

use domain::validation::email_error;
use domain::AuthEvent;

use crate::auth::use_auth_events;
use crate::components::{Button, ButtonVariant, Field, Input};

#[component]
pub fn LoginView() -> Element {
    let events = use_auth_events();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut email_hint = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| async move {
        evt.prevent_default();
        error.set(None);

        if let Some(msg) = email_error(&email()) {
            email_hint.set(Some(msg.to_string()));
            return;
        }
        email_hint.set(None);
        if password().is_empty() {
            error.set(Some("Enter your password".to_string()));
            return;
        }

        submitting.set(true);
        match api::sign_in(email(), password()).await {
            Ok(user) => {
                tracing::info!("Signed in as {}", user.email);
                password.set(String::new());
                // The route guard redirects once the role resolves
                events.send(AuthEvent::SignedIn);
            }
            Err(e) => {
                error.set(Some(e.to_string()));
            }
        }
        submitting.set(false);
    };

    rsx! {
        div {
            class: "login-container",
            div {
                class: "login-card",
                h1 { class: "login-title", "Distributor Portal" }
                p { class: "view-muted", "Sign in with the account your representative set up for you." }

                form {
                    onsubmit: onsubmit,
                    Field {
                        id: "login-email",
                        label: "Email",
                        error: email_hint(),
                        Input {
                            id: "login-email",
                            r#type: "email",
                            autocomplete: "username",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    Field {
                        id: "login-password",
                        label: "Password",
                        Input {
                            id: "login-password",
                            r#type: "password",
                            autocomplete: "current-password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }

                    if let Some(msg) = error() {
                        div { class: "form-error", "{msg}" }
                    }

                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Signing in..." } else { "Sign in" }
                    }
                }
            }
        }
    }
}
