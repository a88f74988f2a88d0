//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] owns the [`AuthState`] signal. Auth events are fed to a
//! coroutine that resolves each one concurrently through an
//! [`AuthController`]; the controller's tickets drop any result overtaken by a
//! newer event. A 30 second keep-alive re-checks the session without touching
//! the resolved role.

use dioxus::prelude::*;
use futures::StreamExt;

use domain::models::{AdminUser, Profile};
use domain::{AuthController, AuthEvent, AuthState, DirectoryError, IdentityBackend, SessionUser};

/// Identity lookups over the `api` server functions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ServerIdentity;

fn lookup_error(e: ServerFnError) -> DirectoryError {
    DirectoryError::Query(e.to_string())
}

impl IdentityBackend for ServerIdentity {
    async fn session(&self) -> Result<Option<SessionUser>, DirectoryError> {
        api::get_session().await.map_err(lookup_error)
    }

    async fn admin_account(&self, user_id: &str) -> Result<Option<AdminUser>, DirectoryError> {
        api::get_admin_account(user_id.to_string())
            .await
            .map_err(lookup_error)
    }

    async fn profile(&self, user_id: &str) -> Result<Option<Profile>, DirectoryError> {
        api::get_profile(user_id.to_string())
            .await
            .map_err(lookup_error)
    }

    async fn language_preference(&self, user_id: &str) -> Result<Option<String>, DirectoryError> {
        api::get_language_preference(user_id.to_string())
            .await
            .map_err(lookup_error)
    }
}

/// Get the current authentication state.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Handle for raising auth events, e.g. after signing in.
pub fn use_auth_events() -> Coroutine<AuthEvent> {
    use_coroutine_handle::<AuthEvent>()
}

/// Provider component that manages authentication state.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);
    let controller = use_hook(|| AuthController::new(ServerIdentity));

    let events = {
        let controller = controller.clone();
        use_coroutine(move |mut rx: UnboundedReceiver<AuthEvent>| {
            let controller = controller.clone();
            async move {
                while let Some(event) = rx.next().await {
                    tracing::debug!("Auth event {event:?}");
                    let mut pending = auth_state.peek().clone();
                    if pending.begin_resolution(event) {
                        auth_state.set(pending);
                    }
                    let controller = controller.clone();
                    spawn(async move {
                        if let Some(state) = controller.handle(event).await {
                            auth_state.set(state);
                        }
                    });
                }
            }
        })
    };

    use_hook(move || events.send(AuthEvent::InitialSession));

    // Keep-alive (every 30s)
    use_effect(move || {
        let controller = controller.clone();
        spawn(async move {
            loop {
                #[cfg(target_arch = "wasm32")]
                gloo_timers::future::sleep(std::time::Duration::from_secs(30)).await;
                #[cfg(not(target_arch = "wasm32"))]
                tokio::time::sleep(std::time::Duration::from_secs(30)).await;

                let current = auth_state();
                if current.loading {
                    continue;
                }
                let outcome = controller.keep_alive(&current).await;

                let mut next = auth_state.peek().clone();
                let follow_up = outcome.apply(&current, &mut next);
                if next != *auth_state.peek() {
                    auth_state.set(next);
                }
                if let Some(event) = follow_up {
                    events.send(event);
                }
            }
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to sign out the current user. The route guard then sends them to `/login`.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    children: Element,
) -> Element {
    let events = use_auth_events();

    let onclick = move |_| async move {
        match api::sign_out().await {
            Ok(()) => events.send(AuthEvent::SignedOut),
            Err(e) => tracing::error!("Sign-out failed: {e}"),
        }
    };

    rsx! {
        button {
            class: "{class}",
            title: "{label}",
            onclick: onclick,
            {children}
            span { "{label}" }
        }
    }
}
