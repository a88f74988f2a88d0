use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::icons::FaRotateRight;
use crate::Icon;

/// Page title row with a manual refresh button and optional actions.
#[component]
pub fn PageHeader(
    title: String,
    #[props(default)] subtitle: Option<String>,
    on_refresh: EventHandler<()>,
    #[props(default)] children: Element,
) -> Element {
    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "view-title", "{title}" }
                if let Some(subtitle) = subtitle {
                    p { class: "view-muted", "{subtitle}" }
                }
            }
            div {
                class: "page-actions",
                {children}
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Refresh",
                    onclick: move |_| on_refresh.call(()),
                    Icon { icon: FaRotateRight, width: 14, height: 14 }
                }
            }
        }
    }
}

#[component]
pub fn LoadingScreen() -> Element {
    rsx! {
        div {
            class: "loading-screen",
            div { class: "spinner" }
        }
    }
}

#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        div { class: "empty-state", "{message}" }
    }
}

/// Inline error shown in place of a list that failed to load.
#[component]
pub fn LoadError(message: String) -> Element {
    rsx! {
        div { class: "form-error", "{message}" }
    }
}
