use dioxus::prelude::*;

use super::Label;

/// A labelled form control with its inline validation message.
#[component]
pub fn Field(
    id: String,
    label: String,
    #[props(default)] error: Option<String>,
    #[props(default)] hint: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "field",
            Label { html_for: id, "{label}" }
            {children}
            if let Some(error) = error {
                p { class: "field-error", "{error}" }
            } else if let Some(hint) = hint {
                p { class: "view-muted", "{hint}" }
            }
        }
    }
}
