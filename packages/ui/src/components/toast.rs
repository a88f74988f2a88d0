use dioxus::prelude::*;
use dioxus_primitives::toast;

pub use dioxus_primitives::toast::{use_toast, ToastOptions};

#[component]
pub fn ToastProvider(children: Element) -> Element {
    rsx! {
        toast::ToastProvider {
            {children}
        }
    }
}

/// Toast a resource's error each time it settles with one.
pub fn use_error_toast<T: 'static>(resource: Resource<Result<T, ServerFnError>>) {
    let toast = use_toast();
    use_effect(move || {
        if let Some(Err(e)) = &*resource.read() {
            toast.error(e.to_string(), ToastOptions::new());
        }
    });
}
