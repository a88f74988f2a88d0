//! The reader's locale for announcement content.
//!
//! Starts as English and switches to the stored language preference once the
//! user resolves. A failed lookup leaves the current locale alone.

use dioxus::prelude::*;

use domain::{preferred_locale, Locale};

use crate::auth::{use_auth, ServerIdentity};

pub fn use_locale() -> Signal<Locale> {
    use_context::<Signal<Locale>>()
}

#[component]
pub fn LocaleProvider(children: Element) -> Element {
    let auth = use_auth();
    let mut locale = use_context_provider(|| Signal::new(Locale::En));

    let user_id = use_memo(move || auth().user_id().map(str::to_string));

    let _loader = use_resource(move || async move {
        let Some(user_id) = user_id() else {
            return;
        };
        if let Some(preferred) = preferred_locale(&ServerIdentity, &user_id).await {
            locale.set(preferred);
        }
    });

    rsx! {
        {children}
    }
}
