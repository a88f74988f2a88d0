//! This crate contains all shared UI for the workspace.
//!
//! Each binary only picks its [`Platform`] and mounts [`PortalApp`]; routing,
//! auth state, layout and locale all live here.

use dioxus::prelude::*;

use domain::Platform;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod auth;
pub use auth::{use_auth, use_auth_events, AuthProvider, LogoutButton, ServerIdentity};

mod platform;
pub use platform::{use_layout, use_platform, LayoutProvider};

mod locale;
pub use locale::{use_locale, LocaleProvider};

pub mod markdown;

mod navbar;
pub use navbar::Navbar;

mod routes;
pub use routes::Route;

pub mod views;

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

/// The whole application for one platform.
#[component]
pub fn PortalApp(platform: Platform) -> Element {
    rsx! {
        document::Stylesheet { href: MAIN_CSS }

        AuthProvider {
            LocaleProvider {
                LayoutProvider {
                    platform,
                    components::ToastProvider {
                        Router::<Route> {}
                    }
                }
            }
        }
    }
}
