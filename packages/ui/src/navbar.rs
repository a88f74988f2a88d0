//! Role-based navigation: a sidebar on the desktop layout, a top bar with a
//! scrolling tab strip on the mobile layout.

use dioxus::prelude::*;
use dioxus_free_icons::IconShape;

use domain::{Layout, Role};

use crate::auth::{use_auth, LogoutButton};
use crate::icons::{
    FaBook, FaBoxOpen, FaBuilding, FaBullhorn, FaGauge, FaGraduationCap, FaHouse, FaImages,
    FaRightFromBracket, FaUser, FaUserShield,
};
use crate::routes::Route;
use crate::Icon;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

#[component]
pub fn Navbar(role: Role, layout: Layout) -> Element {
    let auth = use_auth();
    let state = auth();
    let email = state.user.as_ref().map(|u| u.email.clone()).unwrap_or_default();
    let offline = !state.loading && !state.online;

    let title = match role {
        Role::Admin => "Portal Admin",
        Role::Distributor => "Distributor Portal",
    };

    rsx! {
        document::Stylesheet { href: NAVBAR_CSS }

        if layout.is_mobile() {
            header {
                class: "topbar",
                span { class: "topbar-title", "{title}" }
                if offline {
                    span { class: "badge badge--danger", "Offline" }
                }
                LogoutButton {
                    label: "",
                    class: "topbar-logout",
                    Icon { icon: FaRightFromBracket, width: 16, height: 16 }
                }
            }
            nav {
                class: "tabbar",
                NavLinks { role }
            }
        } else {
            aside {
                class: "sidebar",
                div {
                    class: "sidebar-header",
                    span { class: "sidebar-title", "{title}" }
                    span { class: "sidebar-user", "{email}" }
                    if offline {
                        span { class: "badge badge--danger", "Offline" }
                    }
                }
                nav {
                    class: "sidebar-nav",
                    NavLinks { role }
                }
                div {
                    class: "sidebar-footer",
                    LogoutButton {
                        class: "nav-link",
                        Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                    }
                }
            }
        }
    }
}

#[component]
fn NavLinks(role: Role) -> Element {
    rsx! {
        match role {
            Role::Distributor => rsx! {
                NavLink { to: Route::PortalHome {}, icon: FaHouse, label: "Home" }
                NavLink { to: Route::PortalProducts {}, icon: FaBoxOpen, label: "Products" }
                NavLink { to: Route::PortalDocumentation {}, icon: FaBook, label: "Documentation" }
                NavLink { to: Route::PortalTraining {}, icon: FaGraduationCap, label: "Training" }
                NavLink { to: Route::PortalMarketing {}, icon: FaImages, label: "Marketing" }
                NavLink { to: Route::PortalAccount {}, icon: FaUser, label: "Account" }
            },
            Role::Admin => rsx! {
                NavLink { to: Route::AdminDashboard {}, icon: FaGauge, label: "Dashboard" }
                NavLink { to: Route::AdminProducts {}, icon: FaBoxOpen, label: "Products" }
                NavLink { to: Route::AdminDocumentation {}, icon: FaBook, label: "Documentation" }
                NavLink { to: Route::AdminTraining {}, icon: FaGraduationCap, label: "Training" }
                NavLink { to: Route::AdminMarketing {}, icon: FaImages, label: "Marketing" }
                NavLink { to: Route::AdminAnnouncements {}, icon: FaBullhorn, label: "Announcements" }
                NavLink { to: Route::AdminDistributors {}, icon: FaBuilding, label: "Distributors" }
                NavLink { to: Route::AdminUsers {}, icon: FaUserShield, label: "Admin users" }
                NavLink { to: Route::AdminAccount {}, icon: FaUser, label: "Account" }
            },
        }
    }
}

#[component]
fn NavLink<I: IconShape + Clone + PartialEq + 'static>(to: Route, icon: I, label: String) -> Element {
    let current = use_route::<Route>();
    let active = current == to;

    rsx! {
        Link {
            to: to.clone(),
            class: if active { "nav-link active" } else { "nav-link" },
            Icon { icon, width: 14, height: 14 }
            span { "{label}" }
        }
    }
}
