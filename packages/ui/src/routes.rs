//! # Routing
//!
//! | Path | Access | Screen |
//! |------|--------|--------|
//! | `/` | landing | redirect to login or the user's home |
//! | `/login` | guests | [`LoginView`] |
//! | `/portal/...` | distributors | catalog, product detail, libraries, account |
//! | `/admin/...` | admins | dashboard and management screens, account |
//! | anything else | | redirect to `/` |
//!
//! The two portals sit behind a shell that runs the route guard once for the
//! whole subtree and renders the navigation for the current layout.

use dioxus::prelude::*;

use domain::models::AssetKind;
use domain::{guard, Destination, GuardOutcome, Role, RouteAccess};

use crate::auth::use_auth;
use crate::navbar::Navbar;
use crate::platform::use_layout;
use crate::views::admin::{
    AdminUsersView, AnnouncementAdminView, AssetAdminView, DashboardView, DistributorAdminView,
    ProductAdminView,
};
use crate::views::portal::{LibraryView, PortalHomeView, ProductCatalogView, ProductDetailView};
use crate::views::{AccountView, LoadingScreen, LoginView};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},

    #[nest("/portal")]
        #[layout(PortalShell)]
            #[route("/")]
            PortalHome {},
            #[route("/products")]
            PortalProducts {},
            #[route("/products/:id")]
            PortalProductDetail { id: String },
            #[route("/documentation")]
            PortalDocumentation {},
            #[route("/training")]
            PortalTraining {},
            #[route("/marketing")]
            PortalMarketing {},
            #[route("/account")]
            PortalAccount {},
        #[end_layout]
    #[end_nest]

    #[nest("/admin")]
        #[layout(AdminShell)]
            #[route("/")]
            AdminDashboard {},
            #[route("/products")]
            AdminProducts {},
            #[route("/documentation")]
            AdminDocumentation {},
            #[route("/training")]
            AdminTraining {},
            #[route("/marketing")]
            AdminMarketing {},
            #[route("/announcements")]
            AdminAnnouncements {},
            #[route("/distributors")]
            AdminDistributors {},
            #[route("/users")]
            AdminUsers {},
            #[route("/account")]
            AdminAccount {},
        #[end_layout]
    #[end_nest]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl From<Destination> for Route {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Login => Route::Login {},
            Destination::Home(Role::Admin) => Route::AdminDashboard {},
            Destination::Home(Role::Distributor) => Route::PortalHome {},
        }
    }
}

/// Runs the guard for `access`, redirecting whenever the auth state moves the
/// outcome to a redirect.
#[component]
fn Guarded(access: RouteAccess, children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if let GuardOutcome::Redirect(destination) = guard(access, &auth()) {
            tracing::debug!("Guard redirect to {}", destination.path());
            nav.replace(Route::from(destination));
        }
    });

    match guard(access, &auth()) {
        GuardOutcome::Render => children,
        GuardOutcome::Loading | GuardOutcome::Redirect(_) => rsx! { LoadingScreen {} },
    }
}

#[component]
fn Root() -> Element {
    rsx! {
        Guarded { access: RouteAccess::Landing }
    }
}

#[component]
fn Login() -> Element {
    rsx! {
        Guarded { access: RouteAccess::GuestOnly, LoginView {} }
    }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    use_effect(move || {
        tracing::debug!("Unknown route /{}", segments.join("/"));
        nav.replace(Route::Root {});
    });
    rsx! {}
}

#[component]
fn AppShell(role: Role) -> Element {
    let layout = use_layout();

    rsx! {
        Guarded {
            access: RouteAccess::Requires(role),
            div {
                class: if layout.is_mobile() { "app-shell app-shell--mobile" } else { "app-shell" },
                Navbar { role, layout }
                main {
                    class: "app-content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn PortalShell() -> Element {
    rsx! { AppShell { role: Role::Distributor } }
}

#[component]
fn AdminShell() -> Element {
    rsx! { AppShell { role: Role::Admin } }
}

#[component]
fn PortalHome() -> Element {
    rsx! { PortalHomeView { layout: use_layout() } }
}

#[component]
fn PortalProducts() -> Element {
    rsx! { ProductCatalogView { layout: use_layout() } }
}

#[component]
fn PortalProductDetail(id: String) -> Element {
    rsx! { ProductDetailView { id, layout: use_layout() } }
}

#[component]
fn PortalDocumentation() -> Element {
    rsx! { LibraryView { kind: AssetKind::Documentation, layout: use_layout() } }
}

#[component]
fn PortalTraining() -> Element {
    rsx! { LibraryView { kind: AssetKind::Training, layout: use_layout() } }
}

#[component]
fn PortalMarketing() -> Element {
    rsx! { LibraryView { kind: AssetKind::Marketing, layout: use_layout() } }
}

#[component]
fn PortalAccount() -> Element {
    rsx! { AccountView { layout: use_layout() } }
}

#[component]
fn AdminDashboard() -> Element {
    rsx! { DashboardView { layout: use_layout() } }
}

#[component]
fn AdminProducts() -> Element {
    rsx! { ProductAdminView { layout: use_layout() } }
}

#[component]
fn AdminDocumentation() -> Element {
    rsx! { AssetAdminView { kind: AssetKind::Documentation, layout: use_layout() } }
}

#[component]
fn AdminTraining() -> Element {
    rsx! { AssetAdminView { kind: AssetKind::Training, layout: use_layout() } }
}

#[component]
fn AdminMarketing() -> Element {
    rsx! { AssetAdminView { kind: AssetKind::Marketing, layout: use_layout() } }
}

#[component]
fn AdminAnnouncements() -> Element {
    rsx! { AnnouncementAdminView { layout: use_layout() } }
}

#[component]
fn AdminDistributors() -> Element {
    rsx! { DistributorAdminView { layout: use_layout() } }
}

#[component]
fn AdminUsers() -> Element {
    rsx! { AdminUsersView { layout: use_layout() } }
}

#[component]
fn AdminAccount() -> Element {
    rsx! { AccountView { layout: use_layout() } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destinations_match_route_paths() {
        for destination in [
            Destination::Login,
            Destination::Home(Role::Admin),
            Destination::Home(Role::Distributor),
        ] {
            let path = Route::from(destination).to_string();
            let expected = destination.path();
            assert!(
                path == expected || path == format!("{expected}/"),
                "{path} vs {expected}"
            );
        }
    }

    #[test]
    fn test_parse_nested_routes() {
        assert_eq!(
            "/portal/products/abc".parse::<Route>().ok(),
            Some(Route::PortalProductDetail { id: "abc".to_string() })
        );
        assert_eq!("/admin/users".parse::<Route>().ok(), Some(Route::AdminUsers {}));
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert!(matches!(
            "/nowhere/else".parse::<Route>(),
            Ok(Route::NotFound { .. })
        ));
    }
}
