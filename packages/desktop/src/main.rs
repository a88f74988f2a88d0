use dioxus::prelude::*;

use domain::Platform;

/// Where the portal's server functions live. Override at build time with
/// `PORTAL_SERVER_URL`.
const SERVER_URL: &str = match option_env!("PORTAL_SERVER_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};

fn main() {
    dioxus::fullstack::set_server_url(SERVER_URL);
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        ui::PortalApp { platform: Platform::Desktop }
    }
}
