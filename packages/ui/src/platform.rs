//! Platform and layout context.
//!
//! Each binary wraps its app in [`LayoutProvider`] with its [`Platform`]. In a
//! browser or webview the layout follows `window.innerWidth`; a native mobile
//! shell never listens and stays on the mobile layout.

use dioxus::prelude::*;

use domain::{select_layout, Layout, LayoutTracker, Platform};

const WATCH_WIDTH_JS: &str = r#"
    dioxus.send(window.innerWidth);
    window.addEventListener('resize', () => dioxus.send(window.innerWidth));
    await new Promise(() => {});
"#;

pub fn use_platform() -> Platform {
    use_context::<Platform>()
}

/// The layout views should render right now.
pub fn use_layout() -> Layout {
    use_context::<Signal<Layout>>()()
}

#[component]
pub fn LayoutProvider(platform: Platform, children: Element) -> Element {
    use_context_provider(|| platform);
    let mut layout = use_context_provider(|| Signal::new(select_layout(platform, None)));

    use_effect(move || {
        if platform == Platform::Mobile {
            return;
        }
        spawn(async move {
            let mut tracker = LayoutTracker::new(platform, None);
            let mut eval = document::eval(WATCH_WIDTH_JS);
            while let Ok(width) = eval.recv::<f64>().await {
                if let Some(next) = tracker.observe_width(width) {
                    tracing::debug!("Layout switched to {next:?} at {width}px");
                    layout.set(next);
                }
            }
        });
    });

    rsx! {
        {children}
    }
}
