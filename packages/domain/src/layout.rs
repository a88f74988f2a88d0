//! Desktop/mobile layout selection.

/// Viewports narrower than this (in CSS pixels) get the mobile layout.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Where the app is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Platform {
    #[default]
    Web,
    Desktop,
    /// Native mobile shell.
    Mobile,
}

/// Which presentation of a screen to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    #[default]
    Desktop,
    Mobile,
}

impl Layout {
    pub fn is_mobile(self) -> bool {
        self == Layout::Mobile
    }
}

/// Pick a layout. A native mobile shell is always mobile; anything rendering in
/// a browser or webview goes by viewport width, desktop when it is unknown.
pub fn select_layout(platform: Platform, viewport_width: Option<f64>) -> Layout {
    match (platform, viewport_width) {
        (Platform::Mobile, _) => Layout::Mobile,
        (_, Some(width)) if width < MOBILE_BREAKPOINT => Layout::Mobile,
        _ => Layout::Desktop,
    }
}

/// Follows resize events and reports only actual layout changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTracker {
    platform: Platform,
    current: Layout,
}

impl LayoutTracker {
    pub fn new(platform: Platform, viewport_width: Option<f64>) -> Self {
        Self {
            platform,
            current: select_layout(platform, viewport_width),
        }
    }

    pub fn current(&self) -> Layout {
        self.current
    }

    /// Feed a new viewport width; returns the new layout if it changed.
    pub fn observe_width(&mut self, width: f64) -> Option<Layout> {
        let next = select_layout(self.platform, Some(width));
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_mobile_is_always_mobile() {
        assert_eq!(select_layout(Platform::Mobile, None), Layout::Mobile);
        assert_eq!(select_layout(Platform::Mobile, Some(1920.0)), Layout::Mobile);
    }

    #[test]
    fn test_browser_uses_breakpoint() {
        assert_eq!(select_layout(Platform::Web, Some(767.0)), Layout::Mobile);
        assert_eq!(select_layout(Platform::Web, Some(768.0)), Layout::Desktop);
        assert_eq!(select_layout(Platform::Web, None), Layout::Desktop);
        assert_eq!(select_layout(Platform::Desktop, Some(500.0)), Layout::Mobile);
    }

    #[test]
    fn test_tracker_reports_only_crossings() {
        let mut tracker = LayoutTracker::new(Platform::Web, Some(1024.0));
        assert_eq!(tracker.current(), Layout::Desktop);

        assert_eq!(tracker.observe_width(900.0), None);
        assert_eq!(tracker.observe_width(700.0), Some(Layout::Mobile));
        assert_eq!(tracker.observe_width(320.0), None);
        assert_eq!(tracker.observe_width(800.0), Some(Layout::Desktop));
        assert_eq!(tracker.current(), Layout::Desktop);
    }

    #[test]
    fn test_tracker_on_native_mobile_ignores_resizes() {
        let mut tracker = LayoutTracker::new(Platform::Mobile, None);
        assert_eq!(tracker.observe_width(2000.0), None);
        assert_eq!(tracker.current(), Layout::Mobile);
    }

    #[test]
    fn test_product_filter_takes_no_layout_input() {
        use crate::models::{filter_products, ProductQuery};

        // Filtering only sees rows and the query, so a breakpoint crossing
        // between two renders yields the same list.
        let rows = crate::models::product::tests::sample_products();
        let query = ProductQuery::default();
        let mut tracker = LayoutTracker::new(Platform::Web, Some(1200.0));

        let desktop = filter_products(&rows, &query);
        assert_eq!(tracker.observe_width(600.0), Some(Layout::Mobile));
        assert_eq!(filter_products(&rows, &query), desktop);
    }
}
