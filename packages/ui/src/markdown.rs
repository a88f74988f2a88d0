//! Markdown rendering for announcement bodies.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

use domain::validation::is_safe_link;

/// Link and image targets other than http(s), site paths and in-page anchors
/// are blanked.
fn sanitize_target(dest: CowStr<'_>) -> CowStr<'_> {
    if is_safe_link(&dest) || dest.starts_with('#') {
        dest
    } else {
        tracing::debug!("Dropping markdown link target {dest}");
        CowStr::Borrowed("")
    }
}

/// Render markdown to HTML. Raw HTML in the source is shown as text.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let events = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: sanitize_target(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: sanitize_target(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_basic_markdown() {
        let out = render_markdown("**New** price list\n\n- Valves\n- Pumps");
        assert!(out.contains("<strong>New</strong>"));
        assert!(out.contains("<li>Valves</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let out = render_markdown("Hi <script>alert(1)</script>");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_link_targets_are_dropped() {
        let out = render_markdown("[price list](javascript:alert(1)) ![x](data:text/html,hi)");
        assert!(!out.contains("javascript:"));
        assert!(!out.contains("data:"));
        assert!(out.contains("price list"));
    }

    #[test]
    fn test_web_and_site_links_are_kept() {
        let out = render_markdown("[a](https://example.com/a) [b](/portal/products) [c](#top) [d](//evil.example)");
        assert!(out.contains(r#"href="https://example.com/a""#));
        assert!(out.contains(r#"href="/portal/products""#));
        assert!(out.contains(r##"href="#top""##));
        assert!(!out.contains("evil.example"));
    }
}
