use dioxus::prelude::*;

use domain::models::{visible_announcements, Announcement, AnnouncementCategory};
use domain::{Layout, Locale};

use crate::components::use_error_toast;
use crate::icons::{FaBook, FaBoxOpen, FaGraduationCap, FaImages};
use crate::locale::use_locale;
use crate::markdown::render_markdown;
use crate::routes::Route;
use crate::views::{EmptyState, LoadingScreen, PageHeader};
use crate::Icon;

#[component]
pub fn PortalHomeView(layout: Layout) -> Element {
    let locale = use_locale();
    let mut announcements = use_resource(|| async move { api::list_announcements().await });
    use_error_toast(announcements);

    rsx! {
        div {
            class: if layout.is_mobile() { "view-page view-page--mobile" } else { "view-page" },
            PageHeader {
                title: "Welcome",
                subtitle: "News and resources from our team.",
                on_refresh: move |_| announcements.restart(),
            }

            div {
                class: if layout.is_mobile() { "quick-links quick-links--stacked" } else { "quick-links" },
                QuickLink { to: Route::PortalProducts {}, label: "Products",
                    Icon { icon: FaBoxOpen, width: 20, height: 20 }
                }
                QuickLink { to: Route::PortalDocumentation {}, label: "Documentation",
                    Icon { icon: FaBook, width: 20, height: 20 }
                }
                QuickLink { to: Route::PortalTraining {}, label: "Training",
                    Icon { icon: FaGraduationCap, width: 20, height: 20 }
                }
                QuickLink { to: Route::PortalMarketing {}, label: "Marketing",
                    Icon { icon: FaImages, width: 20, height: 20 }
                }
            }

            h2 { class: "view-section-title", "Announcements" }
            match &*announcements.read() {
                None => rsx! { LoadingScreen {} },
                Some(Err(_)) => rsx! { EmptyState { message: "Announcements could not be loaded." } },
                Some(Ok(rows)) => {
                    let rows = visible_announcements(rows);
                    if rows.is_empty() {
                        rsx! { EmptyState { message: "No announcements yet." } }
                    } else {
                        rsx! {
                            div {
                                class: "announcement-list",
                                for announcement in rows {
                                    AnnouncementCard {
                                        key: "{announcement.id}",
                                        announcement: announcement.clone(),
                                        locale: locale(),
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn QuickLink(to: Route, label: String, children: Element) -> Element {
    rsx! {
        Link {
            to: to,
            class: "quick-link",
            {children}
            span { "{label}" }
        }
    }
}

pub(crate) fn category_badge(category: AnnouncementCategory) -> &'static str {
    match category {
        AnnouncementCategory::Urgent => "badge badge--danger",
        AnnouncementCategory::Promotion => "badge badge--success",
        _ => "badge",
    }
}

#[component]
fn AnnouncementCard(announcement: Announcement, locale: Locale) -> Element {
    let title = announcement.title.get(locale);
    let body = render_markdown(announcement.content.get(locale));
    let date = announcement.created_at.format("%b %e, %Y").to_string();

    rsx! {
        article {
            class: "card announcement",
            div {
                class: "announcement-meta",
                span { class: category_badge(announcement.category), "{announcement.category.as_str()}" }
                span { class: "view-muted", "{date}" }
            }
            h3 { class: "announcement-title", "{title}" }
            div { class: "markdown", dangerous_inner_html: body }
            if let Some(link) = &announcement.link {
                a { class: "announcement-link", href: "{link}", target: "_blank", "Learn more" }
            }
        }
    }
}
