use dioxus::prelude::*;
use uuid::Uuid;

use domain::models::{Announcement, AnnouncementCategory, AnnouncementDraft};
use domain::{FieldErrors, Layout, Locale, Validate};

use crate::components::{
    use_error_toast, use_toast, Button, ButtonVariant, Field, Input, Select, Textarea, ToastOptions,
};
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::markdown::render_markdown;
use crate::views::portal::category_badge;
use crate::views::{ConfirmDialog, EmptyState, LoadingScreen, ModalOverlay, PageHeader};
use crate::Icon;

#[component]
pub fn AnnouncementAdminView(layout: Layout) -> Element {
    let mut rows = use_resource(|| async move { api::list_announcements().await });
    use_error_toast(rows);
    let toast = use_toast();

    let mut editing = use_signal(|| Option::<Option<Announcement>>::None);
    let mut deleting = use_signal(|| Option::<Announcement>::None);

    let confirm_delete = move |_| async move {
        let Some(row) = deleting() else {
            return;
        };
        deleting.set(None);
        match api::delete_announcement(row.id).await {
            Ok(()) => {
                toast.success("Announcement deleted".to_string(), ToastOptions::new());
                rows.restart();
            }
            Err(e) => toast.error(e.to_string(), ToastOptions::new()),
        }
    };

    rsx! {
        div {
            class: if layout.is_mobile() { "view-page view-page--mobile" } else { "view-page" },
            PageHeader {
                title: "Announcements",
                on_refresh: move |_| rows.restart(),
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| editing.set(Some(None)),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " New announcement"
                }
            }

            match &*rows.read() {
                None => rsx! { LoadingScreen {} },
                Some(Err(e)) => rsx! { crate::views::LoadError { message: e.to_string() } },
                Some(Ok(list)) if list.is_empty() => rsx! { EmptyState { message: "No announcements yet." } },
                Some(Ok(list)) => rsx! {
                    div {
                        class: "announcement-list",
                        for row in list.iter().cloned() {
                            div {
                                key: "{row.id}",
                                class: "card announcement",
                                div {
                                    class: "announcement-meta",
                                    span { class: category_badge(row.category), "{row.category.as_str()}" }
                                    if !row.published {
                                        span { class: "badge", "Draft" }
                                    }
                                    span { class: "view-muted", "{row.created_at.format(\"%b %e, %Y\")}" }
                                    span {
                                        class: "row-actions",
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Edit",
                                            onclick: {
                                                let row = row.clone();
                                                move |_| editing.set(Some(Some(row.clone())))
                                            },
                                            Icon { icon: FaPen, width: 12, height: 12 }
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            title: "Delete",
                                            onclick: {
                                                let row = row.clone();
                                                move |_| deleting.set(Some(row.clone()))
                                            },
                                            Icon { icon: FaTrash, width: 12, height: 12 }
                                        }
                                    }
                                }
                                h3 { class: "announcement-title", "{row.title.get(Locale::En)}" }
                                p {
                                    class: "view-muted",
                                    "Translations: "
                                    {Locale::ALL.iter().filter(|l| row.title.exact(**l).is_some()).map(|l| l.code()).collect::<Vec<_>>().join(", ")}
                                }
                            }
                        }
                    }
                },
            }
        }

        if let Some(target) = editing() {
            ModalOverlay {
                wide: true,
                on_close: move |_| editing.set(None),
                AnnouncementForm {
                    id: target.as_ref().map(|a| a.id),
                    initial: target.as_ref().map(AnnouncementDraft::from).unwrap_or_default(),
                    on_saved: move |_| {
                        editing.set(None);
                        toast.success("Announcement saved".to_string(), ToastOptions::new());
                        rows.restart();
                    },
                    on_cancel: move |_| editing.set(None),
                }
            }
        }

        if deleting().is_some() {
            ConfirmDialog {
                title: "Delete announcement",
                message: "This removes the announcement in every language.",
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

/// Editor with one title/body pair per locale. English is required.
#[component]
fn AnnouncementForm(
    id: Option<Uuid>,
    initial: AnnouncementDraft,
    on_saved: EventHandler<Announcement>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut draft = use_signal(|| initial.clone());
    let mut editing_locale = use_signal(|| Locale::En);
    let mut preview = use_signal(|| false);
    let mut errors = use_signal(FieldErrors::new);
    let mut server_error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| async move {
        evt.prevent_default();
        let next = draft();
        let problems = next.validate();
        if !problems.is_empty() {
            errors.set(problems);
            editing_locale.set(Locale::En);
            return;
        }
        errors.set(FieldErrors::new());

        saving.set(true);
        match api::save_announcement(id, next).await {
            Ok(saved) => on_saved.call(saved),
            Err(e) => server_error.set(Some(e.to_string())),
        }
        saving.set(false);
    };

    let err = move |field: &str| errors.read().get(field).map(str::to_string);
    let locale = editing_locale();
    let title = draft().title.exact(locale).unwrap_or_default().to_string();
    let content = draft().content.exact(locale).unwrap_or_default().to_string();

    rsx! {
        form {
            class: "modal-body",
            onsubmit: onsubmit,
            h2 { class: "modal-title", if id.is_some() { "Edit announcement" } else { "New announcement" } }

            div {
                class: "tabs",
                for choice in Locale::ALL {
                    button {
                        r#type: "button",
                        class: if choice == locale { "tab tab--active" } else { "tab" },
                        onclick: move |_| editing_locale.set(choice),
                        "{choice.label()}"
                        if draft().title.exact(choice).is_some() {
                            " ✓"
                        }
                    }
                }
            }

            Field { id: "announcement-title", label: "Title ({locale.label()})", error: err("title"),
                Input {
                    id: "announcement-title",
                    value: title,
                    oninput: move |evt: FormEvent| draft.write().title.set(locale, evt.value()),
                }
            }
            Field {
                id: "announcement-content",
                label: "Content ({locale.label()}, markdown)",
                error: err("content"),
                if preview() {
                    div { class: "markdown preview", dangerous_inner_html: render_markdown(&content) }
                } else {
                    Textarea {
                        id: "announcement-content",
                        rows: "8",
                        value: content.clone(),
                        oninput: move |evt: FormEvent| draft.write().content.set(locale, evt.value()),
                    }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    r#type: "button",
                    onclick: move |_| preview.toggle(),
                    if preview() { "Edit" } else { "Preview" }
                }
            }

            div {
                class: "form-grid",
                Field { id: "announcement-category", label: "Category",
                    Select {
                        id: "announcement-category",
                        onchange: move |evt: FormEvent| {
                            if let Ok(category) = AnnouncementCategory::try_from(evt.value()) {
                                draft.write().category = category;
                            }
                        },
                        for category in AnnouncementCategory::ALL {
                            option {
                                value: category.as_str(),
                                selected: draft().category == category,
                                "{category.as_str()}"
                            }
                        }
                    }
                }
                Field { id: "announcement-link", label: "Link", error: err("link"),
                    Input {
                        id: "announcement-link",
                        placeholder: "https://",
                        value: draft().link,
                        oninput: move |evt: FormEvent| draft.write().link = evt.value(),
                    }
                }
            }

            label {
                class: "checkbox",
                input {
                    r#type: "checkbox",
                    checked: draft().published,
                    onchange: move |evt: FormEvent| draft.write().published = evt.checked(),
                }
                " Published"
            }

            if let Some(msg) = server_error() {
                div { class: "form-error", "{msg}" }
            }

            div {
                class: "form-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Save" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}
