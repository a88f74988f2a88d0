use dioxus::prelude::*;

#[component]
pub fn Input(
    oninput: Option<EventHandler<FormEvent>>,
    onchange: Option<EventHandler<FormEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = input)]
    attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        input {
            class: "input",
            oninput: move |e| {
                if let Some(f) = &oninput {
                    f.call(e);
                }
            },
            onchange: move |e| {
                if let Some(f) = &onchange {
                    f.call(e);
                }
            },
            ..attributes,
        }
    }
}

#[component]
pub fn Textarea(
    oninput: Option<EventHandler<FormEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = textarea)]
    attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        textarea {
            class: "input textarea",
            oninput: move |e| {
                if let Some(f) = &oninput {
                    f.call(e);
                }
            },
            ..attributes,
        }
    }
}

/// A native `<select>` styled like [`Input`]. Options go in as children.
#[component]
pub fn Select(
    onchange: Option<EventHandler<FormEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = select)]
    attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        select {
            class: "input select",
            onchange: move |e| {
                if let Some(f) = &onchange {
                    f.call(e);
                }
            },
            ..attributes,
            {children}
        }
    }
}
