use dioxus::prelude::*;
use crate::constants::*;

/// Full-size image viewer with previous/next navigation.
#[component]
pub fn LightboxModal(
    image: String,
    caption: String,
    date: String,
    index: usize,
    count: usize,
    on_previous: EventHandler<MouseEvent>,
    on_next: EventHandler<MouseEvent>,
    on_close: EventHandler<MouseEvent>,
) -> Element {
    let position = index + 1;
    let can_step = count > 1;
    let nav_style = format!(
        "width: 40px; height: 40px; border-radius: 50%; border: 1px solid {BORDER_STRONG}; \
         background: rgba(0,0,0,0.6); color: {TEXT_PRIMARY}; font-size: 16px; cursor: pointer; flex-shrink: 0;"
    );
    rsx! {
        div {
            style: "
                position: fixed; top: 0; left: 0; right: 0; bottom: 0;
                background-color: rgba(0, 0, 0, 0.85);
                display: flex; align-items: center; justify-content: center; gap: 16px;
                z-index: 2100;
            ",
            onclick: move |e| on_close.call(e),
            if can_step {
                button {
                    style: "{nav_style}",
                    onclick: move |e| {
                        e.stop_propagation();
                        on_previous.call(e);
                    },
                    "‹"
                }
            }
            div {
                style: "display: flex; flex-direction: column; align-items: center; gap: 10px; max-width: 80vw;",
                onclick: move |e| e.stop_propagation(),
                img {
                    src: "{image}",
                    style: "max-width: 80vw; max-height: 75vh; object-fit: contain; border-radius: 6px;",
                }
                div {
                    style: "font-size: 13px; color: {TEXT_PRIMARY}; text-align: center; white-space: pre-wrap;",
                    "{caption}"
                }
                div {
                    style: "font-size: 11px; color: {TEXT_MUTED};",
                    "{date} · Entry {position} / {count}"
                }
            }
            if can_step {
                button {
                    style: "{nav_style}",
                    onclick: move |e| {
                        e.stop_propagation();
                        on_next.call(e);
                    },
                    "›"
                }
            }
            button {
                style: "position: absolute; top: 16px; right: 16px; background: transparent; border: none; color: {TEXT_PRIMARY}; font-size: 22px; cursor: pointer;",
                onclick: move |e| on_close.call(e),
                "×"
            }
        }
    }
}
