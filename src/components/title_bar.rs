use dioxus::prelude::*;
use crate::constants::*;
use crate::state::Gender;

#[component]
pub fn TitleBar(
    gender: Gender,
    sidebar_open: bool,
    on_toggle_gender: EventHandler<MouseEvent>,
    on_toggle_sidebar: EventHandler<MouseEvent>,
    on_open_help: EventHandler<MouseEvent>,
) -> Element {
    let sidebar_toggle_bg = if sidebar_open { BG_HOVER } else { BG_BASE };
    rsx! {
        div {
            style: "
                display: flex; align-items: center; justify-content: space-between;
                height: {TITLE_BAR_HEIGHT}px; padding: 0 16px;
                background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                user-select: none; flex-shrink: 0;
            ",
            div {
                style: "display: flex; align-items: center; gap: 20px;",
                span { style: "font-size: 13px; font-weight: 600; color: {TEXT_SECONDARY};", "BodyLog" }
                button {
                    class: "collapse-btn",
                    style: "
                        background: transparent; border: none; color: {TEXT_PRIMARY};
                        font-size: 12px; cursor: pointer; padding: 4px 8px; border-radius: 4px;
                    ",
                    onclick: move |e| on_open_help.call(e),
                    "Help"
                }
            }
            div {
                style: "display: flex; align-items: center; justify-content: flex-end; gap: 12px; min-width: 220px;",
                div {
                    style: "display: flex; align-items: center; gap: 6px;",
                    span {
                        style: "font-size: 10px; color: {TEXT_DIM}; text-transform: uppercase; letter-spacing: 0.6px;",
                        "Body"
                    }
                    button {
                        class: "collapse-btn",
                        style: "
                            background: {BG_BASE};
                            border: 1px solid {BORDER_DEFAULT};
                            color: {TEXT_PRIMARY}; font-size: 11px; cursor: pointer;
                            padding: 4px 10px; border-radius: 999px;
                        ",
                        title: "Switch to {gender.other().label()}",
                        onclick: move |e| on_toggle_gender.call(e),
                        "{gender.label()}"
                    }
                }
                div {
                    style: "display: flex; align-items: center; gap: 6px;",
                    span {
                        style: "font-size: 10px; color: {TEXT_DIM}; text-transform: uppercase; letter-spacing: 0.6px;",
                        "Sidebar"
                    }
                    button {
                        class: "collapse-btn",
                        style: "
                            background: {sidebar_toggle_bg};
                            border: 1px solid {BORDER_DEFAULT};
                            color: {TEXT_PRIMARY}; font-size: 11px; cursor: pointer;
                            padding: 4px 10px; border-radius: 999px;
                        ",
                        onclick: move |e| on_toggle_sidebar.call(e),
                        if sidebar_open { "On" } else { "Off" }
                    }
                }
            }
        }
    }
}
