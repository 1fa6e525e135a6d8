use dioxus::prelude::*;
use crate::constants::*;

/// Right-hand panel that collapses to a thin rail.
#[component]
pub fn SidePanel(
    title: String,
    collapsed: bool,
    on_toggle: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    let icon = if collapsed { "◀" } else { "▶" };
    let width = if collapsed { SIDEBAR_COLLAPSED_WIDTH } else { SIDEBAR_WIDTH };
    let rail_cursor = if collapsed { "pointer" } else { "default" };
    let panel_class = if collapsed { "collapsed-rail" } else { "" };

    rsx! {
        div {
            class: "{panel_class}",
            style: "
                display: flex; flex-direction: column;
                width: {width}px; min-width: {width}px;
                background-color: {BG_ELEVATED}; border-left: 1px solid {BORDER_DEFAULT};
                transition: width 0.2s ease, min-width 0.2s ease;
                overflow: hidden;
                cursor: {rail_cursor};
            ",
            onclick: move |e| {
                if collapsed {
                    on_toggle.call(e);
                }
            },

            div {
                style: "
                    display: flex; align-items: center;
                    height: 32px; padding: 0 8px;
                    background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                    flex-shrink: 0;
                ",
                button {
                    class: "collapse-btn",
                    style: "
                        width: 24px; height: 24px; border: none; border-radius: 4px;
                        background: transparent; color: {TEXT_MUTED}; font-size: 10px;
                        cursor: pointer; display: flex; align-items: center; justify-content: center;
                        margin-right: 8px;
                    ",
                    onclick: move |e| {
                        e.stop_propagation();
                        on_toggle.call(e);
                    },
                    "{icon}"
                }
                if !collapsed {
                    span {
                        style: "font-size: 11px; font-weight: 500; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px; flex: 1; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                        "{title}"
                    }
                }
            }

            if !collapsed {
                div {
                    style: "flex: 1; overflow-y: auto;",
                    {children}
                }
            }
        }
    }
}
