use dioxus::prelude::*;
use crate::constants::*;

const CONTROLS: &[(&str, &str)] = &[
    ("Drag", "Rotate the body"),
    ("Scroll", "Zoom in and out"),
    ("Double-click body", "Place a new marker"),
    ("Click marker", "Select or deselect it"),
    ("Click empty space", "Clear the selection"),
];

const SHORTCUTS: &[(&str, &str)] = &[
    ("A / N", "Add an entry to the selected marker"),
    ("Delete", "Delete the selected marker"),
    ("← / →", "Browse images in the viewer"),
    ("B", "Toggle the sidebar"),
    ("G", "Switch body model"),
    ("? / H", "Show this help"),
    ("Esc", "Close the open dialog"),
];

#[component]
pub fn HelpModal(on_close: EventHandler<MouseEvent>) -> Element {
    rsx! {
        super::ModalShell {
            width: 460,
            on_dismiss: move |e| on_close.call(e),
            h3 { style: "margin: 0 0 16px 0; font-size: 16px; color: {TEXT_PRIMARY};", "How to use BodyLog" }
            HelpTable { title: "Controls", rows: CONTROLS }
            HelpTable { title: "Shortcuts", rows: SHORTCUTS }
            p {
                style: "margin: 16px 0 0 0; font-size: 12px; color: {TEXT_MUTED}; line-height: 1.5;",
                "Each marker keeps a timeline of dated entries. Select a marker to see its history, add new observations or attach photos."
            }
            div {
                style: "display: flex; justify-content: flex-end; margin-top: 20px;",
                button {
                    style: "padding: 8px 14px; background: {ACCENT_PRIMARY}; border: none; border-radius: 4px; color: white; font-size: 12px; cursor: pointer;",
                    onclick: move |e| on_close.call(e),
                    "Got it"
                }
            }
        }
    }
}

#[component]
fn HelpTable(title: &'static str, rows: &'static [(&'static str, &'static str)]) -> Element {
    rsx! {
        div {
            style: "font-size: 10px; color: {TEXT_DIM}; text-transform: uppercase; letter-spacing: 0.5px; margin: 12px 0 6px 0;",
            "{title}"
        }
        for (keys, action) in rows.iter() {
            div {
                style: "display: flex; gap: 12px; padding: 4px 0; font-size: 12px; border-bottom: 1px solid {BORDER_SUBTLE};",
                span { style: "width: 140px; flex-shrink: 0; color: {TEXT_PRIMARY}; font-family: 'SF Mono', Consolas, monospace;", "{keys}" }
                span { style: "color: {TEXT_SECONDARY};", "{action}" }
            }
        }
    }
}
