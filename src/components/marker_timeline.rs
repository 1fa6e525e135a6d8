use dioxus::prelude::*;
use uuid::Uuid;

use crate::constants::*;
use crate::state::{Entry, Marker};

/// Entry history of the selected marker, newest first.
#[component]
pub fn MarkerTimeline(
    marker: Marker,
    on_back: EventHandler<MouseEvent>,
    on_add_entry: EventHandler<MouseEvent>,
    on_delete_marker: EventHandler<MouseEvent>,
    on_edit_entry: EventHandler<Uuid>,
    on_delete_entry: EventHandler<Uuid>,
    on_open_image: EventHandler<Uuid>,
) -> Element {
    rsx! {
        div {
            style: "padding: 12px; display: flex; flex-direction: column; gap: 10px;",
            button {
                class: "collapse-btn",
                style: "
                    align-self: flex-start; background: transparent; border: none;
                    color: {TEXT_SECONDARY}; font-size: 12px; cursor: pointer; padding: 4px 0;
                ",
                onclick: move |e| on_back.call(e),
                "← Back to Overview"
            }

            div {
                style: "display: flex; align-items: center; justify-content: space-between; gap: 8px;",
                h3 {
                    style: "margin: 0; font-size: 15px; color: {TEXT_PRIMARY}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                    "{marker.title}"
                }
                button {
                    style: "
                        padding: 4px 10px; background: transparent; border: 1px solid {ACCENT_DANGER};
                        border-radius: 4px; color: {ACCENT_DANGER}; font-size: 11px; cursor: pointer;
                        flex-shrink: 0;
                    ",
                    onclick: move |e| on_delete_marker.call(e),
                    "Delete Marker"
                }
            }

            button {
                style: "
                    width: 100%; padding: 8px 12px;
                    background-color: {ACCENT_PRIMARY}; border: none;
                    border-radius: 6px; color: white; font-size: 12px; cursor: pointer;
                ",
                onclick: move |e| on_add_entry.call(e),
                "+ Add Entry"
            }

            div {
                style: "display: flex; flex-direction: column; gap: 0; border-left: 2px solid {BORDER_STRONG}; margin-left: 6px;",
                for entry in marker.entries.iter().cloned() {
                    TimelineEntry {
                        key: "{entry.id}",
                        entry,
                        on_edit: move |id| on_edit_entry.call(id),
                        on_delete: move |id| on_delete_entry.call(id),
                        on_open_image: move |id| on_open_image.call(id),
                    }
                }
            }
        }
    }
}

#[component]
fn TimelineEntry(
    entry: Entry,
    on_edit: EventHandler<Uuid>,
    on_delete: EventHandler<Uuid>,
    on_open_image: EventHandler<Uuid>,
) -> Element {
    let entry_id = entry.id;
    rsx! {
        div {
            style: "position: relative; padding: 4px 0 14px 16px;",
            div {
                style: "
                    position: absolute; left: -6px; top: 8px; width: 10px; height: 10px;
                    border-radius: 50%; background-color: {MARKER_IDLE_COLOR};
                    border: 2px solid {BG_ELEVATED};
                ",
            }
            div {
                style: "display: flex; align-items: center; justify-content: space-between;",
                span { style: "font-size: 11px; color: {TEXT_MUTED};", "{entry.date}" }
                div {
                    style: "display: flex; gap: 4px;",
                    button {
                        class: "collapse-btn",
                        style: "background: transparent; border: none; color: {TEXT_SECONDARY}; font-size: 11px; cursor: pointer; padding: 2px 6px; border-radius: 4px;",
                        onclick: move |_| on_edit.call(entry_id),
                        "Edit"
                    }
                    button {
                        class: "collapse-btn",
                        style: "background: transparent; border: none; color: {ACCENT_DANGER}; font-size: 11px; cursor: pointer; padding: 2px 6px; border-radius: 4px;",
                        onclick: move |_| on_delete.call(entry_id),
                        "Delete"
                    }
                }
            }
            p {
                style: "margin: 4px 0 0 0; font-size: 12px; color: {TEXT_PRIMARY}; white-space: pre-wrap; word-break: break-word;",
                "{entry.description}"
            }
            if let Some(image) = entry.image.clone() {
                img {
                    src: "{image}",
                    style: "margin-top: 8px; max-width: 100%; max-height: 160px; object-fit: cover; border-radius: 4px; cursor: zoom-in; border: 1px solid {BORDER_DEFAULT};",
                    onclick: move |_| on_open_image.call(entry_id),
                }
            }
        }
    }
}
