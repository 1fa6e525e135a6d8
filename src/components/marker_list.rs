use dioxus::prelude::*;
use uuid::Uuid;

use crate::constants::*;
use crate::state::search::filter_markers;
use crate::state::Marker;

/// Overview of every marker with a title search.
#[component]
pub fn MarkerList(markers: Vec<Marker>, on_select: EventHandler<Uuid>) -> Element {
    let mut query = use_signal(String::new);
    let query_value = query();
    let visible = filter_markers(&markers, &query_value);
    let empty_message = if markers.is_empty() {
        "No markers yet. Double-click the body to add one."
    } else {
        "No markers match your search."
    };

    rsx! {
        div {
            style: "padding: 12px; display: flex; flex-direction: column; gap: 8px;",
            input {
                r#type: "text",
                placeholder: "Search markers...",
                value: "{query_value}",
                style: "
                    width: 100%; box-sizing: border-box; padding: 6px 10px;
                    background-color: {BG_BASE}; border: 1px solid {BORDER_DEFAULT};
                    border-radius: 6px; color: {TEXT_PRIMARY}; font-size: 12px; outline: none;
                ",
                oninput: move |e| query.set(e.value()),
            }

            if visible.is_empty() {
                div {
                    style: "padding: 24px 8px; text-align: center; font-size: 12px; color: {TEXT_DIM};",
                    "{empty_message}"
                }
            }

            for marker in visible {
                MarkerCard {
                    key: "{marker.id}",
                    marker: marker.clone(),
                    on_select: move |id| on_select.call(id),
                }
            }
        }
    }
}

#[component]
fn MarkerCard(marker: Marker, on_select: EventHandler<Uuid>) -> Element {
    let marker_id = marker.id;
    let latest = marker
        .latest_entry()
        .map(|entry| entry.description.clone())
        .unwrap_or_default();
    let entry_count = marker.entries.len();
    let entry_label = if entry_count == 1 { "entry" } else { "entries" };
    let thumbnails: Vec<(Uuid, String)> = marker
        .image_entries()
        .take(MAX_SIDEBAR_THUMBNAILS)
        .filter_map(|entry| entry.image.clone().map(|image| (entry.id, image)))
        .collect();

    rsx! {
        div {
            style: "
                padding: 10px 12px; background-color: {BG_SURFACE};
                border: 1px solid {BORDER_SUBTLE}; border-radius: 6px;
                cursor: pointer; transition: border-color 0.15s ease;
            ",
            onclick: move |_| on_select.call(marker_id),
            div {
                style: "display: flex; align-items: baseline; justify-content: space-between; gap: 8px;",
                span {
                    style: "font-size: 13px; font-weight: 600; color: {TEXT_PRIMARY}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                    "{marker.title}"
                }
                span {
                    style: "font-size: 10px; color: {TEXT_DIM}; flex-shrink: 0;",
                    "{entry_count} {entry_label}"
                }
            }
            div {
                style: "
                    margin-top: 4px; font-size: 12px; color: {TEXT_SECONDARY};
                    display: -webkit-box; -webkit-line-clamp: 2; -webkit-box-orient: vertical;
                    overflow: hidden;
                ",
                "{latest}"
            }
            if !thumbnails.is_empty() {
                div {
                    style: "display: flex; gap: 6px; margin-top: 8px;",
                    for (entry_id, image) in thumbnails {
                        img {
                            key: "{entry_id}",
                            src: "{image}",
                            style: "width: 48px; height: 48px; object-fit: cover; border-radius: 4px; border: 1px solid {BORDER_DEFAULT};",
                        }
                    }
                }
            }
        }
    }
}
