use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn StatusBar(
    phase: &'static str,
    fps: Option<f64>,
    marker_count: usize,
    entry_count: usize,
) -> Element {
    let fps_label = fps
        .map(|fps| format!("{fps:.0} fps"))
        .unwrap_or_else(|| "-- fps".to_string());
    let marker_label = if marker_count == 1 { "marker" } else { "markers" };
    let entry_label = if entry_count == 1 { "entry" } else { "entries" };
    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between; height: {STATUS_BAR_HEIGHT}px; padding: 0 14px; background-color: {BG_SURFACE}; border-top: 1px solid {BORDER_DEFAULT}; font-size: 11px; color: {TEXT_DIM}; flex-shrink: 0;",
            span { "{phase}" }
            div {
                style: "display: flex; gap: 16px; font-family: 'SF Mono', Consolas, monospace;",
                span { "{marker_count} {marker_label}" }
                span { "{entry_count} {entry_label}" }
                span { "{fps_label}" }
            }
        }
    }
}
