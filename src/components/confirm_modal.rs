use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn ConfirmModal(
    title: String,
    message: String,
    on_confirm: EventHandler<MouseEvent>,
    on_cancel: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        super::ModalShell {
            width: 380,
            on_dismiss: move |e| on_cancel.call(e),
            h3 { style: "margin: 0 0 12px 0; font-size: 16px; color: {TEXT_PRIMARY};", "{title}" }
            p { style: "margin: 0 0 20px 0; font-size: 13px; color: {TEXT_SECONDARY}; line-height: 1.5;", "{message}" }
            div {
                style: "display: flex; justify-content: flex-end; gap: 8px;",
                button {
                    style: "padding: 8px 14px; background: transparent; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; color: {TEXT_SECONDARY}; font-size: 12px; cursor: pointer;",
                    onclick: move |e| on_cancel.call(e),
                    "Cancel"
                }
                button {
                    style: "padding: 8px 14px; background: {ACCENT_DANGER}; border: none; border-radius: 4px; color: white; font-size: 12px; cursor: pointer;",
                    onclick: move |e| on_confirm.call(e),
                    "Delete"
                }
            }
        }
    }
}
