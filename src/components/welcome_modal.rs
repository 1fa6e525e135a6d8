use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn WelcomeModal(
    on_start: EventHandler<MouseEvent>,
    on_help: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        super::ModalShell {
            width: 420,
            on_dismiss: move |e| on_start.call(e),
            h3 { style: "margin: 0 0 12px 0; font-size: 18px; color: {TEXT_PRIMARY};", "Welcome to BodyLog" }
            p {
                style: "margin: 0 0 12px 0; font-size: 13px; color: {TEXT_SECONDARY}; line-height: 1.5;",
                "Keep track of aches, marks and changes by pinning notes to a 3D body."
            }
            p {
                style: "margin: 0 0 20px 0; font-size: 13px; color: {TEXT_SECONDARY}; line-height: 1.5;",
                "Double-click anywhere on the body to place your first marker. Your notes stay on this device for this session only."
            }
            div {
                style: "display: flex; justify-content: flex-end; gap: 8px;",
                button {
                    style: "padding: 8px 14px; background: transparent; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; color: {TEXT_SECONDARY}; font-size: 12px; cursor: pointer;",
                    onclick: move |e| on_help.call(e),
                    "Show Controls"
                }
                button {
                    style: "padding: 8px 14px; background: {ACCENT_PRIMARY}; border: none; border-radius: 4px; color: white; font-size: 12px; cursor: pointer;",
                    onclick: move |e| on_start.call(e),
                    "Get Started"
                }
            }
        }
    }
}
