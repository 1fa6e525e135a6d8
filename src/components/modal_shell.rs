use dioxus::prelude::*;
use crate::constants::*;

/// Backdrop plus centered card shared by every modal.
#[component]
pub fn ModalShell(
    width: u32,
    on_dismiss: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    rsx! {
        div {
            style: "
                position: fixed; top: 0; left: 0; right: 0; bottom: 0;
                background-color: rgba(0, 0, 0, 0.5);
                display: flex; align-items: center; justify-content: center;
                z-index: 2000;
            ",
            onclick: move |e| on_dismiss.call(e),
            div {
                style: "
                    width: {width}px; max-width: calc(100vw - 48px); max-height: calc(100vh - 48px);
                    overflow-y: auto; box-sizing: border-box;
                    background-color: {BG_ELEVATED};
                    border: 1px solid {BORDER_DEFAULT}; border-radius: 8px;
                    padding: 24px; box-shadow: 0 10px 25px rgba(0,0,0,0.5);
                ",
                onclick: move |e| e.stop_propagation(),
                {children}
            }
        }
    }
}
