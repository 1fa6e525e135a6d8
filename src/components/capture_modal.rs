use std::path::PathBuf;

use dioxus::prelude::*;

use crate::constants::*;
use crate::state::CaptureForm;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

#[component]
pub fn CaptureModal(
    form: CaptureForm,
    error: Option<String>,
    on_title: EventHandler<String>,
    on_description: EventHandler<String>,
    on_pick_image: EventHandler<PathBuf>,
    on_clear_image: EventHandler<MouseEvent>,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let heading = form.heading();
    let requires_title = form.requires_title();
    let loading = form.is_image_loading();
    let submit_label = if matches!(form.mode, crate::state::CaptureMode::EditEntry { .. }) {
        "Save Changes"
    } else {
        "Save"
    };
    let field_style = format!(
        "width: 100%; box-sizing: border-box; padding: 8px 10px; \
         background-color: {BG_BASE}; border: 1px solid {BORDER_DEFAULT}; \
         border-radius: 6px; color: {TEXT_PRIMARY}; font-size: 13px; outline: none;"
    );
    let label_style = format!(
        "display: block; font-size: 11px; color: {TEXT_MUTED}; \
         text-transform: uppercase; letter-spacing: 0.5px; margin: 12px 0 6px 0;"
    );

    rsx! {
        super::ModalShell {
            width: 440,
            on_dismiss: move |_| on_cancel.call(()),
            h3 { style: "margin: 0 0 4px 0; font-size: 16px; color: {TEXT_PRIMARY};", "{heading}" }

            if requires_title {
                label { style: "{label_style}", "Title" }
                input {
                    r#type: "text",
                    placeholder: "e.g. Left knee",
                    autofocus: true,
                    value: "{form.title}",
                    style: "{field_style}",
                    oninput: move |e| on_title.call(e.value()),
                }
            }

            label { style: "{label_style}", "Description" }
            textarea {
                rows: 4,
                placeholder: "What did you notice?",
                autofocus: !requires_title,
                value: "{form.description}",
                style: "{field_style} resize: vertical; font-family: inherit;",
                oninput: move |e| on_description.call(e.value()),
            }

            label { style: "{label_style}", "Image" }
            div {
                style: "display: flex; align-items: center; gap: 8px;",
                button {
                    disabled: loading,
                    style: "
                        padding: 6px 12px; background-color: {BG_SURFACE};
                        border: 1px dashed {BORDER_DEFAULT}; border-radius: 6px;
                        color: {TEXT_SECONDARY}; font-size: 12px; cursor: pointer;
                    ",
                    onclick: move |_| {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", IMAGE_EXTENSIONS)
                            .set_title("Attach Image")
                            .pick_file()
                        {
                            on_pick_image.call(path);
                        }
                    },
                    if form.image.is_some() { "Replace Image..." } else { "Attach Image..." }
                }
                if loading {
                    span { style: "font-size: 11px; color: {TEXT_MUTED};", "Loading image..." }
                }
                if form.image.is_some() && !loading {
                    button {
                        class: "collapse-btn",
                        style: "background: transparent; border: none; color: {TEXT_MUTED}; font-size: 11px; cursor: pointer; padding: 4px 6px;",
                        onclick: move |e| on_clear_image.call(e),
                        "Remove"
                    }
                }
            }
            if let Some(image) = form.image.clone() {
                img {
                    src: "{image}",
                    style: "margin-top: 10px; max-width: 100%; max-height: 200px; object-fit: contain; border-radius: 4px; border: 1px solid {BORDER_DEFAULT};",
                }
            }

            if let Some(message) = error {
                div {
                    style: "margin-top: 12px; font-size: 12px; color: {ACCENT_DANGER};",
                    "{message}"
                }
            }

            div {
                style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 20px;",
                button {
                    style: "padding: 8px 14px; background: transparent; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; color: {TEXT_SECONDARY}; font-size: 12px; cursor: pointer;",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    disabled: loading,
                    style: "padding: 8px 14px; background: {ACCENT_PRIMARY}; border: none; border-radius: 4px; color: white; font-size: 12px; cursor: pointer;",
                    onclick: move |_| on_submit.call(()),
                    "{submit_label}"
                }
            }
        }
    }
}
