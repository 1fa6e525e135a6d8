//! Root application component
//!
//! This defines the main App component and the overall layout structure.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use dioxus::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::components::{
    CaptureModal, ConfirmModal, HelpModal, LightboxModal, MarkerList, MarkerTimeline, SidePanel,
    StatusBar, TitleBar, ViewerPanel, WelcomeModal,
};
use crate::config::AppConfig;
use crate::constants::*;
use crate::core::image_data::{load_data_uri, ImageLimits};
use crate::core::model_asset::load_body_model;
use crate::hotkeys::{handle_hotkey, HotkeyAction, HotkeyContext, HotkeyResult};
use crate::state::{Controller, JsonFileStore, Modal, Preferences, SceneIntent};

type PreferenceStore = Rc<RefCell<JsonFileStore>>;

fn toggle_gender(mut preferences: Signal<Preferences>, store: &PreferenceStore) {
    let mut prefs = preferences();
    let next = prefs.gender.other();
    if let Err(err) = prefs.set_gender(&mut *store.borrow_mut(), next) {
        warn!("failed to save gender preference: {err}");
    }
    preferences.set(prefs);
}

fn toggle_sidebar(mut preferences: Signal<Preferences>, store: &PreferenceStore) {
    let mut prefs = preferences();
    let next = !prefs.sidebar_open;
    if let Err(err) = prefs.set_sidebar_open(&mut *store.borrow_mut(), next) {
        warn!("failed to save sidebar preference: {err}");
    }
    preferences.set(prefs);
}

/// Read an image for the open capture form in the background.
fn attach_image(
    mut controller: Signal<Controller>,
    mut capture_error: Signal<Option<String>>,
    path: PathBuf,
    limits: ImageLimits,
) {
    let Some(ticket) = controller.write().begin_image_read() else {
        return;
    };
    capture_error.set(None);
    spawn(async move {
        match load_data_uri(path, limits).await {
            Ok(data_uri) => {
                controller.write().complete_image_read(ticket, data_uri);
            }
            Err(err) => {
                warn!("image attachment failed: {err}");
                if controller.write().fail_image_read(ticket) {
                    capture_error.set(Some(format!("Couldn't load image: {err}")));
                }
            }
        }
    });
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let image_limits = config.image_limits();
    let preference_store: PreferenceStore = use_hook(|| {
        Rc::new(RefCell::new(JsonFileStore::open_or_default(
            config.preferences_path(),
        )))
    });
    let preferences = use_signal({
        let store = preference_store.clone();
        move || Preferences::load(&*store.borrow())
    });
    let mut controller = use_signal(Controller::with_welcome);
    let mut capture_error = use_signal(|| None::<String>);
    let mut input_focused = use_signal(|| false);
    let mut fps = use_signal(|| None::<f64>);

    let models_dir = config.models_dir.clone();
    let body = use_memo(move || load_body_model(preferences().gender, models_dir.as_deref()));

    use_future(move || async move {
        loop {
            let mut eval = document::eval(INPUT_FOCUS_SCRIPT);
            while let Ok(focused) = eval.recv::<bool>().await {
                if input_focused() != focused {
                    input_focused.set(focused);
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
    });

    // Snapshot what the views need so no borrow outlives the render.
    let prefs = preferences();
    let (markers, selected_marker, modal, phase, marker_count, entry_count) = {
        let ctl = controller.read();
        (
            ctl.store().markers().to_vec(),
            ctl.selected_marker().cloned(),
            ctl.modal().clone(),
            ctl.phase().label(),
            ctl.store().len(),
            ctl.store().entry_count(),
        )
    };
    let selected_id = selected_marker.as_ref().map(|m| m.id);
    let timeline_marker_id = selected_id.unwrap_or_default();
    let modal_open = modal.is_open();
    let panel_title = selected_marker
        .as_ref()
        .map(|m| m.title.clone())
        .unwrap_or_else(|| "Markers".to_string());

    let confirm_prompt = match &modal {
        Modal::Confirm(pending) => pending.prompt(controller.read().store()),
        _ => None,
    };
    let lightbox_view = match &modal {
        Modal::Lightbox(lightbox) => controller
            .read()
            .store()
            .find_marker(lightbox.marker_id)
            .and_then(|marker| {
                let count = marker.image_entries().count();
                let entry = marker.image_entries().nth(lightbox.index)?;
                Some((
                    entry.image.clone().unwrap_or_default(),
                    entry.description.clone(),
                    entry.date.clone(),
                    lightbox.index,
                    count,
                ))
            }),
        _ => None,
    };

    let hotkey_store = preference_store.clone();
    let title_gender_store = preference_store.clone();
    let title_sidebar_store = preference_store.clone();
    let rail_store = preference_store.clone();

    rsx! {
        // Global CSS
        style {
            r#"
            *, *::before, *::after {{ box-sizing: border-box; }}
            html, body {{ margin: 0; padding: 0; overflow: hidden; background-color: {BG_BASE}; }}
            body {{ -webkit-font-smoothing: antialiased; }}
            ::-webkit-scrollbar {{ width: 6px; height: 6px; }}
            ::-webkit-scrollbar-track {{ background: transparent; }}
            ::-webkit-scrollbar-thumb {{ background: {BORDER_DEFAULT}; border-radius: 3px; }}
            ::-webkit-scrollbar-thumb:hover {{ background: {BORDER_STRONG}; }}
            .collapse-btn {{ opacity: 0.6; transition: opacity 0.15s ease, background-color 0.15s ease; }}
            .collapse-btn:hover {{ opacity: 1; background-color: {BG_HOVER} !important; }}
            .collapsed-rail {{ transition: background-color 0.15s ease; }}
            .collapsed-rail:hover {{ background-color: {BG_HOVER} !important; }}
            input:focus, textarea:focus {{ border-color: {BORDER_ACCENT} !important; }}
            button:disabled {{ opacity: 0.5; cursor: default !important; }}
            "#
        }

        // Main app container
        div {
            class: "app-container",
            style: "
                display: flex; flex-direction: column;
                width: 100vw; height: 100vh;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
                overflow: hidden; position: fixed; top: 0; left: 0;
                outline: none;
            ",
            oncontextmenu: move |e| e.prevent_default(),
            // Enable keyboard focus on this container for hotkeys
            tabindex: "0",
            onmounted: move |e: MountedEvent| async move {
                let _ = e.set_focus(true).await;
            },
            onkeydown: move |e: KeyboardEvent| {
                let (hotkey_context, selected) = {
                    let ctl = controller.read();
                    let context = HotkeyContext {
                        has_selection: ctl.selected_marker().is_some(),
                        modal_open: ctl.modal().is_open(),
                        lightbox_open: ctl.lightbox().is_some(),
                        input_focused: input_focused(),
                    };
                    (context, ctl.selected_id())
                };

                let modifiers = e.modifiers();
                let result = handle_hotkey(
                    &e.key(),
                    modifiers.ctrl(),
                    modifiers.alt(),
                    modifiers.meta(),
                    &hotkey_context,
                );
                match result {
                    HotkeyResult::Action(action) => {
                        e.prevent_default();
                        match action {
                            HotkeyAction::CloseModal => {
                                controller.write().close_modal();
                                capture_error.set(None);
                            }
                            HotkeyAction::OpenHelp => {
                                controller.write().open_help();
                            }
                            HotkeyAction::DeleteSelectedMarker => {
                                if let Some(marker_id) = selected {
                                    controller.write().request_delete_marker(marker_id);
                                }
                            }
                            HotkeyAction::AddEntry => {
                                capture_error.set(None);
                                controller.write().open_add_entry();
                            }
                            HotkeyAction::LightboxPrevious => {
                                controller.write().lightbox_step(-1);
                            }
                            HotkeyAction::LightboxNext => {
                                controller.write().lightbox_step(1);
                            }
                            HotkeyAction::ToggleSidebar => toggle_sidebar(preferences, &hotkey_store),
                            HotkeyAction::ToggleGender => toggle_gender(preferences, &hotkey_store),
                        }
                    }
                    HotkeyResult::NoMatch | HotkeyResult::Suppressed => {}
                }
            },

            TitleBar {
                gender: prefs.gender,
                sidebar_open: prefs.sidebar_open,
                on_toggle_gender: move |_| toggle_gender(preferences, &title_gender_store),
                on_toggle_sidebar: move |_| toggle_sidebar(preferences, &title_sidebar_store),
                on_open_help: move |_| {
                    controller.write().open_help();
                },
            }

            // Main content
            div {
                class: "main-content",
                style: "display: flex; flex: 1; overflow: hidden;",

                ViewerPanel {
                    body: body(),
                    markers: markers.clone(),
                    selected: selected_id,
                    modal_open,
                    on_intent: move |intent: SceneIntent| {
                        capture_error.set(None);
                        controller.write().apply_scene_intent(intent);
                    },
                    on_fps: move |value: f64| fps.set(Some(value)),
                }

                SidePanel {
                    title: panel_title,
                    collapsed: !prefs.sidebar_open,
                    on_toggle: move |_| toggle_sidebar(preferences, &rail_store),

                    if let Some(marker) = selected_marker.clone() {
                        MarkerTimeline {
                            marker,
                            on_back: move |_| {
                                controller.write().select_marker(None);
                            },
                            on_add_entry: move |_| {
                                capture_error.set(None);
                                controller.write().open_add_entry();
                            },
                            on_delete_marker: move |_| {
                                controller.write().request_delete_marker(timeline_marker_id);
                            },
                            on_edit_entry: move |entry_id: Uuid| {
                                capture_error.set(None);
                                controller.write().open_edit_entry(timeline_marker_id, entry_id);
                            },
                            on_delete_entry: move |entry_id: Uuid| {
                                controller.write().request_delete_entry(timeline_marker_id, entry_id);
                            },
                            on_open_image: move |entry_id: Uuid| {
                                controller.write().open_lightbox(timeline_marker_id, entry_id);
                            },
                        }
                    } else {
                        MarkerList {
                            markers: markers.clone(),
                            on_select: move |marker_id: Uuid| {
                                controller.write().select_marker(Some(marker_id));
                            },
                        }
                    }
                }
            }

            StatusBar {
                phase,
                fps: fps(),
                marker_count,
                entry_count,
            }

            // Modals
            {match modal {
                Modal::None => rsx! {},
                Modal::Welcome => rsx! {
                    WelcomeModal {
                        on_start: move |_| controller.write().close_modal(),
                        on_help: move |_| {
                            controller.write().open_help();
                        },
                    }
                },
                Modal::Help => rsx! {
                    HelpModal {
                        on_close: move |_| controller.write().close_modal(),
                    }
                },
                Modal::Capture(form) => rsx! {
                    CaptureModal {
                        form,
                        error: capture_error(),
                        on_title: move |title: String| {
                            capture_error.set(None);
                            controller.write().set_capture_title(title);
                        },
                        on_description: move |description: String| {
                            capture_error.set(None);
                            controller.write().set_capture_description(description);
                        },
                        on_pick_image: move |path: PathBuf| {
                            attach_image(controller, capture_error, path, image_limits);
                        },
                        on_clear_image: move |_| controller.write().clear_capture_image(),
                        on_submit: move |_| {
                            let result = controller.write().submit_capture();
                            match result {
                                Ok(_) => capture_error.set(None),
                                Err(err) => capture_error.set(Some(err.to_string())),
                            }
                        },
                        on_cancel: move |_| {
                            capture_error.set(None);
                            controller.write().cancel_capture();
                        },
                    }
                },
                Modal::Confirm(_) => rsx! {
                    if let Some((title, message)) = confirm_prompt {
                        ConfirmModal {
                            title,
                            message,
                            on_confirm: move |_| {
                                controller.write().confirm_deletion();
                            },
                            on_cancel: move |_| {
                                controller.write().cancel_confirmation();
                            },
                        }
                    }
                },
                Modal::Lightbox(_) => rsx! {
                    if let Some((image, caption, date, index, count)) = lightbox_view {
                        LightboxModal {
                            image,
                            caption,
                            date,
                            index,
                            count,
                            on_previous: move |_| {
                                controller.write().lightbox_step(-1);
                            },
                            on_next: move |_| {
                                controller.write().lightbox_step(1);
                            },
                            on_close: move |_| controller.write().close_modal(),
                        }
                    }
                },
            }}
        }
    }
}
