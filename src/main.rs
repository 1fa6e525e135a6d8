//! BodyLog
//!
//! A local-first desktop tracker for pinning timestamped observations to a 3D body model.

mod app;
mod components;
mod config;
mod constants;
mod core;
mod hotkeys;
mod logging;
mod state;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing::{info, warn};

fn main() {
    let (app_config, config_error) = config::AppConfig::load();
    logging::init_logging(&app_config.log_filter);
    if let Some(err) = config_error {
        warn!("{err}; using default configuration");
    }
    info!(
        preferences = %app_config.preferences_path().display(),
        "starting BodyLog"
    );

    // Configure the window
    let window = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("BodyLog")
                .with_inner_size(LogicalSize::new(
                    app_config.window_width,
                    app_config.window_height,
                ))
                .with_resizable(true),
        )
        .with_menu(None); // Disable default menu bar

    // Launch the Dioxus desktop application
    dioxus::LaunchBuilder::desktop()
        .with_cfg(window)
        .with_context(app_config)
        .launch(app::App);
}
