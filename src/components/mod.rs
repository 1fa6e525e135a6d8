//! UI components grouped by feature domain.
mod modal_shell;

mod title_bar;
mod side_panel;
mod status_bar;
mod viewer_panel;
mod marker_list;
mod marker_timeline;
mod capture_modal;
mod confirm_modal;
mod help_modal;
mod welcome_modal;
mod lightbox_modal;

pub use modal_shell::ModalShell;
pub use title_bar::TitleBar;
pub use side_panel::SidePanel;
pub use status_bar::StatusBar;
pub use viewer_panel::ViewerPanel;
pub use marker_list::MarkerList;
pub use marker_timeline::MarkerTimeline;
pub use capture_modal::CaptureModal;
pub use confirm_modal::ConfirmModal;
pub use help_modal::HelpModal;
pub use welcome_modal::WelcomeModal;
pub use lightbox_modal::LightboxModal;
