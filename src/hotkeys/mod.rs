//! Hotkey system
//!
//! Centralized hotkey management for BodyLog.
//!
//! # Architecture
//!
//! - **HotkeyAction**: Enum of all possible actions that can be triggered by hotkeys
//! - **HotkeyContext**: Determines which hotkeys are active based on app state
//! - **handle_hotkey()**: Main dispatch function that maps key events to actions
//!
//! # Adding New Hotkeys
//!
//! 1. Add a variant to `HotkeyAction`
//! 2. Add the key binding in `handle_hotkey()`
//! 3. Handle the action in the App component's hotkey handler

use dioxus::prelude::Key;

/// All possible actions that can be triggered by hotkeys.
///
/// Each variant represents a semantic action, not a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Dismiss the active modal with cancel semantics.
    CloseModal,
    OpenHelp,
    /// Ask to delete the selected marker (goes through confirmation).
    DeleteSelectedMarker,
    /// Open the capture form for a new entry on the selected marker.
    AddEntry,
    LightboxPrevious,
    LightboxNext,
    ToggleSidebar,
    ToggleGender,
}

/// Context information that affects which hotkeys are active.
#[derive(Debug, Clone, Default)]
pub struct HotkeyContext {
    /// Whether a marker is selected
    pub has_selection: bool,
    /// Whether any modal is showing
    pub modal_open: bool,
    /// Whether the image lightbox is the active modal
    pub lightbox_open: bool,
    /// Whether an input field has focus (should suppress most hotkeys)
    pub input_focused: bool,
}

/// Result of processing a key event.
#[derive(Debug, Clone)]
pub enum HotkeyResult {
    /// A hotkey action was matched and should be executed
    Action(HotkeyAction),
    /// No matching hotkey for this key/context combination
    NoMatch,
    /// Hotkey would match but is suppressed (e.g., input field focused)
    Suppressed,
}

/// Maps a key event to an action, considering the current context.
///
/// Modified keys (ctrl/alt/meta) never match so platform shortcuts pass through.
pub fn handle_hotkey(
    key: &Key,
    ctrl: bool,
    alt: bool,
    meta: bool,
    context: &HotkeyContext,
) -> HotkeyResult {
    // Escape still closes a modal while typing in its fields.
    if matches!(key, Key::Escape) {
        return if context.modal_open {
            HotkeyResult::Action(HotkeyAction::CloseModal)
        } else {
            HotkeyResult::NoMatch
        };
    }

    if ctrl || alt || meta {
        return HotkeyResult::NoMatch;
    }

    if context.input_focused {
        return HotkeyResult::Suppressed;
    }

    // ═══════════════════════════════════════════════════════════════
    // Global Hotkeys (work regardless of context)
    // ═══════════════════════════════════════════════════════════════
    if let Key::Character(c) = key {
        match c.as_str() {
            "b" | "B" => return HotkeyResult::Action(HotkeyAction::ToggleSidebar),
            "g" | "G" => return HotkeyResult::Action(HotkeyAction::ToggleGender),
            _ => {}
        }
    }

    // ═══════════════════════════════════════════════════════════════
    // Context-Specific Hotkeys
    // ═══════════════════════════════════════════════════════════════
    if context.lightbox_open {
        match key {
            Key::ArrowLeft => return HotkeyResult::Action(HotkeyAction::LightboxPrevious),
            Key::ArrowRight => return HotkeyResult::Action(HotkeyAction::LightboxNext),
            _ => {}
        }
    }

    if context.modal_open {
        return HotkeyResult::NoMatch;
    }

    match key {
        Key::Character(c) if c == "?" || c == "h" || c == "H" => {
            HotkeyResult::Action(HotkeyAction::OpenHelp)
        }
        Key::Character(c) if context.has_selection && (c == "a" || c == "n") => {
            HotkeyResult::Action(HotkeyAction::AddEntry)
        }
        Key::Delete | Key::Backspace if context.has_selection => {
            HotkeyResult::Action(HotkeyAction::DeleteSelectedMarker)
        }
        _ => HotkeyResult::NoMatch,
    }
}
