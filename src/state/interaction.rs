//! Interaction state: which modal is active and the phase derived from it.
//!
//! Only one modal exists at a time, so "capture form and confirmation open together"
//! cannot be represented.

use uuid::Uuid;

use super::{CaptureForm, CaptureMode, MarkerStore, Position};

/// Intent reported by the 3D viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneIntent {
    /// Double-click on the body surface.
    PlaceMarker(Position),
    /// Click on a marker glyph.
    ToggleMarker(Uuid),
    /// Click that hit nothing.
    ClearSelection,
}

/// Deletion waiting for the user's confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDeletion {
    Marker { marker_id: Uuid },
    Entry { marker_id: Uuid, entry_id: Uuid },
}

impl PendingDeletion {
    /// Title and message for the confirmation dialog, or `None` if the target is gone.
    pub fn prompt(&self, store: &MarkerStore) -> Option<(String, String)> {
        match *self {
            PendingDeletion::Marker { marker_id } => {
                let marker = store.find_marker(marker_id)?;
                let count = marker.entries.len();
                let noun = if count == 1 { "entry" } else { "entries" };
                Some((
                    "Delete Marker".to_string(),
                    format!(
                        "Delete \"{}\" and its {} {}? This cannot be undone.",
                        marker.title, count, noun
                    ),
                ))
            }
            PendingDeletion::Entry { marker_id, entry_id } => {
                let marker = store.find_marker(marker_id)?;
                let entry = marker.find_entry(entry_id)?;
                let message = if marker.entries.len() == 1 {
                    format!(
                        "Delete the entry from {}? It is the last entry, so \"{}\" will be removed as well.",
                        entry.date, marker.title
                    )
                } else {
                    format!("Delete the entry from {}? This cannot be undone.", entry.date)
                };
                Some(("Delete Entry".to_string(), message))
            }
        }
    }
}

/// Full-screen viewer over one marker's image-bearing entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lightbox {
    pub marker_id: Uuid,
    pub index: usize,
}

impl Lightbox {
    /// Move by `delta` images, wrapping around `count`.
    pub fn step(&mut self, count: usize, delta: i32) {
        if count == 0 {
            self.index = 0;
            return;
        }
        let count = count as i64;
        let next = (self.index as i64 + delta as i64).rem_euclid(count);
        self.index = next as usize;
    }
}

/// The single active modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Modal {
    #[default]
    None,
    Welcome,
    Help,
    Capture(CaptureForm),
    Confirm(PendingDeletion),
    Lightbox(Lightbox),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::None)
    }

    /// Informational modals may be swapped for one another.
    pub fn is_informational(&self) -> bool {
        matches!(self, Modal::Welcome | Modal::Help)
    }

    pub fn capture(&self) -> Option<&CaptureForm> {
        match self {
            Modal::Capture(form) => Some(form),
            _ => None,
        }
    }

    pub fn capture_mut(&mut self) -> Option<&mut CaptureForm> {
        match self {
            Modal::Capture(form) => Some(form),
            _ => None,
        }
    }
}

/// Coarse interaction phase, derived from the selection and the active modal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionPhase {
    Idle,
    MarkerSelected(Uuid),
    CapturingNewMarker(Position),
    AddingEntry(Uuid),
    EditingEntry(Uuid, Uuid),
}

impl InteractionPhase {
    pub fn derive(selected: Option<Uuid>, modal: &Modal) -> Self {
        if let Some(form) = modal.capture() {
            return match form.mode {
                CaptureMode::NewMarker { position } => InteractionPhase::CapturingNewMarker(position),
                CaptureMode::AddEntry { marker_id } => InteractionPhase::AddingEntry(marker_id),
                CaptureMode::EditEntry { marker_id, entry_id } => {
                    InteractionPhase::EditingEntry(marker_id, entry_id)
                }
            };
        }
        match selected {
            Some(id) => InteractionPhase::MarkerSelected(id),
            None => InteractionPhase::Idle,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InteractionPhase::Idle => "Idle",
            InteractionPhase::MarkerSelected(_) => "Marker selected",
            InteractionPhase::CapturingNewMarker(_) => "Placing marker",
            InteractionPhase::AddingEntry(_) => "Adding entry",
            InteractionPhase::EditingEntry(_, _) => "Editing entry",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Entry;

    #[test]
    fn test_lightbox_wraps() {
        let mut lightbox = Lightbox {
            marker_id: Uuid::new_v4(),
            index: 0,
        };
        lightbox.step(3, -1);
        assert_eq!(lightbox.index, 2);
        lightbox.step(3, 1);
        assert_eq!(lightbox.index, 0);
        lightbox.step(3, 4);
        assert_eq!(lightbox.index, 1);
    }

    #[test]
    fn test_phase_follows_capture_mode() {
        let marker_id = Uuid::new_v4();
        let modal = Modal::Capture(CaptureForm::new(CaptureMode::AddEntry { marker_id }));
        assert_eq!(
            InteractionPhase::derive(Some(marker_id), &modal),
            InteractionPhase::AddingEntry(marker_id)
        );
        assert_eq!(
            InteractionPhase::derive(Some(marker_id), &Modal::Help),
            InteractionPhase::MarkerSelected(marker_id)
        );
        assert_eq!(InteractionPhase::derive(None, &Modal::None), InteractionPhase::Idle);
    }

    #[test]
    fn test_entry_prompt_warns_about_last_entry() {
        let mut store = MarkerStore::new();
        let marker = store
            .create_marker(Position::new(0.0, 1.0, 0.0), "Ankle", Entry::new("Sprain", None))
            .clone();
        let pending = PendingDeletion::Entry {
            marker_id: marker.id,
            entry_id: marker.entries[0].id,
        };
        let (title, message) = pending.prompt(&store).unwrap();
        assert_eq!(title, "Delete Entry");
        assert!(message.contains("Ankle"));

        store.delete_marker(marker.id);
        assert!(pending.prompt(&store).is_none());
    }
}
