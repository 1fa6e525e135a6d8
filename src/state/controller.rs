//! Application controller.
//!
//! The controller owns the marker store, the selection and the active modal, and is the
//! only place any of them change. Views and the scene adapter call its handlers; every
//! handler runs synchronously and returns whether it did anything.

use tracing::debug;
use uuid::Uuid;

use super::{
    CaptureError, CaptureForm, CaptureMode, Entry, EntryRemoval, ImageTicket, InteractionPhase,
    Lightbox, Marker, MarkerStore, Modal, PendingDeletion, Position, SceneIntent, Selection,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Controller {
    store: MarkerStore,
    selection: Selection,
    modal: Modal,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh session that greets the user.
    pub fn with_welcome() -> Self {
        Self {
            modal: Modal::Welcome,
            ..Self::default()
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn store(&self) -> &MarkerStore {
        &self.store
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selection.primary()
    }

    pub fn selected_marker(&self) -> Option<&Marker> {
        self.selection
            .primary()
            .and_then(|id| self.store.find_marker(id))
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn capture(&self) -> Option<&CaptureForm> {
        self.modal.capture()
    }

    pub fn pending_deletion(&self) -> Option<PendingDeletion> {
        match self.modal {
            Modal::Confirm(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn lightbox(&self) -> Option<Lightbox> {
        match self.modal {
            Modal::Lightbox(lightbox) => Some(lightbox),
            _ => None,
        }
    }

    pub fn phase(&self) -> InteractionPhase {
        InteractionPhase::derive(self.selection.primary(), &self.modal)
    }

    // =========================================================================
    // Selection and scene
    // =========================================================================

    /// Apply a viewport intent. Ignored while a modal owns the pointer.
    pub fn apply_scene_intent(&mut self, intent: SceneIntent) -> bool {
        if self.modal.is_open() {
            debug!(?intent, "scene intent ignored while a modal is open");
            return false;
        }
        match intent {
            SceneIntent::PlaceMarker(position) => self.open_new_marker(position),
            SceneIntent::ToggleMarker(marker_id) => {
                if !self.store.contains(marker_id) {
                    return false;
                }
                self.selection.toggle(marker_id);
                true
            }
            SceneIntent::ClearSelection => {
                let had_selection = self.selection.primary().is_some();
                self.selection.clear();
                had_selection
            }
        }
    }

    /// Select a marker from a panel (no toggling), or clear with `None`.
    pub fn select_marker(&mut self, marker_id: Option<Uuid>) -> bool {
        if self.modal.is_open() {
            return false;
        }
        match marker_id {
            Some(id) if self.store.contains(id) => {
                self.selection.select(id);
                true
            }
            Some(_) => false,
            None => {
                self.selection.clear();
                true
            }
        }
    }

    // =========================================================================
    // Modals
    // =========================================================================

    fn open_modal(&mut self, modal: Modal) -> bool {
        let replaceable = !self.modal.is_open()
            || (self.modal.is_informational() && modal.is_informational());
        if !replaceable {
            debug!("modal request refused; another modal is active");
            return false;
        }
        self.modal = modal;
        true
    }

    pub fn open_help(&mut self) -> bool {
        self.open_modal(Modal::Help)
    }

    /// Close whatever is open. Capture and confirmation modals close as cancelled.
    pub fn close_modal(&mut self) {
        match self.modal {
            Modal::Capture(_) => {
                self.cancel_capture();
            }
            Modal::Confirm(_) => {
                self.cancel_confirmation();
            }
            _ => self.modal = Modal::None,
        }
    }

    // =========================================================================
    // Capture form
    // =========================================================================

    fn open_new_marker(&mut self, position: Position) -> bool {
        self.open_modal(Modal::Capture(CaptureForm::new(CaptureMode::NewMarker {
            position,
        })))
    }

    /// Open the form for a new entry on the selected marker.
    pub fn open_add_entry(&mut self) -> bool {
        let Some(marker_id) = self.selected_marker().map(|m| m.id) else {
            return false;
        };
        self.open_modal(Modal::Capture(CaptureForm::new(CaptureMode::AddEntry {
            marker_id,
        })))
    }

    /// Open the form pre-filled with an existing entry.
    pub fn open_edit_entry(&mut self, marker_id: Uuid, entry_id: Uuid) -> bool {
        let Some(entry) = self.store.find_entry(marker_id, entry_id) else {
            return false;
        };
        let form = CaptureForm::editing(
            marker_id,
            entry_id,
            entry.description.clone(),
            entry.image.clone(),
        );
        self.open_modal(Modal::Capture(form))
    }

    pub fn set_capture_title(&mut self, title: String) {
        if let Some(form) = self.modal.capture_mut() {
            form.title = title;
        }
    }

    pub fn set_capture_description(&mut self, description: String) {
        if let Some(form) = self.modal.capture_mut() {
            form.description = description;
        }
    }

    pub fn clear_capture_image(&mut self) {
        if let Some(form) = self.modal.capture_mut() {
            form.clear_image();
        }
    }

    /// Start an image read for the open form.
    pub fn begin_image_read(&mut self) -> Option<ImageTicket> {
        self.modal.capture_mut().map(CaptureForm::begin_image_read)
    }

    /// Deliver a finished image read. Results for closed or superseded forms are dropped.
    pub fn complete_image_read(&mut self, ticket: ImageTicket, data_uri: String) -> bool {
        let applied = self
            .modal
            .capture_mut()
            .map(|form| form.complete_image_read(ticket, data_uri))
            .unwrap_or(false);
        if !applied {
            debug!(?ticket, "discarded stale image read");
        }
        applied
    }

    pub fn fail_image_read(&mut self, ticket: ImageTicket) -> bool {
        self.modal
            .capture_mut()
            .map(|form| form.fail_image_read(ticket))
            .unwrap_or(false)
    }

    /// Commit the open form. On a validation error the form stays open and nothing changes.
    /// Returns the marker the form wrote into, if it still exists.
    pub fn submit_capture(&mut self) -> Result<Option<Uuid>, CaptureError> {
        let Some(form) = self.modal.capture() else {
            return Ok(None);
        };
        let valid = form.validate()?;
        let mode = form.mode;
        self.modal = Modal::None;

        let touched = match mode {
            CaptureMode::NewMarker { position } => {
                let entry = Entry::new(valid.description, valid.image);
                let marker_id = self.store.create_marker(position, valid.title, entry).id;
                Some(marker_id)
            }
            CaptureMode::AddEntry { marker_id } => self
                .store
                .add_entry(marker_id, Entry::new(valid.description, valid.image))
                .then_some(marker_id),
            CaptureMode::EditEntry { marker_id, entry_id } => self
                .store
                .update_entry(marker_id, entry_id, valid.description, valid.image)
                .then_some(marker_id),
        };

        match touched {
            Some(marker_id) => self.selection.select(marker_id),
            None => self.selection.clear(),
        }
        Ok(touched)
    }

    /// Close the form without touching the store.
    pub fn cancel_capture(&mut self) -> bool {
        if self.modal.capture().is_none() {
            return false;
        }
        self.modal = Modal::None;
        true
    }

    // =========================================================================
    // Deletion
    // =========================================================================

    pub fn request_delete_marker(&mut self, marker_id: Uuid) -> bool {
        if !self.store.contains(marker_id) {
            return false;
        }
        self.open_modal(Modal::Confirm(PendingDeletion::Marker { marker_id }))
    }

    pub fn request_delete_entry(&mut self, marker_id: Uuid, entry_id: Uuid) -> bool {
        if self.store.find_entry(marker_id, entry_id).is_none() {
            return false;
        }
        self.open_modal(Modal::Confirm(PendingDeletion::Entry {
            marker_id,
            entry_id,
        }))
    }

    /// Execute the pending deletion.
    pub fn confirm_deletion(&mut self) -> bool {
        let Some(pending) = self.pending_deletion() else {
            return false;
        };
        self.modal = Modal::None;
        match pending {
            PendingDeletion::Marker { marker_id } => {
                self.selection.remove(marker_id);
                self.store.delete_marker(marker_id)
            }
            PendingDeletion::Entry { marker_id, entry_id } => {
                match self.store.delete_entry(marker_id, entry_id) {
                    EntryRemoval::NotFound => false,
                    EntryRemoval::Removed => true,
                    EntryRemoval::RemovedWithMarker => {
                        self.selection.remove(marker_id);
                        true
                    }
                }
            }
        }
    }

    pub fn cancel_confirmation(&mut self) -> bool {
        if self.pending_deletion().is_none() {
            return false;
        }
        self.modal = Modal::None;
        true
    }

    // =========================================================================
    // Lightbox
    // =========================================================================

    /// Open the viewer on an entry's image.
    pub fn open_lightbox(&mut self, marker_id: Uuid, entry_id: Uuid) -> bool {
        let Some(marker) = self.store.find_marker(marker_id) else {
            return false;
        };
        let Some(index) = marker.image_entries().position(|e| e.id == entry_id) else {
            return false;
        };
        self.open_modal(Modal::Lightbox(Lightbox { marker_id, index }))
    }

    pub fn lightbox_step(&mut self, delta: i32) -> bool {
        let Modal::Lightbox(lightbox) = &mut self.modal else {
            return false;
        };
        let count = self
            .store
            .find_marker(lightbox.marker_id)
            .map(|m| m.image_entries().count())
            .unwrap_or(0);
        if count < 2 {
            return false;
        }
        lightbox.step(count, delta);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

    fn place(controller: &mut Controller, title: &str, description: &str) -> Uuid {
        assert!(controller.apply_scene_intent(SceneIntent::PlaceMarker(Position::new(0.1, 1.2, 0.05))));
        controller.set_capture_title(title.to_string());
        controller.set_capture_description(description.to_string());
        controller.submit_capture().unwrap().unwrap()
    }

    fn add_entry(controller: &mut Controller, description: &str) {
        assert!(controller.open_add_entry());
        controller.set_capture_description(description.to_string());
        controller.submit_capture().unwrap();
    }

    fn descriptions(controller: &Controller, marker_id: Uuid) -> Vec<String> {
        controller
            .store()
            .find_marker(marker_id)
            .map(|m| m.entries.iter().map(|e| e.description.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_double_click_opens_new_marker_form() {
        let mut controller = Controller::new();
        let position = Position::new(0.0, 1.8, 0.15);
        controller.apply_scene_intent(SceneIntent::PlaceMarker(position));
        assert_eq!(controller.phase(), InteractionPhase::CapturingNewMarker(position));
        assert!(controller.store().is_empty());
    }

    #[test]
    fn test_submit_new_marker_selects_it() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Left Knee", "Swelling noted");
        assert_eq!(controller.phase(), InteractionPhase::MarkerSelected(id));
        let marker = controller.selected_marker().unwrap();
        assert_eq!(marker.title, "Left Knee");
        assert_eq!(marker.position, Position::new(0.1, 1.2, 0.05));
        assert_eq!(descriptions(&controller, id), vec!["Swelling noted"]);
        assert!(!controller.modal().is_open());
    }

    #[test]
    fn test_glyph_click_toggles_selection() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Shoulder", "Ache");
        controller.apply_scene_intent(SceneIntent::ClearSelection);
        assert_eq!(controller.phase(), InteractionPhase::Idle);

        controller.apply_scene_intent(SceneIntent::ToggleMarker(id));
        assert_eq!(controller.selected_id(), Some(id));
        controller.apply_scene_intent(SceneIntent::ToggleMarker(id));
        assert_eq!(controller.selected_id(), None);
    }

    #[test]
    fn test_toggle_unknown_marker_is_ignored() {
        let mut controller = Controller::new();
        assert!(!controller.apply_scene_intent(SceneIntent::ToggleMarker(Uuid::new_v4())));
        assert_eq!(controller.selected_id(), None);
    }

    #[test]
    fn test_pointer_missed_clears_selection() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Hip", "Stiff");
        assert_eq!(controller.selected_id(), Some(id));
        controller.apply_scene_intent(SceneIntent::ClearSelection);
        assert_eq!(controller.selected_id(), None);
    }

    #[test]
    fn test_add_entry_requires_selection() {
        let mut controller = Controller::new();
        assert!(!controller.open_add_entry());
        assert!(!controller.modal().is_open());
    }

    #[test]
    fn test_add_entries_prepend() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Calf", "D0");
        add_entry(&mut controller, "D1");
        add_entry(&mut controller, "D2");
        assert_eq!(descriptions(&controller, id), vec!["D2", "D1", "D0"]);
        assert_eq!(controller.phase(), InteractionPhase::MarkerSelected(id));
    }

    #[test]
    fn test_empty_description_rejected_in_every_mode() {
        let mut controller = Controller::new();
        controller.apply_scene_intent(SceneIntent::PlaceMarker(Position::new(0.0, 1.0, 0.0)));
        controller.set_capture_title("Wrist".to_string());
        assert_eq!(controller.submit_capture(), Err(CaptureError::MissingDescription));
        assert!(controller.capture().is_some());
        assert!(controller.store().is_empty());

        controller.set_capture_description("Bruise".to_string());
        let id = controller.submit_capture().unwrap().unwrap();
        let snapshot = controller.store().clone();

        assert!(controller.open_add_entry());
        controller.set_capture_description("   ".to_string());
        assert_eq!(controller.submit_capture(), Err(CaptureError::MissingDescription));
        assert_eq!(controller.phase(), InteractionPhase::AddingEntry(id));
        assert_eq!(controller.store(), &snapshot);
    }

    #[test]
    fn test_missing_title_rejected_for_new_marker() {
        let mut controller = Controller::new();
        controller.apply_scene_intent(SceneIntent::PlaceMarker(Position::new(0.0, 1.0, 0.0)));
        controller.set_capture_description("Mole".to_string());
        assert_eq!(controller.submit_capture(), Err(CaptureError::MissingTitle));
        assert!(controller.capture().is_some());
        assert!(controller.store().is_empty());
    }

    #[test]
    fn test_cancel_capture_restores_prior_selection() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Elbow", "Scrape");
        controller.apply_scene_intent(SceneIntent::PlaceMarker(Position::new(0.2, 0.4, 0.0)));
        controller.set_capture_title("Other".to_string());
        assert!(controller.cancel_capture());
        assert_eq!(controller.phase(), InteractionPhase::MarkerSelected(id));
        assert_eq!(controller.store().len(), 1);
    }

    #[test]
    fn test_edit_entry_changes_only_description_and_image() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Thigh", "D0");
        add_entry(&mut controller, "D1");
        add_entry(&mut controller, "D2");
        let before = controller.store().find_marker(id).unwrap().entries[1].clone();

        assert!(controller.open_edit_entry(id, before.id));
        assert_eq!(controller.capture().unwrap().description, "D1");
        assert_eq!(controller.phase(), InteractionPhase::EditingEntry(id, before.id));
        controller.set_capture_description("D1 revised".to_string());
        let ticket = controller.begin_image_read().unwrap();
        assert!(controller.complete_image_read(ticket, IMAGE.to_string()));
        controller.submit_capture().unwrap();

        let after = &controller.store().find_marker(id).unwrap().entries[1];
        assert_eq!(after.id, before.id);
        assert_eq!(after.date, before.date);
        assert_eq!(after.description, "D1 revised");
        assert_eq!(after.image.as_deref(), Some(IMAGE));
        assert_eq!(descriptions(&controller, id), vec!["D2", "D1 revised", "D0"]);
    }

    #[test]
    fn test_late_image_after_cancel_is_discarded() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Foot", "Blister");
        controller.open_add_entry();
        let ticket = controller.begin_image_read().unwrap();
        controller.cancel_capture();
        assert!(!controller.complete_image_read(ticket, IMAGE.to_string()));

        controller.open_add_entry();
        assert!(!controller.complete_image_read(ticket, IMAGE.to_string()));
        assert!(controller.capture().unwrap().image.is_none());
        controller.cancel_capture();
        assert!(controller.store().find_marker(id).unwrap().image_entries().next().is_none());
    }

    #[test]
    fn test_late_image_after_submit_does_not_touch_entry() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Palm", "Cut");
        controller.open_add_entry();
        let ticket = controller.begin_image_read().unwrap();
        controller.set_capture_description("Stitched".to_string());
        controller.submit_capture().unwrap();
        assert!(!controller.complete_image_read(ticket, IMAGE.to_string()));
        assert!(controller.store().find_marker(id).unwrap().entries[0].image.is_none());
    }

    #[test]
    fn test_delete_marker_requires_confirmation() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Chin", "Acne");
        assert!(controller.request_delete_marker(id));
        assert_eq!(controller.store().len(), 1);

        assert!(controller.cancel_confirmation());
        assert_eq!(controller.store().len(), 1);
        assert_eq!(controller.selected_id(), Some(id));

        controller.request_delete_marker(id);
        assert!(controller.confirm_deletion());
        assert!(controller.store().is_empty());
        assert_eq!(controller.phase(), InteractionPhase::Idle);
    }

    #[test]
    fn test_cancel_edit_entry_leaves_store_unchanged() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Wrist", "D0");
        add_entry(&mut controller, "D1");
        let snapshot = controller.store().clone();
        let entry_id = snapshot.find_marker(id).unwrap().entries[0].id;

        assert!(controller.open_edit_entry(id, entry_id));
        controller.set_capture_description("Rewritten".to_string());
        let ticket = controller.begin_image_read().unwrap();
        assert!(controller.complete_image_read(ticket, IMAGE.to_string()));
        assert!(controller.cancel_capture());

        assert_eq!(controller.store(), &snapshot);
        assert_eq!(controller.phase(), InteractionPhase::MarkerSelected(id));
    }

    #[test]
    fn test_cancel_entry_deletion_keeps_entry() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Ankle", "D0");
        add_entry(&mut controller, "D1");
        let snapshot = controller.store().clone();
        let entry_id = snapshot.find_marker(id).unwrap().entries[1].id;

        assert!(controller.request_delete_entry(id, entry_id));
        assert!(controller.cancel_confirmation());

        assert_eq!(controller.store(), &snapshot);
        assert_eq!(descriptions(&controller, id), vec!["D1", "D0"]);
        assert_eq!(controller.phase(), InteractionPhase::MarkerSelected(id));
        assert!(!controller.modal().is_open());
    }

    #[test]
    fn test_close_modal_cancels_confirmation() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Chin", "Acne");
        controller.request_delete_marker(id);
        controller.close_modal();
        assert!(!controller.modal().is_open());
        assert_eq!(controller.store().len(), 1);
    }

    #[test]
    fn test_knee_scenario() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Left Knee", "Swelling noted");
        assert_eq!(controller.store().len(), 1);
        assert_eq!(controller.store().entry_count(), 1);

        add_entry(&mut controller, "Swelling reduced");
        assert_eq!(descriptions(&controller, id), vec!["Swelling reduced", "Swelling noted"]);

        let noted = controller.store().find_marker(id).unwrap().entries[1].id;
        controller.request_delete_entry(id, noted);
        controller.confirm_deletion();
        assert_eq!(descriptions(&controller, id), vec!["Swelling reduced"]);
        assert_eq!(controller.selected_id(), Some(id));

        let reduced = controller.store().find_marker(id).unwrap().entries[0].id;
        controller.request_delete_entry(id, reduced);
        controller.confirm_deletion();
        assert!(controller.store().is_empty());
        assert_eq!(controller.selected_id(), None);
    }

    #[test]
    fn test_only_one_modal_at_a_time() {
        let mut controller = Controller::with_welcome();
        assert!(controller.open_help());
        assert_eq!(controller.modal(), &Modal::Help);
        controller.close_modal();

        let id = place(&mut controller, "Neck", "Tight");
        assert!(controller.open_add_entry());
        assert!(!controller.open_help());
        assert!(!controller.request_delete_marker(id));
        assert!(!controller.apply_scene_intent(SceneIntent::ClearSelection));
        assert_eq!(controller.phase(), InteractionPhase::AddingEntry(id));
    }

    #[test]
    fn test_lightbox_browses_image_entries() {
        let mut controller = Controller::new();
        let id = place(&mut controller, "Arm", "No photo");
        for description in ["First photo", "Second photo"] {
            controller.open_add_entry();
            controller.set_capture_description(description.to_string());
            let ticket = controller.begin_image_read().unwrap();
            controller.complete_image_read(ticket, IMAGE.to_string());
            controller.submit_capture().unwrap();
        }
        let marker = controller.store().find_marker(id).unwrap().clone();
        let no_photo = marker.entries[2].id;
        assert!(!controller.open_lightbox(id, no_photo));

        assert!(controller.open_lightbox(id, marker.entries[1].id));
        assert_eq!(controller.lightbox().unwrap().index, 1);
        assert!(controller.lightbox_step(1));
        assert_eq!(controller.lightbox().unwrap().index, 0);
        controller.close_modal();
        assert!(controller.lightbox().is_none());
    }
}
