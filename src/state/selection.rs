//! Selection state shared across the viewport and the sidebar.

use uuid::Uuid;

/// Tracks which marker, if any, is focused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    marker_id: Option<Uuid>,
}

impl Selection {
    /// Clear the selection.
    pub fn clear(&mut self) {
        self.marker_id = None;
    }

    /// Replace the selection with a single marker.
    pub fn select(&mut self, marker_id: Uuid) {
        self.marker_id = Some(marker_id);
    }

    /// Select the marker, or deselect it if it is already selected.
    pub fn toggle(&mut self, marker_id: Uuid) {
        if self.is_selected(marker_id) {
            self.clear();
        } else {
            self.select(marker_id);
        }
    }

    /// Deselect the marker if it is the selected one.
    pub fn remove(&mut self, marker_id: Uuid) {
        if self.is_selected(marker_id) {
            self.clear();
        }
    }

    /// Return the selected marker, if any.
    pub fn primary(&self) -> Option<Uuid> {
        self.marker_id
    }

    pub fn is_selected(&self, marker_id: Uuid) -> bool {
        self.marker_id == Some(marker_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_deselects() {
        let id = Uuid::new_v4();
        let mut selection = Selection::default();
        selection.toggle(id);
        assert_eq!(selection.primary(), Some(id));
        selection.toggle(id);
        assert_eq!(selection.primary(), None);
    }

    #[test]
    fn test_toggle_other_marker_switches() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut selection = Selection::default();
        selection.toggle(a);
        selection.toggle(b);
        assert_eq!(selection.primary(), Some(b));
    }

    #[test]
    fn test_remove_only_affects_selected() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut selection = Selection::default();
        selection.select(a);
        selection.remove(b);
        assert!(selection.is_selected(a));
        selection.remove(a);
        assert_eq!(selection.primary(), None);
    }
}
