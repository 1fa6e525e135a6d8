//! In-memory marker store.
//!
//! The store is exclusively owned by the controller. Every operation accepts stale
//! identifiers and treats them as no-ops so the store stays consistent.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{Entry, Marker, Position};

/// Outcome of removing an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRemoval {
    /// Marker or entry was not found; nothing changed.
    NotFound,
    /// The entry was removed and the marker still has entries.
    Removed,
    /// The entry was the marker's last one, so the marker was removed too.
    RemovedWithMarker,
}

/// All markers of the running session, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerStore {
    markers: Vec<Marker>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Total entries across all markers.
    pub fn entry_count(&self) -> usize {
        self.markers.iter().map(|m| m.entries.len()).sum()
    }

    pub fn find_marker(&self, id: Uuid) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.find_marker(id).is_some()
    }

    pub fn find_entry(&self, marker_id: Uuid, entry_id: Uuid) -> Option<&Entry> {
        self.find_marker(marker_id)
            .and_then(|m| m.find_entry(entry_id))
    }

    fn find_marker_mut(&mut self, id: Uuid) -> Option<&mut Marker> {
        self.markers.iter_mut().find(|m| m.id == id)
    }

    /// Create a marker holding `first_entry` and return it.
    pub fn create_marker(
        &mut self,
        position: Position,
        title: impl Into<String>,
        first_entry: Entry,
    ) -> &Marker {
        let marker = Marker::new(position, title, first_entry);
        debug!(marker_id = %marker.id, title = %marker.title, "created marker");
        let index = self.markers.len();
        self.markers.push(marker);
        &self.markers[index]
    }

    /// Prepend an entry to a marker's log.
    pub fn add_entry(&mut self, marker_id: Uuid, entry: Entry) -> bool {
        let Some(marker) = self.find_marker_mut(marker_id) else {
            debug!(%marker_id, "add_entry ignored for unknown marker");
            return false;
        };
        debug!(%marker_id, entry_id = %entry.id, "added entry");
        marker.entries.insert(0, entry);
        true
    }

    /// Replace an entry's description and image, keeping its id, date and position.
    pub fn update_entry(
        &mut self,
        marker_id: Uuid,
        entry_id: Uuid,
        description: impl Into<String>,
        image: Option<String>,
    ) -> bool {
        let Some(entry) = self
            .find_marker_mut(marker_id)
            .and_then(|m| m.entries.iter_mut().find(|e| e.id == entry_id))
        else {
            debug!(%marker_id, %entry_id, "update_entry ignored for unknown entry");
            return false;
        };
        entry.description = description.into();
        entry.image = image;
        debug!(%marker_id, %entry_id, "updated entry");
        true
    }

    /// Remove an entry. Removing the last entry removes the marker as well.
    pub fn delete_entry(&mut self, marker_id: Uuid, entry_id: Uuid) -> EntryRemoval {
        let Some(marker) = self.find_marker_mut(marker_id) else {
            return EntryRemoval::NotFound;
        };
        let before = marker.entries.len();
        marker.entries.retain(|e| e.id != entry_id);
        if marker.entries.len() == before {
            return EntryRemoval::NotFound;
        }
        debug!(%marker_id, %entry_id, "deleted entry");
        if marker.entries.is_empty() {
            self.markers.retain(|m| m.id != marker_id);
            debug!(%marker_id, "deleted marker with its last entry");
            return EntryRemoval::RemovedWithMarker;
        }
        EntryRemoval::Removed
    }

    /// Remove a marker and all of its entries.
    pub fn delete_marker(&mut self, marker_id: Uuid) -> bool {
        let len = self.markers.len();
        self.markers.retain(|m| m.id != marker_id);
        let removed = self.markers.len() < len;
        if removed {
            debug!(%marker_id, "deleted marker");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptions(store: &MarkerStore, marker_id: Uuid) -> Vec<String> {
        store
            .find_marker(marker_id)
            .unwrap()
            .entries
            .iter()
            .map(|e| e.description.clone())
            .collect()
    }

    #[test]
    fn test_create_marker() {
        let mut store = MarkerStore::new();
        let position = Position::new(0.1, 1.2, 0.05);
        let marker = store.create_marker(position, "Left Knee", Entry::new("Swelling noted", None));
        assert_eq!(marker.position, position);
        assert_eq!(marker.title, "Left Knee");
        assert_eq!(marker.entries.len(), 1);
        assert_eq!(marker.entries[0].description, "Swelling noted");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_entry_prepends() {
        let mut store = MarkerStore::new();
        let id = store
            .create_marker(Position::new(0.0, 1.0, 0.0), "Elbow", Entry::new("D0", None))
            .id;
        assert!(store.add_entry(id, Entry::new("D1", None)));
        assert!(store.add_entry(id, Entry::new("D2", None)));
        assert_eq!(descriptions(&store, id), vec!["D2", "D1", "D0"]);
    }

    #[test]
    fn test_add_entry_unknown_marker_is_noop() {
        let mut store = MarkerStore::new();
        store.create_marker(Position::new(0.0, 1.0, 0.0), "Elbow", Entry::new("D0", None));
        let snapshot = store.clone();
        assert!(!store.add_entry(Uuid::new_v4(), Entry::new("D1", None)));
        assert_eq!(store, snapshot);
    }

    #[test]
    fn test_update_entry_keeps_identity_and_order() {
        let mut store = MarkerStore::new();
        let id = store
            .create_marker(Position::new(0.0, 1.0, 0.0), "Shin", Entry::new("D0", None))
            .id;
        store.add_entry(id, Entry::new("D1", None));
        store.add_entry(id, Entry::new("D2", None));
        let target = store.find_marker(id).unwrap().entries[1].clone();

        let image = Some("data:image/png;base64,AAAA".to_string());
        assert!(store.update_entry(id, target.id, "D1 edited", image.clone()));

        let marker = store.find_marker(id).unwrap();
        let edited = &marker.entries[1];
        assert_eq!(edited.id, target.id);
        assert_eq!(edited.date, target.date);
        assert_eq!(edited.description, "D1 edited");
        assert_eq!(edited.image, image);
        assert_eq!(marker.entries[0].description, "D2");
        assert_eq!(marker.entries[2].description, "D0");
    }

    #[test]
    fn test_update_unknown_entry_is_noop() {
        let mut store = MarkerStore::new();
        let id = store
            .create_marker(Position::new(0.0, 1.0, 0.0), "Shin", Entry::new("D0", None))
            .id;
        let snapshot = store.clone();
        assert!(!store.update_entry(id, Uuid::new_v4(), "x", None));
        assert!(!store.update_entry(Uuid::new_v4(), Uuid::new_v4(), "x", None));
        assert_eq!(store, snapshot);
    }

    #[test]
    fn test_delete_only_entry_removes_marker() {
        let mut store = MarkerStore::new();
        let marker = store
            .create_marker(Position::new(0.0, 1.0, 0.0), "Neck", Entry::new("D0", None))
            .clone();
        let removal = store.delete_entry(marker.id, marker.entries[0].id);
        assert_eq!(removal, EntryRemoval::RemovedWithMarker);
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_one_of_several_entries() {
        let mut store = MarkerStore::new();
        let id = store
            .create_marker(Position::new(0.0, 1.0, 0.0), "Back", Entry::new("D0", None))
            .id;
        store.add_entry(id, Entry::new("D1", None));
        store.add_entry(id, Entry::new("D2", None));
        let middle = store.find_marker(id).unwrap().entries[1].id;

        assert_eq!(store.delete_entry(id, middle), EntryRemoval::Removed);
        assert_eq!(descriptions(&store, id), vec!["D2", "D0"]);
    }

    #[test]
    fn test_delete_unknown_entry_is_noop() {
        let mut store = MarkerStore::new();
        let id = store
            .create_marker(Position::new(0.0, 1.0, 0.0), "Back", Entry::new("D0", None))
            .id;
        assert_eq!(store.delete_entry(id, Uuid::new_v4()), EntryRemoval::NotFound);
        assert_eq!(store.delete_entry(Uuid::new_v4(), Uuid::new_v4()), EntryRemoval::NotFound);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_marker() {
        let mut store = MarkerStore::new();
        let keep = store
            .create_marker(Position::new(0.0, 1.0, 0.0), "A", Entry::new("a", None))
            .id;
        let drop = store
            .create_marker(Position::new(0.0, 1.5, 0.0), "B", Entry::new("b", None))
            .id;
        store.add_entry(drop, Entry::new("b2", None));

        assert!(store.delete_marker(drop));
        assert!(!store.delete_marker(drop));
        assert_eq!(store.len(), 1);
        assert!(store.contains(keep));
        assert_eq!(store.entry_count(), 1);
    }

    #[test]
    fn test_knee_scenario() {
        let mut store = MarkerStore::new();
        let id = store
            .create_marker(
                Position::new(0.1, 1.2, 0.05),
                "Left Knee",
                Entry::new("Swelling noted", None),
            )
            .id;
        assert_eq!((store.len(), store.entry_count()), (1, 1));

        store.add_entry(id, Entry::new("Swelling reduced", None));
        assert_eq!(descriptions(&store, id), vec!["Swelling reduced", "Swelling noted"]);

        let noted = store.find_marker(id).unwrap().entries[1].id;
        assert_eq!(store.delete_entry(id, noted), EntryRemoval::Removed);
        assert_eq!(descriptions(&store, id), vec!["Swelling reduced"]);

        let reduced = store.find_marker(id).unwrap().entries[0].id;
        assert_eq!(store.delete_entry(id, reduced), EntryRemoval::RemovedWithMarker);
        assert!(store.is_empty());
    }
}
