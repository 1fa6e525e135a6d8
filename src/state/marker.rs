use chrono::{DateTime, Local, Utc};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::generate_id;

/// A point on the body model in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position(pub [f32; 3]);

impl Position {
    #[cfg(test)]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self([x, y, z])
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::from_array(self.0)
    }
}

impl From<Vec3> for Position {
    fn from(value: Vec3) -> Self {
        Self(value.to_array())
    }
}

/// One observation in a marker's log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// Unique identifier
    pub id: Uuid,
    /// Local calendar date at creation, already formatted for display
    pub date: String,
    /// Free-text observation
    pub description: String,
    /// Optional inline image (`data:` URI)
    pub image: Option<String>,
}

impl Entry {
    /// Create an entry dated today.
    pub fn new(description: impl Into<String>, image: Option<String>) -> Self {
        Self {
            id: generate_id(),
            date: display_date(Local::now()),
            description: description.into(),
            image,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// A labeled point on the body with its observation log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    /// Unique identifier
    pub id: Uuid,
    /// Display title (e.g., "Left Knee")
    pub title: String,
    /// World-space position on the body surface
    pub position: Position,
    /// Entries, newest first. Never empty while the marker exists.
    pub entries: Vec<Entry>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Marker {
    /// Create a marker holding a single entry.
    pub fn new(position: Position, title: impl Into<String>, first_entry: Entry) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            position,
            entries: vec![first_entry],
            created_at: Utc::now(),
        }
    }

    /// The most recent entry.
    pub fn latest_entry(&self) -> Option<&Entry> {
        self.entries.first()
    }

    pub fn find_entry(&self, entry_id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    /// Entries carrying an image, in timeline order.
    pub fn image_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.has_image())
    }
}

/// Format a timestamp as `M/D/YYYY`.
pub fn display_date(at: DateTime<Local>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_date_has_no_padding() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(display_date(at), "3/7/2024");
    }

    #[test]
    fn test_marker_starts_with_one_entry() {
        let marker = Marker::new(
            Position::new(0.1, 1.2, 0.05),
            "Left Knee",
            Entry::new("Swelling noted", None),
        );
        assert_eq!(marker.entries.len(), 1);
        assert_eq!(marker.latest_entry().unwrap().description, "Swelling noted");
    }

    #[test]
    fn test_position_serializes_as_array() {
        let json = serde_json::to_string(&Position::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0]");
    }

    #[test]
    fn test_marker_serialization() {
        let marker = Marker::new(
            Position::new(0.0, 1.0, 0.0),
            "Wrist",
            Entry::new("Bruise", Some("data:image/png;base64,AAAA".to_string())),
        );
        let json = serde_json::to_string_pretty(&marker).unwrap();
        let parsed: Marker = serde_json::from_str(&json).unwrap();
        assert_eq!(marker, parsed);
    }
}
