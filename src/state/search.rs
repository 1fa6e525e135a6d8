//! Overview search: case-insensitive substring match on titles and entry text.

use super::Marker;

/// Markers whose title or any entry description contains `query`.
/// A blank query matches everything.
pub fn filter_markers<'a>(markers: &'a [Marker], query: &str) -> Vec<&'a Marker> {
    if query.trim().is_empty() {
        return markers.iter().collect();
    }
    let needle = query.to_lowercase();
    markers
        .iter()
        .filter(|marker| matches_query(marker, &needle))
        .collect()
}

fn matches_query(marker: &Marker, needle: &str) -> bool {
    marker.title.to_lowercase().contains(needle)
        || marker
            .entries
            .iter()
            .any(|entry| entry.description.to_lowercase().contains(needle))
}
