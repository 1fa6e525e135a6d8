//! Capture form state: the draft behind the "new marker" / "add entry" / "edit entry" modal.

use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use uuid::Uuid;

use super::Position;

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// What a submitted capture form will do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureMode {
    /// Create a marker at the captured surface point.
    NewMarker { position: Position },
    /// Prepend an entry to an existing marker.
    AddEntry { marker_id: Uuid },
    /// Replace an existing entry's description and image.
    EditEntry { marker_id: Uuid, entry_id: Uuid },
}

/// Rejected submission. The form stays open and nothing is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("a title is required for a new marker")]
    MissingTitle,
    #[error("a description is required")]
    MissingDescription,
}

/// Validated, trimmed form contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCapture {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

/// Handle for one asynchronous image read. Only the latest ticket of a still-open form
/// session may write its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTicket {
    session: u64,
    request: u64,
}

/// Draft contents of the capture modal.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureForm {
    pub mode: CaptureMode,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    session: u64,
    next_request: u64,
    pending_image: Option<u64>,
}

impl CaptureForm {
    /// Empty form for the given mode.
    pub fn new(mode: CaptureMode) -> Self {
        Self {
            mode,
            title: String::new(),
            description: String::new(),
            image: None,
            session: NEXT_SESSION.fetch_add(1, Ordering::Relaxed),
            next_request: 0,
            pending_image: None,
        }
    }

    /// Form pre-populated with an entry's current contents.
    pub fn editing(
        marker_id: Uuid,
        entry_id: Uuid,
        description: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        let mut form = Self::new(CaptureMode::EditEntry { marker_id, entry_id });
        form.description = description.into();
        form.image = image;
        form
    }

    /// Only new markers carry a title.
    pub fn requires_title(&self) -> bool {
        matches!(self.mode, CaptureMode::NewMarker { .. })
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            CaptureMode::NewMarker { .. } => "Capture New Marker",
            CaptureMode::AddEntry { .. } => "New Timeline Entry",
            CaptureMode::EditEntry { .. } => "Edit Timeline Entry",
        }
    }

    pub fn is_image_loading(&self) -> bool {
        self.pending_image.is_some()
    }

    /// Start an image read, superseding any read already in flight.
    pub fn begin_image_read(&mut self) -> ImageTicket {
        let request = self.next_request;
        self.next_request += 1;
        self.pending_image = Some(request);
        ImageTicket {
            session: self.session,
            request,
        }
    }

    /// Apply a finished image read. Returns `false` when the ticket is stale.
    pub fn complete_image_read(&mut self, ticket: ImageTicket, data_uri: String) -> bool {
        if !self.owns(ticket) {
            return false;
        }
        self.pending_image = None;
        self.image = Some(data_uri);
        true
    }

    /// Forget a failed image read, leaving the current image untouched.
    pub fn fail_image_read(&mut self, ticket: ImageTicket) -> bool {
        if !self.owns(ticket) {
            return false;
        }
        self.pending_image = None;
        true
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        self.pending_image = None;
    }

    fn owns(&self, ticket: ImageTicket) -> bool {
        ticket.session == self.session && self.pending_image == Some(ticket.request)
    }

    /// Check required fields. Title matters only for new markers.
    pub fn validate(&self) -> Result<ValidCapture, CaptureError> {
        let title = self.title.trim();
        if self.requires_title() && title.is_empty() {
            return Err(CaptureError::MissingTitle);
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(CaptureError::MissingDescription);
        }
        Ok(ValidCapture {
            title: title.to_string(),
            description: description.to_string(),
            image: self.image.clone(),
        })
    }
}
