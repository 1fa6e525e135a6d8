//! State management module
//!
//! This module contains the core data structures and interaction logic:
//! - Marker / Entry: positioned annotations and their observation logs
//! - MarkerStore: the in-memory entity store
//! - Selection, Modal, CaptureForm: interaction state
//! - Controller: the single owner and mutator of all of the above
//! - Preferences: persisted user preferences

mod ids;
mod marker;
mod store;
mod selection;
mod capture;
mod interaction;
mod controller;
mod preferences;
pub mod search;

pub use ids::generate_id;
pub use marker::*;
pub use store::*;
pub use selection::*;
pub use capture::*;
pub use interaction::*;
pub use controller::*;
pub use preferences::*;
