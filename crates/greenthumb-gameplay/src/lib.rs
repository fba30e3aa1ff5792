//! # Greenthumb Gameplay
//!
//! The watering simulation for Greenthumb.
//!
//! This crate provides every component of a watering session:
//! - Tilt-based pour detection and the fluid stream lifecycle
//! - The can's fluid and contact-driven refilling
//! - Pour area detection against a spatial query seam
//! - Plant growth through timed stages, with progress bars and popups
//! - The can's own pour gauge
//! - The one-shot all-grown notification
//! - Signals and an event bus for observers
//! - The `Garden` session that ticks everything in order

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod completion;
pub mod config;
pub mod detector;
pub mod events;
pub mod garden;
pub mod growth;
pub mod popup;
pub mod pour;
pub mod progress;
pub mod refill;
pub mod registry;
pub mod spatial;
pub mod timer;
pub mod vessel;
pub mod view;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::completion::*;
    pub use crate::config::*;
    pub use crate::detector::*;
    pub use crate::events::*;
    pub use crate::garden::*;
    pub use crate::growth::*;
    pub use crate::popup::*;
    pub use crate::pour::*;
    pub use crate::progress::*;
    pub use crate::refill::*;
    pub use crate::registry::*;
    pub use crate::spatial::*;
    pub use crate::timer::*;
    pub use crate::vessel::*;
    pub use crate::view::*;
}

pub use prelude::*;
