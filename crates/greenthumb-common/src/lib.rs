//! # Greenthumb Common
//!
//! Common types, utilities, and shared abstractions for the Greenthumb
//! watering simulation.
//!
//! This crate provides foundational types used across the workspace:
//! - ID types (EntityId) and query filters (Tag, LayerMask)
//! - Poses and oriented boxes in world space
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod geometry;
pub mod ids;

pub use glam;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::geometry::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_generation() {
        let id1 = EntityId::new();
        let id2 = EntityId::new();
        assert_ne!(id1, id2);
        assert!(id1.is_valid());
        assert!(!EntityId::NULL.is_valid());
    }

    #[test]
    fn test_pose_up_of_identity_is_world_up() {
        let pose = Pose::IDENTITY;
        assert!((pose.up() - WORLD_UP).length() < f32::EPSILON);
    }
}
