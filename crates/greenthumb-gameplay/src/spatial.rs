//! Overlap queries against the scene's colliders.
//!
//! The physics engine is a collaborator. [`SpatialQuery`] is the narrow
//! interface the pour detector needs from it, and [`SphereSpace`] is a
//! small in-memory implementation for headless runs and tests.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use greenthumb_common::{EntityId, LayerMask, OrientedBox, Tag};

/// Default number of overlap results kept per query.
pub const DEFAULT_HIT_CAPACITY: usize = 10;

/// One collider returned by an overlap query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColliderHit {
    /// Entity the collider belongs to
    pub entity: EntityId,
    /// Collider tag
    pub tag: Tag,
}

/// Fixed-capacity result buffer for overlap queries.
///
/// Pushing past capacity drops the hit and marks the buffer as overflowed.
#[derive(Debug, Clone)]
pub struct HitBuffer {
    hits: Vec<ColliderHit>,
    capacity: usize,
    overflowed: bool,
}

impl HitBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            hits: Vec::with_capacity(capacity),
            capacity,
            overflowed: false,
        }
    }

    /// Empties the buffer for reuse.
    pub fn clear(&mut self) {
        self.hits.clear();
        self.overflowed = false;
    }

    /// Adds a hit. Returns false if the buffer was full.
    pub fn push(&mut self, hit: ColliderHit) -> bool {
        if self.hits.len() >= self.capacity {
            self.overflowed = true;
            return false;
        }
        self.hits.push(hit);
        true
    }

    /// Hits collected so far.
    #[must_use]
    pub fn hits(&self) -> &[ColliderHit] {
        &self.hits
    }

    /// Number of hits collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Checks if no hits were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Maximum number of hits kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether any hit was dropped since the last clear.
    #[must_use]
    pub const fn overflowed(&self) -> bool {
        self.overflowed
    }
}

impl Default for HitBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_CAPACITY)
    }
}

/// Overlap query interface provided by the physics layer.
pub trait SpatialQuery {
    /// Collects colliders on `layers` overlapping `region` into `results`.
    ///
    /// No ordering is guaranteed among the results.
    fn overlap_box(&self, region: &OrientedBox, layers: LayerMask, results: &mut HitBuffer);
}

/// A sphere-shaped collider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereCollider {
    /// Owning entity
    pub entity: EntityId,
    /// Tag text
    pub tag: String,
    /// Layer index (0-31)
    pub layer: u32,
    /// World-space center
    pub center: Vec3,
    /// Radius
    pub radius: f32,
}

/// In-memory set of sphere colliders.
#[derive(Debug, Default)]
pub struct SphereSpace {
    colliders: Vec<SphereCollider>,
}

impl SphereSpace {
    /// Creates an empty space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collider.
    pub fn insert(&mut self, collider: SphereCollider) {
        self.colliders.push(collider);
    }

    /// Adds a collider from its parts.
    pub fn add(&mut self, entity: EntityId, tag: &str, layer: u32, center: Vec3, radius: f32) {
        self.insert(SphereCollider {
            entity,
            tag: tag.to_string(),
            layer,
            center,
            radius,
        });
    }

    /// Moves every collider of an entity. Returns false if none exist.
    pub fn move_to(&mut self, entity: EntityId, center: Vec3) -> bool {
        let mut moved = false;
        for collider in self.colliders.iter_mut().filter(|c| c.entity == entity) {
            collider.center = center;
            moved = true;
        }
        moved
    }

    /// Removes every collider of an entity.
    pub fn remove(&mut self, entity: EntityId) {
        self.colliders.retain(|c| c.entity != entity);
    }

    /// Number of colliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Checks if the space has no colliders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl SpatialQuery for SphereSpace {
    fn overlap_box(&self, region: &OrientedBox, layers: LayerMask, results: &mut HitBuffer) {
        for collider in &self.colliders {
            if !layers.contains_layer(collider.layer) {
                continue;
            }
            if region.intersects_sphere(collider.center, collider.radius) {
                results.push(ColliderHit {
                    entity: collider.entity,
                    tag: Tag::new(&collider.tag),
                });
            }
        }
    }
}
