//! Finds the plants under the pour stream.
//!
//! Each tick while the can pours, the detector places its box under the
//! spout, asks the physics layer what overlaps it, and turns the difference
//! between this tick's set and the last one into start / continue / stop
//! calls on the plants. When pouring ends every tracked plant is stopped.
//!
//! Plants only receive water while the can holds fluid.

use ahash::AHashSet;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{error, trace, warn};

use greenthumb_common::{EntityId, LayerMask, OrientedBox, Pose, Tag};

use crate::pour::PourAngleSensor;
use crate::registry::TargetRegistry;
use crate::spatial::{HitBuffer, SpatialQuery};

/// The detection box in the detector's local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionRegion {
    /// Box center
    pub center: Vec3,
    /// Box size
    pub size: Vec3,
    /// Extra offset added to the center
    pub offset: Vec3,
}

impl Default for DetectionRegion {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            size: Vec3::ONE,
            offset: Vec3::ZERO,
        }
    }
}

impl DetectionRegion {
    /// Places the box in world space under a pose.
    #[must_use]
    pub fn to_world(&self, pose: &Pose) -> OrientedBox {
        OrientedBox::from_local(pose, self.center + self.offset, self.size)
    }
}

/// Tracks which plants are being watered.
#[derive(Debug)]
pub struct PourAreaDetector {
    region: Option<DetectionRegion>,
    receiver_tag: Tag,
    layers: LayerMask,
    buffer: HitBuffer,
    tracked: AHashSet<EntityId>,
    was_pouring: bool,
    truncated_ticks: u64,
}

impl PourAreaDetector {
    /// Creates a detector.
    ///
    /// Without a region the detector disables itself and every tick is a
    /// no-op.
    #[must_use]
    pub fn new(
        region: Option<DetectionRegion>,
        receiver_tag: Tag,
        layers: LayerMask,
        capacity: usize,
    ) -> Self {
        if region.is_none() {
            error!("Pour area detector has no detection region; detector disabled");
        }
        Self {
            region,
            receiver_tag,
            layers,
            buffer: HitBuffer::new(capacity),
            tracked: AHashSet::new(),
            was_pouring: false,
            truncated_ticks: 0,
        }
    }

    /// Whether the detector runs.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.region.is_some()
    }

    /// The local detection box.
    #[must_use]
    pub const fn region(&self) -> Option<&DetectionRegion> {
        self.region.as_ref()
    }

    /// The detection box in world space under a pose.
    #[must_use]
    pub fn world_region(&self, pose: &Pose) -> Option<OrientedBox> {
        self.region.map(|r| r.to_world(pose))
    }

    /// Whether a plant is currently under the stream.
    #[must_use]
    pub fn is_tracking(&self, id: EntityId) -> bool {
        self.tracked.contains(&id)
    }

    /// Number of plants under the stream.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Ticks on which overlap results were cut off at capacity.
    #[must_use]
    pub const fn truncated_ticks(&self) -> u64 {
        self.truncated_ticks
    }

    /// Runs one detection pass.
    ///
    /// `pose` is the detector's world pose; the pouring flag and fluid level
    /// are read from `sensor` on every call.
    pub fn tick(
        &mut self,
        dt: f32,
        sensor: &PourAngleSensor,
        pose: &Pose,
        spatial: &dyn SpatialQuery,
        targets: &mut TargetRegistry,
    ) {
        let Some(region) = self.region else {
            return;
        };
        let pouring = sensor.is_pouring();

        if !pouring && self.was_pouring {
            for id in self.tracked.drain() {
                if let Some(target) = targets.get_mut(id) {
                    target.stop_pouring();
                }
            }
            self.was_pouring = false;
            return;
        }

        if pouring {
            let world = region.to_world(pose);
            self.buffer.clear();
            spatial.overlap_box(&world, self.layers, &mut self.buffer);

            if self.buffer.overflowed() {
                if self.truncated_ticks == 0 {
                    warn!(
                        "Pour detection found more than {} colliders; extra results dropped",
                        self.buffer.capacity()
                    );
                }
                self.truncated_ticks += 1;
            }

            let has_fluid = sensor.vessel().has_fluid();
            let mut detected = AHashSet::with_capacity(self.buffer.len());

            for hit in self.buffer.hits() {
                if hit.tag != self.receiver_tag || !has_fluid {
                    continue;
                }
                let Some(target) = targets.get_mut(hit.entity) else {
                    continue;
                };
                // A plant with several colliders is watered once per tick
                if !detected.insert(hit.entity) {
                    continue;
                }
                if !self.tracked.contains(&hit.entity) {
                    target.start_pouring();
                }
                target.continue_pouring(dt);
            }

            for id in &self.tracked {
                if detected.contains(id) {
                    continue;
                }
                trace!("Target {:?} left the stream", id);
                if let Some(target) = targets.get_mut(*id) {
                    target.stop_pouring();
                }
            }

            self.tracked = detected;
        }

        self.was_pouring = pouring;
    }
}
