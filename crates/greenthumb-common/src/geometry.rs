//! Poses and oriented volumes in world space.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World up direction.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Position, orientation and scale of an object in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World position
    pub position: Vec3,
    /// World orientation
    pub rotation: Quat,
    /// Lossy world scale
    pub scale: Vec3,
}

impl Pose {
    /// Identity pose at the origin.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Creates an unscaled pose.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Creates an unrotated, unscaled pose at a position.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Returns a copy with a different scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local up axis in world space.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Transforms a point from local space into world space.
    #[must_use]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * (self.scale * local)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Angle between two directions in degrees, in `[0, 180]`.
///
/// Returns 0 if either direction has zero length.
#[must_use]
pub fn angle_between_degrees(a: Vec3, b: Vec3) -> f32 {
    if a.length_squared() <= f32::EPSILON || b.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    a.angle_between(b).to_degrees()
}

/// A box with arbitrary orientation in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    /// World-space center
    pub center: Vec3,
    /// Half of the size along each local axis
    pub half_extents: Vec3,
    /// World orientation
    pub rotation: Quat,
}

impl OrientedBox {
    /// Creates an oriented box.
    #[must_use]
    pub fn new(center: Vec3, half_extents: Vec3, rotation: Quat) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
            rotation,
        }
    }

    /// Places a box given in an object's local space into world space.
    ///
    /// The local center is transformed by the full pose and the size is
    /// scaled by the pose's lossy scale.
    #[must_use]
    pub fn from_local(pose: &Pose, local_center: Vec3, local_size: Vec3) -> Self {
        Self::new(
            pose.transform_point(local_center),
            (pose.scale * local_size) * 0.5,
            pose.rotation,
        )
    }

    /// Full size along each local axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    /// Converts a world point into the box's local frame.
    #[must_use]
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.center)
    }

    /// Checks if a world point lies inside the box (boundary inclusive).
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        let local = self.to_local(point).abs();
        local.cmple(self.half_extents).all()
    }

    /// Closest point on or in the box to a world point.
    #[must_use]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let local = self
            .to_local(point)
            .clamp(-self.half_extents, self.half_extents);
        self.center + self.rotation * local
    }

    /// Checks if a sphere overlaps the box.
    #[must_use]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) <= radius * radius
    }
}
