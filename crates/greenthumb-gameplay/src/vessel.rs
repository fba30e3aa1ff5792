//! Fluid held by the watering can.

use serde::{Deserialize, Serialize};

use greenthumb_common::ConfigError;

/// The can's fluid level, in whole units.
///
/// `current_units` never exceeds `total_units`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vessel {
    /// Units currently held
    current_units: u32,
    /// Capacity
    total_units: u32,
    /// Seconds of pouring per unit consumed (0 = pouring is free)
    drain_interval: f32,
    /// Pouring time not yet charged against the level
    drain_elapsed: f32,
}

impl Vessel {
    /// Creates a vessel. `initial_units` is clamped to capacity.
    pub fn new(total_units: u32, initial_units: u32) -> Result<Self, ConfigError> {
        if total_units == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            current_units: initial_units.min(total_units),
            total_units,
            drain_interval: 0.0,
            drain_elapsed: 0.0,
        })
    }

    /// Creates a full vessel.
    pub fn full(total_units: u32) -> Result<Self, ConfigError> {
        Self::new(total_units, total_units)
    }

    /// Charges one unit per `interval` seconds of pouring.
    #[must_use]
    pub fn with_drain_interval(mut self, interval: f32) -> Self {
        self.drain_interval = interval.max(0.0);
        self
    }

    /// Units currently held.
    #[must_use]
    pub const fn current_units(&self) -> u32 {
        self.current_units
    }

    /// Capacity in units.
    #[must_use]
    pub const fn total_units(&self) -> u32 {
        self.total_units
    }

    /// Whether there is anything to pour.
    #[must_use]
    pub const fn has_fluid(&self) -> bool {
        self.current_units > 0
    }

    /// Whether the vessel is at capacity.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.current_units >= self.total_units
    }

    /// Fill level as a fraction of capacity.
    #[must_use]
    pub fn fill_fraction(&self) -> f32 {
        self.current_units as f32 / self.total_units as f32
    }

    /// Adds one unit. Returns false if already full.
    pub fn add_unit(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.current_units += 1;
        true
    }

    /// Charges `dt` seconds of pouring. Returns the units consumed.
    pub fn drain(&mut self, dt: f32) -> u32 {
        if self.drain_interval <= 0.0 || !self.has_fluid() {
            return 0;
        }
        self.drain_elapsed += dt;
        let mut consumed = 0;
        while self.drain_elapsed >= self.drain_interval && self.current_units > 0 {
            self.drain_elapsed -= self.drain_interval;
            self.current_units -= 1;
            consumed += 1;
        }
        if self.current_units == 0 {
            self.drain_elapsed = 0.0;
        }
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(Vessel::new(0, 0).err(), Some(ConfigError::ZeroCapacity));
    }

    #[test]
    fn test_initial_clamped_to_capacity() {
        let vessel = Vessel::new(5, 9).expect("valid capacity");
        assert_eq!(vessel.current_units(), 5);
        assert!(vessel.is_full());
    }

    #[test]
    fn test_add_unit_caps() {
        let mut vessel = Vessel::new(2, 1).expect("valid capacity");
        assert!(vessel.add_unit());
        assert!(!vessel.add_unit());
        assert_eq!(vessel.current_units(), 2);
    }

    #[test]
    fn test_drain_disabled_by_default() {
        let mut vessel = Vessel::full(3).expect("valid capacity");
        assert_eq!(vessel.drain(100.0), 0);
        assert_eq!(vessel.current_units(), 3);
    }

    #[test]
    fn test_drain_stops_at_empty() {
        let mut vessel = Vessel::full(3)
            .expect("valid capacity")
            .with_drain_interval(1.0);
        assert_eq!(vessel.drain(0.5), 0);
        assert_eq!(vessel.drain(0.5), 1);
        assert_eq!(vessel.drain(10.0), 2);
        assert!(!vessel.has_fluid());
        assert_eq!(vessel.drain(10.0), 0);
    }
}
