//! Contact-driven refilling of the can.

use tracing::{debug, trace};

use greenthumb_common::{tags, ConfigError, Tag};

use crate::events::Signal;
use crate::vessel::Vessel;

/// Default seconds between refilled units.
pub const DEFAULT_REFILL_RATE: f32 = 0.5;

/// Adds fluid to a vessel while it stays in contact with a source.
///
/// At most one unit is added per `refill_rate` seconds no matter how many
/// contacts are reported in between. The next eligible time is pushed back
/// even when the vessel is already full.
#[derive(Debug)]
pub struct FluidRefillStation {
    /// Seconds per unit
    refill_rate: f32,
    /// Absolute time at which the next unit may be added
    next_refill_time: f64,
    /// Tag of the colliders that count as a source
    source_tag: Tag,
    refilled: Signal<u32>,
}

impl FluidRefillStation {
    /// Creates a station. The first contact at or after `start_time` refills
    /// immediately.
    pub fn new(refill_rate: f32, start_time: f64, source_tag: Tag) -> Result<Self, ConfigError> {
        if refill_rate <= 0.0 {
            return Err(ConfigError::NonPositiveRate {
                name: "refill_rate",
                value: refill_rate,
            });
        }
        Ok(Self {
            refill_rate,
            next_refill_time: start_time,
            source_tag,
            refilled: Signal::new(),
        })
    }

    /// Creates a station that refills from pots.
    pub fn from_pots(refill_rate: f32, start_time: f64) -> Result<Self, ConfigError> {
        Self::new(refill_rate, start_time, Tag::new(tags::POT))
    }

    /// Seconds per unit.
    #[must_use]
    pub const fn refill_rate(&self) -> f32 {
        self.refill_rate
    }

    /// Absolute time of the next eligible refill.
    #[must_use]
    pub const fn next_refill_time(&self) -> f64 {
        self.next_refill_time
    }

    /// Tag that counts as a source.
    #[must_use]
    pub fn source_tag(&self) -> &Tag {
        &self.source_tag
    }

    /// Fires with the new unit count after each refilled unit.
    pub fn on_refilled(&mut self) -> &mut Signal<u32> {
        &mut self.refilled
    }

    /// Handles one persistent-contact report. Returns true if a unit was
    /// added.
    pub fn on_contact_stay(&mut self, now: f64, other: &Tag, vessel: &mut Vessel) -> bool {
        if *other != self.source_tag || now < self.next_refill_time {
            return false;
        }

        self.next_refill_time = now + f64::from(self.refill_rate);
        if vessel.add_unit() {
            let units = vessel.current_units();
            debug!("Refilled 1 unit, now {}", units);
            self.refilled.emit(&units);
            true
        } else {
            trace!("Vessel already full");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pot() -> Tag {
        Tag::new(tags::POT)
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        assert!(FluidRefillStation::from_pots(0.0, 0.0).is_err());
    }

    #[test]
    fn test_continuous_contact_caps_at_capacity() {
        let mut station = FluidRefillStation::from_pots(0.5, 0.0).expect("valid rate");
        let mut vessel = Vessel::new(5, 0).expect("capacity");

        let dt = 1.0 / 60.0;
        let mut added = 0;
        let mut now = 0.0;
        while now < 3.0 {
            if station.on_contact_stay(now, &pot(), &mut vessel) {
                added += 1;
            }
            now += dt;
        }

        assert_eq!(added, 5);
        assert_eq!(vessel.current_units(), 5);
    }

    #[test]
    fn test_one_unit_per_interval_with_many_contacts() {
        let mut station = FluidRefillStation::from_pots(0.5, 0.0).expect("valid rate");
        let mut vessel = Vessel::new(10, 0).expect("capacity");

        // Three simultaneous contacts on the same tick
        for _ in 0..3 {
            station.on_contact_stay(0.0, &pot(), &mut vessel);
        }
        assert_eq!(vessel.current_units(), 1);

        station.on_contact_stay(0.4, &pot(), &mut vessel);
        assert_eq!(vessel.current_units(), 1);

        station.on_contact_stay(0.5, &pot(), &mut vessel);
        assert_eq!(vessel.current_units(), 2);
    }

    #[test]
    fn test_full_vessel_still_advances_timestamp() {
        let mut station = FluidRefillStation::from_pots(0.5, 0.0).expect("valid rate");
        let mut vessel = Vessel::full(1).expect("capacity");

        assert!(!station.on_contact_stay(1.0, &pot(), &mut vessel));
        assert!((station.next_refill_time() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_ignores_other_tags() {
        let mut station = FluidRefillStation::from_pots(0.5, 0.0).expect("valid rate");
        let mut vessel = Vessel::new(5, 0).expect("capacity");

        assert!(!station.on_contact_stay(0.0, &Tag::new("Rock"), &mut vessel));
        assert_eq!(vessel.current_units(), 0);
        assert!(station.next_refill_time().abs() < 1e-9);
    }

    #[test]
    fn test_refilled_signal_reports_level() {
        let mut station = FluidRefillStation::from_pots(0.5, 0.0).expect("valid rate");
        let mut vessel = Vessel::new(5, 2).expect("capacity");
        let levels = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = std::rc::Rc::clone(&levels);
        station
            .on_refilled()
            .connect(move |units: &u32| sink.borrow_mut().push(*units));

        station.on_contact_stay(0.0, &pot(), &mut vessel);
        station.on_contact_stay(0.5, &pot(), &mut vessel);
        assert_eq!(*levels.borrow(), vec![3, 4]);
    }
}
