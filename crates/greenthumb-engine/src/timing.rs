//! Fixed-timestep clock.
//!
//! Host frames arrive with whatever duration they have; the garden always
//! advances in equal ticks. Leftover time carries into the next frame.

use tracing::warn;

/// Converts variable frame durations into a count of fixed ticks.
#[derive(Debug, Clone)]
pub struct FixedStep {
    /// Seconds per tick
    fixed_dt: f32,
    /// Unconsumed frame time
    accumulator: f32,
    /// Most ticks produced by one frame
    max_updates: u32,
    /// Ticks produced so far
    total_updates: u64,
    /// Seconds thrown away after falling behind
    dropped: f32,
}

impl FixedStep {
    /// Creates a clock. `fixed_dt` has a floor of 1 ms.
    #[must_use]
    pub fn new(fixed_dt: f32, max_updates: u32) -> Self {
        Self {
            fixed_dt: fixed_dt.max(0.001),
            accumulator: 0.0,
            max_updates: max_updates.max(1),
            total_updates: 0,
            dropped: 0.0,
        }
    }

    /// Seconds per tick.
    #[must_use]
    pub const fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Ticks produced so far.
    #[must_use]
    pub const fn total_updates(&self) -> u64 {
        self.total_updates
    }

    /// Seconds discarded because a frame needed more than the tick cap.
    #[must_use]
    pub const fn dropped(&self) -> f32 {
        self.dropped
    }

    /// Fraction of a tick left over, for interpolation.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.fixed_dt
    }

    /// Accumulates a frame's duration.
    /// Returns the number of fixed ticks that should be run.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);
        let mut count = 0;

        while self.accumulator >= self.fixed_dt && count < self.max_updates {
            self.accumulator -= self.fixed_dt;
            count += 1;
        }

        // Still behind after the cap: skip ahead rather than snowball
        if self.accumulator > self.fixed_dt * 2.0 {
            warn!(
                "Simulation fell behind, dropping {:.3}s",
                self.accumulator
            );
            self.dropped += self.accumulator;
            self.accumulator = 0.0;
        }

        self.total_updates += u64::from(count);
        count
    }

    /// Clears leftover time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_creation() {
        let step = FixedStep::new(1.0 / 60.0, 10);
        assert!((step.fixed_dt() - 1.0 / 60.0).abs() < 0.001);
        assert_eq!(step.total_updates(), 0);
    }

    #[test]
    fn test_two_ticks_per_thirty_hz_frame() {
        let mut step = FixedStep::new(1.0 / 60.0, 10);
        let ticks: u32 = (0..30).map(|_| step.accumulate(1.0 / 30.0)).sum();
        // Float drift may hold back the last tick
        assert!((59..=60).contains(&ticks));
    }

    #[test]
    fn test_leftover_carries_over() {
        let mut step = FixedStep::new(0.1, 10);
        assert_eq!(step.accumulate(0.15), 1);
        assert!((step.alpha() - 0.5).abs() < 1e-3);
        assert_eq!(step.accumulate(0.06), 1);
    }

    #[test]
    fn test_spiral_prevention() {
        let mut step = FixedStep::new(1.0 / 60.0, 10);
        let updates = step.accumulate(1.0);

        assert_eq!(updates, 10);
        assert!(step.dropped() > 0.5);
        assert!(step.alpha().abs() < f32::EPSILON);
    }

    #[test]
    fn test_reset() {
        let mut step = FixedStep::new(0.1, 10);
        step.accumulate(0.05);
        step.reset();
        assert_eq!(step.accumulate(0.06), 0);
    }
}
