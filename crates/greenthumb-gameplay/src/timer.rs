//! Deferred, cancellable actions.
//!
//! A [`DeferredTimer`] holds at most one pending deferral. Scheduling a new
//! one cancels whatever was pending, so only the latest deferral can ever
//! fire. Time only advances through [`DeferredTimer::tick`]; a deferral
//! scheduled during a tick starts counting on the next call.

use serde::{Deserialize, Serialize};

/// Identifies one scheduled deferral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Returns the raw token value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    token: TimerToken,
    remaining: f32,
}

/// A single-slot timer whose pending action can be replaced or cancelled.
#[derive(Debug, Default)]
pub struct DeferredTimer {
    pending: Option<Pending>,
    next_token: u64,
}

impl DeferredTimer {
    /// Creates an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a deferral `delay` seconds from now.
    ///
    /// Any pending deferral is cancelled first.
    pub fn schedule(&mut self, delay: f32) -> TimerToken {
        self.cancel();
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.pending = Some(Pending {
            token,
            remaining: delay.max(0.0),
        });
        token
    }

    /// Cancels the pending deferral, returning its token if there was one.
    pub fn cancel(&mut self) -> Option<TimerToken> {
        self.pending.take().map(|p| p.token)
    }

    /// Token of the pending deferral.
    #[must_use]
    pub fn pending(&self) -> Option<TimerToken> {
        self.pending.map(|p| p.token)
    }

    /// Seconds left before the pending deferral fires.
    #[must_use]
    pub fn remaining(&self) -> Option<f32> {
        self.pending.map(|p| p.remaining)
    }

    /// Advances the timer. Returns the token that fired during this step.
    pub fn tick(&mut self, dt: f32) -> Option<TimerToken> {
        let pending = self.pending.as_mut()?;
        pending.remaining -= dt;
        if pending.remaining <= 0.0 {
            return self.pending.take().map(|p| p.token);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut timer = DeferredTimer::new();
        let token = timer.schedule(1.0);

        assert_eq!(timer.tick(0.5), None);
        assert_eq!(timer.tick(0.5), Some(token));
        assert_eq!(timer.pending(), None);
        assert_eq!(timer.tick(1.0), None);
    }

    #[test]
    fn test_reschedule_cancels_previous() {
        let mut timer = DeferredTimer::new();
        let first = timer.schedule(1.0);
        timer.tick(0.8);
        let second = timer.schedule(1.0);
        assert_ne!(first, second);

        // First would have fired here
        assert_eq!(timer.tick(0.3), None);

        let mut fired = Vec::new();
        for _ in 0..10 {
            if let Some(token) = timer.tick(0.1) {
                fired.push(token);
            }
        }
        assert_eq!(fired, vec![second]);
    }

    #[test]
    fn test_cancel() {
        let mut timer = DeferredTimer::new();
        let token = timer.schedule(0.1);
        assert_eq!(timer.cancel(), Some(token));
        assert_eq!(timer.tick(1.0), None);
        assert_eq!(timer.cancel(), None);
    }

    #[test]
    fn test_zero_delay_fires_on_next_tick() {
        let mut timer = DeferredTimer::new();
        let token = timer.schedule(0.0);
        assert_eq!(timer.pending(), Some(token));
        assert_eq!(timer.tick(0.0), Some(token));
    }
}
