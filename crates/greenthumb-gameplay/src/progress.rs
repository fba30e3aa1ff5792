//! Progress gauges.
//!
//! This module provides:
//! - [`Gauge`], the model of a progress bar mirrored onto an optional view
//! - [`ProgressIndicator`], the can's own pour gauge that fills while
//!   pouring and resets when it fills or pouring stops

use std::fmt;
use tracing::{debug, warn};

use greenthumb_common::ConfigError;

use crate::events::Signal;
use crate::view::GaugeView;

/// Default seconds of pouring to fill the pour gauge.
pub const DEFAULT_TIME_TO_FILL: f32 = 4.0;

/// A progress bar: value, maximum and visibility.
///
/// The model is always kept; the view, if any, mirrors it.
pub struct Gauge {
    value: f32,
    max: f32,
    visible: bool,
    view: Option<Box<dyn GaugeView>>,
}

impl Gauge {
    /// Creates an empty gauge.
    #[must_use]
    pub fn new(max: f32, visible: bool, view: Option<Box<dyn GaugeView>>) -> Self {
        let mut gauge = Self {
            value: 0.0,
            max,
            visible,
            view,
        };
        if let Some(view) = gauge.view.as_mut() {
            view.configure(max);
            view.set_value(0.0);
            view.set_visible(visible);
        }
        gauge
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Value at which the gauge is full.
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Fill fraction in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.value / self.max).clamp(0.0, 1.0)
    }

    /// Whether the gauge is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a view is attached.
    #[must_use]
    pub fn has_view(&self) -> bool {
        self.view.is_some()
    }

    /// Sets the value, clamped to `[0, max]`.
    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, self.max);
        if let Some(view) = self.view.as_mut() {
            view.set_value(self.value);
        }
    }

    /// Shows or hides the gauge.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if let Some(view) = self.view.as_mut() {
            view.set_visible(visible);
        }
    }

    /// Zeroes the value and sets visibility.
    pub fn reset(&mut self, visible: bool) {
        self.set_value(0.0);
        self.set_visible(visible);
    }
}

impl fmt::Debug for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gauge")
            .field("value", &self.value)
            .field("max", &self.max)
            .field("visible", &self.visible)
            .field("has_view", &self.view.is_some())
            .finish()
    }
}

/// Fills while an external signal is active.
///
/// Shows on the rising edge of the signal. Hides and zeroes on the falling
/// edge. On reaching `time_to_fill` it fires the full notification and
/// immediately zeroes and hides again.
#[derive(Debug)]
pub struct ProgressIndicator {
    time_to_fill: f32,
    elapsed: f32,
    was_active: bool,
    gauge: Gauge,
    full: Signal<()>,
}

impl ProgressIndicator {
    /// Creates a hidden, empty indicator.
    pub fn new(time_to_fill: f32, view: Option<Box<dyn GaugeView>>) -> Result<Self, ConfigError> {
        if time_to_fill <= 0.0 {
            return Err(ConfigError::NonPositiveRate {
                name: "time_to_fill",
                value: time_to_fill,
            });
        }
        if view.is_none() {
            warn!("Pour gauge has no view; progress will not be displayed");
        }
        Ok(Self {
            time_to_fill,
            elapsed: 0.0,
            was_active: false,
            gauge: Gauge::new(time_to_fill, false, view),
            full: Signal::new(),
        })
    }

    /// Seconds accumulated toward full.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The gauge model.
    #[must_use]
    pub const fn gauge(&self) -> &Gauge {
        &self.gauge
    }

    /// Fires each time the gauge fills.
    pub fn on_full(&mut self) -> &mut Signal<()> {
        &mut self.full
    }

    /// Advances the indicator. Returns true if it filled this tick.
    pub fn tick(&mut self, active: bool, dt: f32) -> bool {
        if active && !self.was_active {
            self.gauge.set_visible(true);
        } else if !active && self.was_active {
            self.elapsed = 0.0;
            self.gauge.reset(false);
        }
        self.was_active = active;

        if !active {
            return false;
        }

        self.elapsed = (self.elapsed + dt).min(self.time_to_fill);
        self.gauge.set_value(self.elapsed);

        if self.elapsed >= self.time_to_fill {
            debug!("Pour gauge full, resetting");
            self.full.emit(&());
            self.elapsed = 0.0;
            self.gauge.reset(false);
            return true;
        }
        false
    }

    /// Zeroes and hides the gauge and forgets the last signal state.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.gauge.reset(false);
        self.was_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct ViewState {
        max: f32,
        value: f32,
        visible: bool,
    }

    struct SharedView(Rc<RefCell<ViewState>>);

    impl GaugeView for SharedView {
        fn configure(&mut self, max: f32) {
            self.0.borrow_mut().max = max;
        }

        fn set_value(&mut self, value: f32) {
            self.0.borrow_mut().value = value;
        }

        fn set_visible(&mut self, visible: bool) {
            self.0.borrow_mut().visible = visible;
        }
    }

    #[test]
    fn test_gauge_clamps_and_mirrors_view() {
        let state = Rc::new(RefCell::new(ViewState::default()));
        let mut gauge = Gauge::new(4.0, true, Some(Box::new(SharedView(Rc::clone(&state)))));
        assert!((state.borrow().max - 4.0).abs() < f32::EPSILON);
        assert!(state.borrow().visible);

        gauge.set_value(9.0);
        assert!((gauge.value() - 4.0).abs() < f32::EPSILON);
        assert!((state.borrow().value - 4.0).abs() < f32::EPSILON);
        assert!((gauge.fraction() - 1.0).abs() < f32::EPSILON);

        gauge.reset(false);
        assert!(!state.borrow().visible);
        assert!(gauge.value().abs() < f32::EPSILON);
    }

    #[test]
    fn test_indicator_rejects_non_positive_time() {
        assert!(ProgressIndicator::new(0.0, None).is_err());
    }

    #[test]
    fn test_indicator_shows_on_rising_edge_and_hides_on_falling() {
        let mut indicator = ProgressIndicator::new(4.0, None).expect("valid time");
        assert!(!indicator.gauge().is_visible());

        indicator.tick(true, 1.0);
        assert!(indicator.gauge().is_visible());
        assert!((indicator.elapsed() - 1.0).abs() < f32::EPSILON);

        indicator.tick(false, 1.0);
        assert!(!indicator.gauge().is_visible());
        assert!(indicator.elapsed().abs() < f32::EPSILON);
    }

    #[test]
    fn test_indicator_fires_full_and_resets() {
        let mut indicator = ProgressIndicator::new(1.0, None).expect("valid time");
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        indicator.on_full().connect(move |_: &()| *sink.borrow_mut() += 1);

        assert!(!indicator.tick(true, 0.6));
        assert!(indicator.tick(true, 0.6));
        assert_eq!(*count.borrow(), 1);
        assert!(!indicator.gauge().is_visible());
        assert!(indicator.elapsed().abs() < f32::EPSILON);

        // Still pouring: keeps filling from zero, hidden until the next edge
        assert!(!indicator.tick(true, 0.5));
        assert!(!indicator.gauge().is_visible());
        assert!((indicator.elapsed() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_indicator_manual_reset() {
        let mut indicator = ProgressIndicator::new(2.0, None).expect("valid time");
        indicator.tick(true, 1.0);
        indicator.reset();
        assert!(!indicator.gauge().is_visible());
        assert!(indicator.elapsed().abs() < f32::EPSILON);

        // The next active tick is a fresh rising edge
        indicator.tick(true, 0.1);
        assert!(indicator.gauge().is_visible());
    }
}
