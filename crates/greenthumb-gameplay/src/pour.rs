//! Tilt-based pour detection and the lifecycle of the fluid stream.
//!
//! The can pours while its spout tips far enough from upright:
//! `pour_angle = max(0, angle(-spout.up, world_up) - 90)`. An upright can
//! reads 90 degrees and the angle falls as it tips forward. Pouring is on
//! while the angle is below the threshold. Each rising edge spawns a new
//! stream at the spout and begins it; each falling edge ends and releases it.

use glam::Vec3;
use std::fmt;
use tracing::debug;

use greenthumb_common::{angle_between_degrees, Pose, WORLD_UP};

use crate::events::Signal;
use crate::vessel::Vessel;

/// Default pour threshold in degrees.
pub const DEFAULT_POUR_THRESHOLD: f32 = 45.0;

/// The visible stream of water. Rendering is owned by the implementor.
pub trait FluidStream {
    /// Starts the flow.
    fn begin(&mut self);

    /// Stops the flow. The stream is dropped right after.
    fn end(&mut self);
}

/// Creates streams at the spout.
pub trait StreamFactory {
    /// Spawns a new stream at a world position.
    fn spawn(&mut self, origin: Vec3) -> Box<dyn FluidStream>;
}

/// Stream that only logs its lifecycle.
#[derive(Debug)]
pub struct TracingStream {
    serial: u64,
    origin: Vec3,
}

impl FluidStream for TracingStream {
    fn begin(&mut self) {
        debug!("Stream {} began at {:?}", self.serial, self.origin);
    }

    fn end(&mut self) {
        debug!("Stream {} ended", self.serial);
    }
}

/// Factory for [`TracingStream`]s.
#[derive(Debug, Default)]
pub struct TracingStreamFactory {
    spawned: u64,
}

impl StreamFactory for TracingStreamFactory {
    fn spawn(&mut self, origin: Vec3) -> Box<dyn FluidStream> {
        self.spawned += 1;
        Box::new(TracingStream {
            serial: self.spawned,
            origin,
        })
    }
}

/// Pour angle of a spout pose in degrees.
#[must_use]
pub fn pour_angle(spout: &Pose) -> f32 {
    (angle_between_degrees(-spout.up(), WORLD_UP) - 90.0).max(0.0)
}

/// Edge produced by a sensor tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PourTransition {
    /// Pouring just started
    Began,
    /// Pouring just stopped
    Ended,
}

/// Watches the can's tilt and owns its fluid and stream.
pub struct PourAngleSensor {
    /// Degrees below which the can pours
    threshold: f32,
    /// Extra degrees the can must be righted by before pouring stops
    hysteresis: f32,
    vessel: Vessel,
    pouring: bool,
    last_angle: f32,
    stream: Option<Box<dyn FluidStream>>,
    factory: Box<dyn StreamFactory>,
    stream_began: Signal<Vec3>,
    stream_ended: Signal<()>,
}

impl PourAngleSensor {
    /// Creates a sensor with no hysteresis.
    #[must_use]
    pub fn new(threshold: f32, vessel: Vessel, factory: Box<dyn StreamFactory>) -> Self {
        Self {
            threshold,
            hysteresis: 0.0,
            vessel,
            pouring: false,
            last_angle: 90.0,
            stream: None,
            factory,
            stream_began: Signal::new(),
            stream_ended: Signal::new(),
        }
    }

    /// Requires the can to be righted `degrees` past the threshold before
    /// pouring stops.
    #[must_use]
    pub fn with_hysteresis(mut self, degrees: f32) -> Self {
        self.hysteresis = degrees.max(0.0);
        self
    }

    /// Whether the can is pouring. Single source of truth for readers.
    #[must_use]
    pub const fn is_pouring(&self) -> bool {
        self.pouring
    }

    /// Pour angle measured on the last tick.
    #[must_use]
    pub const fn last_angle(&self) -> f32 {
        self.last_angle
    }

    /// Configured threshold in degrees.
    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether a stream is alive.
    #[must_use]
    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// The can's fluid.
    #[must_use]
    pub const fn vessel(&self) -> &Vessel {
        &self.vessel
    }

    /// Mutable access to the can's fluid (refill).
    pub fn vessel_mut(&mut self) -> &mut Vessel {
        &mut self.vessel
    }

    /// Fires with the spout position when a stream begins.
    pub fn on_stream_began(&mut self) -> &mut Signal<Vec3> {
        &mut self.stream_began
    }

    /// Fires when a stream ends.
    pub fn on_stream_ended(&mut self) -> &mut Signal<()> {
        &mut self.stream_ended
    }

    /// Samples the spout pose and updates the pouring state.
    ///
    /// A single tick across the threshold toggles the state.
    pub fn tick(&mut self, spout: &Pose, dt: f32) -> Option<PourTransition> {
        let angle = pour_angle(spout);
        self.last_angle = angle;

        let limit = if self.pouring {
            self.threshold + self.hysteresis
        } else {
            self.threshold
        };
        let pour_check = angle < limit;

        let transition = if pour_check == self.pouring {
            None
        } else {
            self.pouring = pour_check;
            if pour_check {
                self.start_pour(spout.position);
                Some(PourTransition::Began)
            } else {
                self.end_pour();
                Some(PourTransition::Ended)
            }
        };

        if self.pouring {
            let consumed = self.vessel.drain(dt);
            if consumed > 0 {
                debug!(
                    "Poured {} unit(s), {} left",
                    consumed,
                    self.vessel.current_units()
                );
            }
        }

        transition
    }

    fn start_pour(&mut self, origin: Vec3) {
        debug!("Pour started at angle {:.1}", self.last_angle);
        let mut stream = self.factory.spawn(origin);
        stream.begin();
        self.stream = Some(stream);
        self.stream_began.emit(&origin);
    }

    fn end_pour(&mut self) {
        debug!("Pour ended at angle {:.1}", self.last_angle);
        if let Some(mut stream) = self.stream.take() {
            stream.end();
        }
        self.stream_ended.emit(&());
    }
}

impl fmt::Debug for PourAngleSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PourAngleSensor")
            .field("threshold", &self.threshold)
            .field("hysteresis", &self.hysteresis)
            .field("vessel", &self.vessel)
            .field("pouring", &self.pouring)
            .field("last_angle", &self.last_angle)
            .field("has_stream", &self.stream.is_some())
            .finish_non_exhaustive()
    }
}
