//! A complete watering session.
//!
//! [`Garden`] owns the can, the plants and the physics stand-in, and runs
//! them once per tick in a fixed order:
//!
//! 1. plant popups (deferred hides scheduled on earlier ticks)
//! 2. pour sensor (stream lifecycle, optional consumption)
//! 3. refill contacts
//! 4. the can's pour gauge
//! 5. pour area detection and plant growth
//! 6. the all-grown check
//!
//! Every component signal is forwarded onto one [`EventBus`].

use glam::Vec3;
use tracing::{debug, info};

use greenthumb_common::{EntityId, GardenError, GardenResult, Pose, Tag};

use crate::completion::CompletionAggregator;
use crate::config::GardenConfig;
use crate::detector::PourAreaDetector;
use crate::events::{EventBus, GardenEvent};
use crate::growth::GrowthTarget;
use crate::pour::PourAngleSensor;
use crate::progress::ProgressIndicator;
use crate::refill::FluidRefillStation;
use crate::registry::TargetRegistry;
use crate::spatial::SphereSpace;
use crate::vessel::Vessel;
use crate::view::SceneViews;

/// What the host reports for one tick.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// World pose of the can's spout
    pub spout: Pose,
    /// World pose of the pour area detector
    pub detector: Pose,
    /// Tags of everything the can is touching this tick
    pub contacts: Vec<Tag>,
}

impl FrameInput {
    /// Input with both poses set and no contacts.
    #[must_use]
    pub fn new(spout: Pose, detector: Pose) -> Self {
        Self {
            spout,
            detector,
            contacts: Vec::new(),
        }
    }

    /// Adds a contact.
    #[must_use]
    pub fn with_contact(mut self, tag: impl Into<Tag>) -> Self {
        self.contacts.push(tag.into());
        self
    }
}

/// Counts of grown plants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GardenProgress {
    /// Plants at their final stage
    pub grown: usize,
    /// Plants in the scene
    pub total: usize,
}

/// One watering session.
#[derive(Debug)]
pub struct Garden {
    sensor: PourAngleSensor,
    refill: FluidRefillStation,
    indicator: ProgressIndicator,
    detector: PourAreaDetector,
    targets: TargetRegistry,
    completion: Option<CompletionAggregator>,
    space: SphereSpace,
    bus: EventBus,
    clock: f64,
    ticks: u64,
}

impl Garden {
    /// Builds a garden from configuration, taking its views from `views`.
    ///
    /// A misconfigured plant is built inert and does not fail the garden.
    pub fn from_config(config: &GardenConfig, views: &mut dyn SceneViews) -> GardenResult<Self> {
        let bus = EventBus::default();

        let vessel = Vessel::new(config.vessel.total_units, config.vessel.initial_units)?
            .with_drain_interval(config.vessel.drain_interval);
        let mut sensor = PourAngleSensor::new(
            config.pour.threshold_degrees,
            vessel,
            views.stream_factory(),
        )
        .with_hysteresis(config.pour.hysteresis_degrees);
        sensor
            .on_stream_began()
            .connect(bus.forwarder(|_: &Vec3| GardenEvent::StreamBegan));
        sensor
            .on_stream_ended()
            .connect(bus.forwarder(|_: &()| GardenEvent::StreamEnded));

        let mut refill = FluidRefillStation::new(
            config.refill.refill_rate,
            0.0,
            Tag::new(&config.refill.source_tag),
        )?;
        refill
            .on_refilled()
            .connect(bus.forwarder(|units: &u32| GardenEvent::Refilled { units: *units }));

        let mut indicator = ProgressIndicator::new(config.indicator.time_to_fill, views.pour_gauge())?;
        indicator
            .on_full()
            .connect(bus.forwarder(|_: &()| GardenEvent::ProgressFull));

        let detector = PourAreaDetector::new(
            config.detector.region,
            Tag::new(&config.detector.receiver_tag),
            config.detector.layers,
            config.detector.capacity,
        );

        let mut targets = TargetRegistry::new();
        let mut space = SphereSpace::new();
        for plant in &config.plants {
            let stages = (0..plant.stage_count)
                .map(|index| views.stage(&plant.name, index))
                .collect();
            let mut builder = GrowthTarget::builder(&plant.name, plant.growth.clone()).stages(stages);
            if let Some(view) = views.plant_gauge(&plant.name) {
                builder = builder.gauge_view(view);
            }
            if let Some(view) = views.plant_popup(&plant.name) {
                builder = builder.popup_view(view);
            }
            let mut target = builder.build();
            Self::forward_target_signals(&bus, &mut target);

            let id = targets.insert(target);
            space.add(
                id,
                &config.detector.receiver_tag,
                plant.layer,
                plant.position,
                plant.radius,
            );
        }

        let completion = if config.completion.enabled {
            let mut aggregator =
                CompletionAggregator::new(targets.ids().to_vec(), views.completion_control());
            aggregator
                .on_all_complete()
                .connect(bus.forwarder(|_: &()| GardenEvent::AllComplete));
            Some(aggregator)
        } else {
            debug!("Completion notification disabled");
            None
        };

        info!(
            "Garden ready: {} plants, can {}/{}",
            targets.len(),
            sensor.vessel().current_units(),
            sensor.vessel().total_units()
        );

        Ok(Self {
            sensor,
            refill,
            indicator,
            detector,
            targets,
            completion,
            space,
            bus,
            clock: 0.0,
            ticks: 0,
        })
    }

    fn forward_target_signals(bus: &EventBus, target: &mut GrowthTarget) {
        let signals = target.signals_mut();
        signals
            .pouring_started
            .connect(bus.forwarder(|id: &EntityId| GardenEvent::PouringStarted { target: *id }));
        signals
            .pouring_stopped
            .connect(bus.forwarder(|id: &EntityId| GardenEvent::PouringStopped { target: *id }));
        signals
            .stage_advanced
            .connect(bus.forwarder(|(id, stage): &(EntityId, usize)| {
                GardenEvent::StageAdvanced {
                    target: *id,
                    stage: *stage,
                }
            }));
        signals
            .growth_completed
            .connect(bus.forwarder(|id: &EntityId| GardenEvent::GrowthComplete { target: *id }));
        signals
            .fact_dismissed
            .connect(bus.forwarder(|id: &EntityId| GardenEvent::FactDismissed { target: *id }));
    }

    /// Advances the session by `dt` seconds.
    pub fn tick(&mut self, dt: f32, input: &FrameInput) {
        self.clock += f64::from(dt);
        self.ticks += 1;

        self.targets.tick(dt);

        self.sensor.tick(&input.spout, dt);

        for contact in &input.contacts {
            self.refill
                .on_contact_stay(self.clock, contact, self.sensor.vessel_mut());
        }

        self.indicator.tick(self.sensor.is_pouring(), dt);

        self.detector.tick(
            dt,
            &self.sensor,
            &input.detector,
            &self.space,
            &mut self.targets,
        );

        if let Some(completion) = self.completion.as_mut() {
            completion.tick(&self.targets);
        }
    }

    /// Takes every event published since the last call.
    ///
    /// The bus is bounded, so a driver should drain it after every tick.
    /// Events that do not fit are dropped and counted in
    /// [`dropped_events`](Self::dropped_events).
    pub fn drain_events(&self) -> Vec<GardenEvent> {
        self.bus.drain()
    }

    /// Events lost because the bus was not drained in time.
    #[must_use]
    pub fn dropped_events(&self) -> u64 {
        self.bus.dropped_count()
    }

    /// Seconds simulated so far.
    #[must_use]
    pub const fn clock(&self) -> f64 {
        self.clock
    }

    /// Ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The pour sensor and its can.
    #[must_use]
    pub const fn sensor(&self) -> &PourAngleSensor {
        &self.sensor
    }

    /// The can.
    #[must_use]
    pub const fn vessel(&self) -> &Vessel {
        self.sensor.vessel()
    }

    /// The refill station.
    #[must_use]
    pub const fn refill(&self) -> &FluidRefillStation {
        &self.refill
    }

    /// The can's pour gauge.
    #[must_use]
    pub const fn indicator(&self) -> &ProgressIndicator {
        &self.indicator
    }

    /// The pour area detector.
    #[must_use]
    pub const fn detector(&self) -> &PourAreaDetector {
        &self.detector
    }

    /// The plants.
    #[must_use]
    pub const fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    /// The all-grown watcher, if enabled.
    #[must_use]
    pub const fn completion(&self) -> Option<&CompletionAggregator> {
        self.completion.as_ref()
    }

    /// The collider set.
    #[must_use]
    pub const fn space(&self) -> &SphereSpace {
        &self.space
    }

    /// The collider set, for moving plants.
    pub fn space_mut(&mut self) -> &mut SphereSpace {
        &mut self.space
    }

    /// Looks up a plant by name.
    #[must_use]
    pub fn plant_by_name(&self, name: &str) -> Option<&GrowthTarget> {
        self.targets.iter().find(|target| target.name() == name)
    }

    /// Counts grown plants.
    #[must_use]
    pub fn progress(&self) -> GardenProgress {
        GardenProgress {
            grown: self.targets.iter().filter(|t| t.is_complete()).count(),
            total: self.targets.len(),
        }
    }

    /// Dismisses a plant's fact popup. Returns false if there was nothing
    /// to dismiss.
    pub fn dismiss_fact(&mut self, id: EntityId) -> GardenResult<bool> {
        Ok(self.targets.require_mut(id)?.dismiss_fact())
    }

    /// Replants a plant.
    pub fn replant(&mut self, id: EntityId) -> GardenResult<()> {
        self.targets.require_mut(id)?.reset();
        Ok(())
    }

    /// Removes a plant and its collider.
    pub fn remove_plant(&mut self, id: EntityId) -> GardenResult<GrowthTarget> {
        let target = self
            .targets
            .remove(id)
            .ok_or(GardenError::UnknownTarget(id))?;
        self.space.remove(id);
        Ok(target)
    }
}
