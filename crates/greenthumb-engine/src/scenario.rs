//! Scripted watering sessions.
//!
//! A [`Scenario`] is a list of held poses and player actions. The runner
//! feeds each hold through the fixed-step clock one host frame at a time
//! and collects everything the garden reported.

use glam::{Quat, Vec3};
use tracing::{debug, info};

use greenthumb_common::{GardenResult, Pose, Tag};
use greenthumb_gameplay::{FrameInput, Garden, GardenConfig, GardenEvent, GardenProgress};

use crate::timing::FixedStep;

/// Height of the spout above the pour target.
const SPOUT_HEIGHT: f32 = 1.0;

/// Tilt that points the spout straight down the pour direction.
pub const POUR_TILT: f32 = 90.0;

/// One step of a script.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Holds the can over a point for a while.
    Hold {
        /// Shown in the log
        label: String,
        /// Seconds to hold
        seconds: f32,
        /// Degrees the can is tipped from upright
        tilt_degrees: f32,
        /// World point the stream should land on
        target: Vec3,
        /// Tags the can touches throughout
        contacts: Vec<String>,
    },
    /// Dismisses every fact popup on screen.
    DismissFacts,
    /// Replants a plant by name.
    Replant(String),
}

/// An ordered script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scenario {
    actions: Vec<Action>,
}

impl Scenario {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hold.
    #[must_use]
    pub fn hold(mut self, label: &str, seconds: f32, tilt_degrees: f32, target: Vec3) -> Self {
        self.actions.push(Action::Hold {
            label: label.to_string(),
            seconds,
            tilt_degrees,
            target,
            contacts: Vec::new(),
        });
        self
    }

    /// Appends an upright hold touching a refill source.
    #[must_use]
    pub fn refill(mut self, seconds: f32, source_tag: &str) -> Self {
        self.actions.push(Action::Hold {
            label: "Refill".to_string(),
            seconds,
            tilt_degrees: 0.0,
            target: Vec3::ZERO,
            contacts: vec![source_tag.to_string()],
        });
        self
    }

    /// Appends an action.
    #[must_use]
    pub fn then(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// The steps in order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Waters every configured plant in turn, rights the can, dismisses
    /// the facts and tops the can back up.
    #[must_use]
    pub fn watering_round(config: &GardenConfig) -> Self {
        let mut scenario = Self::new();
        let mut last = Vec3::ZERO;

        for plant in &config.plants {
            let seconds = plant.growth.total_growth_time.max(0.0) + 1.0;
            scenario = scenario
                .hold(&format!("Move over {}", plant.name), 0.5, 0.0, plant.position)
                .hold(&format!("Water {}", plant.name), seconds, POUR_TILT, plant.position);
            last = plant.position;
        }

        let refill_seconds =
            config.refill.refill_rate * config.vessel.total_units as f32 + 1.0;
        scenario
            .hold("Right the can", 1.0, 0.0, last)
            .then(Action::DismissFacts)
            .refill(refill_seconds, &config.refill.source_tag)
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    /// Simulation ticks run
    pub ticks: u64,
    /// Seconds simulated
    pub simulated: f64,
    /// Every event, in order
    pub events: Vec<GardenEvent>,
    /// Grown plants at the end
    pub progress: GardenProgress,
    /// Units in the can at the end
    pub units: u32,
    /// Facts dismissed by the script
    pub dismissed: usize,
}

impl ScenarioReport {
    /// Counts events matching a predicate.
    #[must_use]
    pub fn count(&self, matches: impl Fn(&GardenEvent) -> bool) -> usize {
        self.events.iter().filter(|e| matches(e)).count()
    }

    /// Whether the all-grown event fired.
    #[must_use]
    pub fn all_complete(&self) -> bool {
        self.count(|e| matches!(e, GardenEvent::AllComplete)) > 0
    }
}

/// Drives a garden through scenarios.
#[derive(Debug)]
pub struct ScenarioRunner {
    clock: FixedStep,
    frame_dt: f32,
}

impl ScenarioRunner {
    /// Creates a runner feeding frames of `frame_dt` seconds into `clock`.
    #[must_use]
    pub fn new(clock: FixedStep, frame_dt: f32) -> Self {
        Self {
            clock,
            frame_dt: frame_dt.max(0.001),
        }
    }

    /// Runs every action in order.
    pub fn run(&mut self, garden: &mut Garden, scenario: &Scenario) -> GardenResult<ScenarioReport> {
        let start_ticks = garden.ticks();
        let start_clock = garden.clock();
        let mut events = Vec::new();
        let mut dismissed = 0;

        for action in scenario.actions() {
            match action {
                Action::Hold {
                    label,
                    seconds,
                    tilt_degrees,
                    target,
                    contacts,
                } => {
                    info!("{} ({:.1}s)", label, seconds);
                    let input = Self::frame_input(garden, *tilt_degrees, *target, contacts);
                    self.hold(garden, *seconds, &input);
                },
                Action::DismissFacts => {
                    let ids = garden.targets().ids().to_vec();
                    for id in ids {
                        if garden.dismiss_fact(id)? {
                            dismissed += 1;
                        }
                    }
                },
                Action::Replant(name) => {
                    if let Some(id) = garden.plant_by_name(name).map(|p| p.id()) {
                        garden.replant(id)?;
                    }
                },
            }

            for event in garden.drain_events() {
                debug!("Event: {:?}", event);
                events.push(event);
            }
        }

        let progress = garden.progress();
        info!(
            "Session over: {}/{} plants grown, can {}/{}",
            progress.grown,
            progress.total,
            garden.vessel().current_units(),
            garden.vessel().total_units()
        );

        Ok(ScenarioReport {
            ticks: garden.ticks() - start_ticks,
            simulated: garden.clock() - start_clock,
            events,
            progress,
            units: garden.vessel().current_units(),
            dismissed,
        })
    }

    fn hold(&mut self, garden: &mut Garden, seconds: f32, input: &FrameInput) {
        let frames = (seconds / self.frame_dt).ceil() as u32;
        let dt = self.clock.fixed_dt();
        for _ in 0..frames {
            for _ in 0..self.clock.accumulate(self.frame_dt) {
                garden.tick(dt, input);
            }
        }
    }

    fn frame_input(garden: &Garden, tilt_degrees: f32, target: Vec3, contacts: &[String]) -> FrameInput {
        // Place the detector so its box is centered on the target
        let local = garden
            .detector()
            .region()
            .map_or(Vec3::ZERO, |region| region.center + region.offset);
        let spout = Pose::new(
            target + Vec3::new(0.0, SPOUT_HEIGHT, 0.0),
            Quat::from_rotation_z(tilt_degrees.to_radians()),
        );
        let mut input = FrameInput::new(spout, Pose::at(target - local));
        input
            .contacts
            .extend(contacts.iter().map(|tag| Tag::new(tag)));
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::views::LoggingViews;
    use greenthumb_common::tags;

    fn runner(config: &EngineConfig) -> ScenarioRunner {
        ScenarioRunner::new(
            FixedStep::new(config.fixed_dt(), config.max_updates_per_frame),
            config.frame_dt(),
        )
    }

    fn garden(config: &EngineConfig, views: &mut LoggingViews) -> Garden {
        Garden::from_config(&config.garden, views).expect("valid config")
    }

    #[test]
    fn test_watering_round_grows_everything() {
        let config = EngineConfig::default();
        let mut views = LoggingViews::new();
        let stats = views.stats();
        let mut garden = garden(&config, &mut views);

        let scenario = Scenario::watering_round(&config.garden);
        let report = runner(&config)
            .run(&mut garden, &scenario)
            .expect("scenario runs");

        assert_eq!(report.progress, GardenProgress { grown: 3, total: 3 });
        assert!(report.all_complete());
        assert_eq!(report.count(|e| matches!(e, GardenEvent::AllComplete)), 1);
        assert_eq!(report.count(|e| matches!(e, GardenEvent::GrowthComplete { .. })), 3);
        assert_eq!(report.count(|e| matches!(e, GardenEvent::StreamBegan)), 3);
        assert_eq!(report.count(|e| matches!(e, GardenEvent::StreamEnded)), 3);
        assert_eq!(report.dismissed, 3);
        assert_eq!(report.count(|e| matches!(e, GardenEvent::FactDismissed { .. })), 3);
        assert_eq!(report.units, 5);

        // One transition popup and one fact per plant
        assert_eq!(stats.popups_shown(), 6);
        assert_eq!(stats.dismiss_removed(), 3);
        assert!(stats.control_enabled());
    }

    #[test]
    fn test_fixed_step_drives_expected_tick_count() {
        let config = EngineConfig::default();
        let mut views = LoggingViews::new();
        let mut garden = garden(&config, &mut views);

        let scenario = Scenario::new().hold("Idle", 2.0, 0.0, Vec3::ZERO);
        let report = runner(&config)
            .run(&mut garden, &scenario)
            .expect("scenario runs");

        assert!((119..=121).contains(&report.ticks));
        assert!((report.simulated - 2.0).abs() < 0.05);
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_consumption_then_refill() {
        let mut config = EngineConfig::default();
        config.garden.vessel.drain_interval = 1.0;
        let mut views = LoggingViews::new();
        let mut garden = garden(&config, &mut views);

        let target = config.garden.plants[0].position;
        let scenario = Scenario::new()
            .hold("Pour", 3.5, POUR_TILT, target)
            .hold("Right the can", 0.5, 0.0, target);
        let mut runner = runner(&config);
        let report = runner.run(&mut garden, &scenario).expect("scenario runs");
        assert_eq!(report.units, 2);

        let report = runner
            .run(&mut garden, &Scenario::new().refill(3.0, tags::POT))
            .expect("scenario runs");
        assert_eq!(report.units, 5);
        assert_eq!(report.count(|e| matches!(e, GardenEvent::Refilled { .. })), 3);
    }

    #[test]
    fn test_replant_action() {
        let config = EngineConfig::default();
        let mut views = LoggingViews::new();
        let mut garden = garden(&config, &mut views);
        let lettuce = &config.garden.plants[0];

        let scenario = Scenario::new()
            .hold("Water", 5.0, POUR_TILT, lettuce.position)
            .hold("Right the can", 0.5, 0.0, lettuce.position)
            .then(Action::Replant(lettuce.name.clone()));
        let report = runner(&config)
            .run(&mut garden, &scenario)
            .expect("scenario runs");

        assert_eq!(report.progress.grown, 0);
        let plant = garden.plant_by_name(&lettuce.name).expect("configured");
        assert_eq!(plant.stage_index(), 0);
        assert!(plant.accumulated_time().abs() < f32::EPSILON);
    }
}
