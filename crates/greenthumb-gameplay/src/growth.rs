//! Plant growth driven by watering time.
//!
//! This module provides the per-plant state machine:
//! - Watering time accumulates while the plant is under the stream
//! - Ordered growth stages, advanced at fractions of the total growth time
//! - Transition popups between stages and a fact popup at full growth
//! - Replanting back to the first stage
//!
//! Exactly one stage model is active at a time. The stage index only moves
//! forward, except through [`GrowthTarget::reset`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, info, trace, warn};

use greenthumb_common::{ConfigError, EntityId, GrowthError};

use crate::events::Signal;
use crate::popup::{PopupController, DEFAULT_POPUP_DURATION};
use crate::progress::Gauge;
use crate::view::{GaugeView, PopupView, Toggle};

/// Default seconds of watering to reach the final stage.
pub const DEFAULT_TOTAL_GROWTH_TIME: f32 = 4.0;

/// Tunables for one plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthSettings {
    /// Seconds of watering to grow through every stage
    pub total_growth_time: f32,
    /// Fraction of total time at which each non-final stage advances.
    /// One entry per stage except the last.
    pub stage_thresholds: Vec<f32>,
    /// Seconds a transition popup stays up
    pub popup_duration: f32,
    /// Sprite shown on reaching stage `i + 1`
    pub transition_sprites: Vec<String>,
    /// Fact shown at full growth
    pub fact: Option<String>,
}

impl Default for GrowthSettings {
    fn default() -> Self {
        Self {
            total_growth_time: DEFAULT_TOTAL_GROWTH_TIME,
            stage_thresholds: vec![0.5, 1.0],
            popup_duration: DEFAULT_POPUP_DURATION,
            transition_sprites: Vec::new(),
            fact: None,
        }
    }
}

impl GrowthSettings {
    /// Checks these settings against a stage count.
    pub fn validate(&self, stage_count: usize) -> Result<(), ConfigError> {
        if self.total_growth_time <= 0.0 {
            return Err(ConfigError::NonPositiveGrowthTime(self.total_growth_time));
        }
        if stage_count == 0 {
            return Err(ConfigError::NoStages);
        }
        if stage_count > 1 && self.stage_thresholds.len() != stage_count - 1 {
            return Err(ConfigError::ThresholdMismatch {
                stages: stage_count,
                expected: stage_count - 1,
                thresholds: self.stage_thresholds.len(),
            });
        }
        Ok(())
    }
}

/// Notifications raised by a plant. Each carries the plant's id.
#[derive(Debug, Default)]
pub struct TargetSignals {
    /// Water started landing on the plant
    pub pouring_started: Signal<EntityId>,
    /// Water stopped landing on the plant
    pub pouring_stopped: Signal<EntityId>,
    /// The plant moved forward to a stage
    pub stage_advanced: Signal<(EntityId, usize)>,
    /// The plant reached its final stage
    pub growth_completed: Signal<EntityId>,
    /// The fact popup was dismissed
    pub fact_dismissed: Signal<EntityId>,
}

/// Builder for [`GrowthTarget`].
pub struct GrowthTargetBuilder {
    id: EntityId,
    name: String,
    settings: GrowthSettings,
    stages: Vec<Box<dyn Toggle>>,
    gauge_view: Option<Box<dyn GaugeView>>,
    popup_view: Option<Box<dyn PopupView>>,
}

impl GrowthTargetBuilder {
    /// Uses a specific entity id instead of a fresh one.
    #[must_use]
    pub fn id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    /// Appends a stage model.
    #[must_use]
    pub fn stage(mut self, model: impl Toggle + 'static) -> Self {
        self.stages.push(Box::new(model));
        self
    }

    /// Replaces the stage models.
    #[must_use]
    pub fn stages(mut self, models: Vec<Box<dyn Toggle>>) -> Self {
        self.stages = models;
        self
    }

    /// Attaches a progress bar view.
    #[must_use]
    pub fn gauge_view(mut self, view: Box<dyn GaugeView>) -> Self {
        self.gauge_view = Some(view);
        self
    }

    /// Attaches a popup view.
    #[must_use]
    pub fn popup_view(mut self, view: Box<dyn PopupView>) -> Self {
        self.popup_view = Some(view);
        self
    }

    /// Builds the target and runs setup.
    ///
    /// A configuration error does not fail the build; the target is
    /// returned inert and reports the error through [`GrowthTarget::fault`].
    #[must_use]
    pub fn build(self) -> GrowthTarget {
        GrowthTarget::setup(self)
    }
}

/// A plant that grows while watered.
pub struct GrowthTarget {
    id: EntityId,
    name: String,
    settings: GrowthSettings,
    stages: Vec<Box<dyn Toggle>>,
    accumulated: f32,
    stage_index: usize,
    poured_on: bool,
    fault: Option<ConfigError>,
    gauge: Gauge,
    popups: PopupController,
    signals: TargetSignals,
}

impl GrowthTarget {
    /// Starts building a target.
    #[must_use]
    pub fn builder(name: impl Into<String>, settings: GrowthSettings) -> GrowthTargetBuilder {
        GrowthTargetBuilder {
            id: EntityId::new(),
            name: name.into(),
            settings,
            stages: Vec::new(),
            gauge_view: None,
            popup_view: None,
        }
    }

    fn setup(builder: GrowthTargetBuilder) -> Self {
        let GrowthTargetBuilder {
            id,
            name,
            settings,
            stages,
            gauge_view,
            popup_view,
        } = builder;

        if gauge_view.is_none() {
            warn!("{}: no progress bar view; progress will not be displayed", name);
        }
        if popup_view.is_none() {
            debug!("{}: no popup view", name);
        }

        let fault = settings.validate(stages.len()).err();
        let gauge = Gauge::new(settings.total_growth_time.max(0.0), fault.is_none(), gauge_view);
        let popups = PopupController::new(settings.popup_duration, popup_view);

        let mut target = Self {
            id,
            name,
            settings,
            stages,
            accumulated: 0.0,
            stage_index: 0,
            poured_on: false,
            fault,
            gauge,
            popups,
            signals: TargetSignals::default(),
        };

        for stage in &mut target.stages {
            stage.set_active(false);
        }

        if let Some(fault) = &target.fault {
            error!("{}: {}; plant disabled", target.name, fault);
            if let Some(first) = target.stages.first_mut() {
                first.set_active(true);
            }
            return target;
        }

        if let Err(e) = target.apply_stage(0) {
            error!("{}: could not enter first stage: {}", target.name, e);
        }
        target
    }

    /// Entity id.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settings the target was built with.
    #[must_use]
    pub const fn settings(&self) -> &GrowthSettings {
        &self.settings
    }

    /// Seconds of watering received.
    #[must_use]
    pub const fn accumulated_time(&self) -> f32 {
        self.accumulated
    }

    /// Seconds of watering needed for full growth.
    #[must_use]
    pub const fn total_growth_time(&self) -> f32 {
        self.settings.total_growth_time
    }

    /// Fraction of total growth time received.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.settings.total_growth_time <= 0.0 {
            return 0.0;
        }
        (self.accumulated / self.settings.total_growth_time).clamp(0.0, 1.0)
    }

    /// Index of the active stage.
    #[must_use]
    pub const fn stage_index(&self) -> usize {
        self.stage_index
    }

    /// Number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Whether the plant is at its final stage.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.is_inert() && self.stage_index + 1 == self.stages.len()
    }

    /// Whether water is landing on the plant.
    #[must_use]
    pub const fn is_poured_on(&self) -> bool {
        self.poured_on
    }

    /// Whether setup failed.
    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.fault.is_some()
    }

    /// The setup error, if any.
    #[must_use]
    pub const fn fault(&self) -> Option<&ConfigError> {
        self.fault.as_ref()
    }

    /// The progress bar model.
    #[must_use]
    pub const fn gauge(&self) -> &Gauge {
        &self.gauge
    }

    /// The popup slot.
    #[must_use]
    pub const fn popups(&self) -> &PopupController {
        &self.popups
    }

    /// The plant's notifications.
    pub fn signals_mut(&mut self) -> &mut TargetSignals {
        &mut self.signals
    }

    /// Water started landing on the plant.
    pub fn start_pouring(&mut self) {
        if self.is_inert() || self.poured_on || self.is_complete() {
            return;
        }
        self.poured_on = true;
        debug!("{} started being poured on", self.name);
        self.signals.pouring_started.emit(&self.id);
    }

    /// Water kept landing on the plant for `dt` seconds.
    ///
    /// Returns the new stage index if the plant advanced.
    pub fn continue_pouring(&mut self, dt: f32) -> Option<usize> {
        if self.is_inert() || !self.poured_on || self.is_complete() {
            return None;
        }

        self.accumulated = (self.accumulated + dt.max(0.0)).min(self.settings.total_growth_time);
        self.gauge.set_value(self.accumulated);

        let last = self.stages.len() - 1;
        let threshold = *self.settings.stage_thresholds.get(self.stage_index)?;
        if self.stage_index >= last {
            return None;
        }

        let threshold_time = self.settings.total_growth_time * threshold;
        if self.accumulated < threshold_time {
            return None;
        }

        let next = self.stage_index + 1;
        self.set_stage(next).ok().map(|()| next)
    }

    /// Water stopped landing on the plant. Accumulated time is kept.
    pub fn stop_pouring(&mut self) {
        if self.is_inert() || !self.poured_on || self.is_complete() {
            return;
        }
        self.poured_on = false;
        debug!(
            "{} stopped being poured on, progress kept at {:.2}s",
            self.name, self.accumulated
        );
        self.signals.pouring_stopped.emit(&self.id);
    }

    /// Moves the plant forward to `new_index`.
    ///
    /// Intermediate stages raise a transition popup; the final stage
    /// completes the plant. Requesting the active stage does nothing, and
    /// an earlier stage is rejected: only [`reset`](Self::reset) goes back.
    pub fn set_stage(&mut self, new_index: usize) -> Result<(), GrowthError> {
        if self.is_inert() {
            return Err(GrowthError::Inert);
        }
        if new_index < self.stage_index {
            warn!(
                "{}: refused to move from stage {} back to {}",
                self.name, self.stage_index, new_index
            );
            return Err(GrowthError::Regression {
                current: self.stage_index,
                requested: new_index,
            });
        }
        if new_index == self.stage_index {
            return Ok(());
        }
        self.apply_stage(new_index)
    }

    fn apply_stage(&mut self, new_index: usize) -> Result<(), GrowthError> {
        let stage_count = self.stages.len();
        if new_index >= stage_count {
            error!(
                "{}: attempted to set invalid growth stage {}",
                self.name, new_index
            );
            return Err(GrowthError::InvalidStage {
                requested: new_index,
                stage_count,
            });
        }

        let previous = self.stage_index;
        if let Some(stage) = self.stages.get_mut(previous) {
            stage.set_active(false);
        }
        self.stage_index = new_index;
        if let Some(stage) = self.stages.get_mut(new_index) {
            stage.set_active(true);
        }
        debug!("{} changed to growth stage {}", self.name, new_index);

        if new_index > previous {
            self.signals.stage_advanced.emit(&(self.id, new_index));
        }

        let last = stage_count - 1;
        if new_index == last {
            self.complete_growth();
        } else if new_index > 0 {
            match self.settings.transition_sprites.get(new_index - 1) {
                Some(sprite) => {
                    self.popups.show_transition(sprite);
                }
                None => trace!("{}: no popup for stage {}", self.name, new_index),
            }
        }
        Ok(())
    }

    fn complete_growth(&mut self) {
        self.gauge.set_visible(false);
        info!("{} reached final growth stage", self.name);
        self.signals.growth_completed.emit(&self.id);
        if let Some(fact) = &self.settings.fact {
            self.popups.show_fact(fact);
        }
    }

    /// Advances the popup auto-hide.
    pub fn tick(&mut self, dt: f32) {
        self.popups.tick(dt);
    }

    /// Dismisses the fact popup. Works once per plant.
    pub fn dismiss_fact(&mut self) -> bool {
        if !self.popups.dismiss() {
            return false;
        }
        self.signals.fact_dismissed.emit(&self.id);
        true
    }

    /// Replants: back to stage 0 with no watering time.
    pub fn reset(&mut self) {
        if self.is_inert() {
            warn!("{}: reset ignored, plant is disabled", self.name);
            return;
        }
        self.accumulated = 0.0;
        self.poured_on = false;
        self.gauge.reset(true);
        self.popups.hide_all();
        if let Err(e) = self.apply_stage(0) {
            error!("{}: could not return to first stage: {}", self.name, e);
            return;
        }
        info!("{} reset to initial growth state", self.name);
    }

    /// Cancels pending deferred work before the target goes away.
    pub fn deactivate(&mut self) {
        if let Some(token) = self.popups.cancel_pending() {
            trace!("{}: cancelled popup hide {:?}", self.name, token);
        }
    }
}

impl fmt::Debug for GrowthTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowthTarget")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("accumulated", &self.accumulated)
            .field("stage_index", &self.stage_index)
            .field("stage_count", &self.stages.len())
            .field("poured_on", &self.poured_on)
            .field("complete", &self.is_complete())
            .field("fault", &self.fault)
            .field("gauge", &self.gauge)
            .field("popups", &self.popups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popup::Popup;
    use crate::view::SharedToggle;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn plant(settings: GrowthSettings, stage_count: usize) -> (GrowthTarget, Vec<SharedToggle>) {
        let toggles: Vec<SharedToggle> = (0..stage_count).map(|_| SharedToggle::new()).collect();
        let models = toggles
            .iter()
            .map(|t| Box::new(t.clone()) as Box<dyn Toggle>)
            .collect();
        let target = GrowthTarget::builder("lettuce", settings).stages(models).build();
        (target, toggles)
    }

    fn three_stage() -> (GrowthTarget, Vec<SharedToggle>) {
        plant(GrowthSettings::default(), 3)
    }

    fn active_count(toggles: &[SharedToggle]) -> usize {
        toggles.iter().filter(|t| t.is_active()).count()
    }

    #[test]
    fn test_initial_state() {
        let (target, toggles) = three_stage();
        assert_eq!(target.stage_index(), 0);
        assert!(!target.is_complete());
        assert!(!target.is_poured_on());
        assert!(target.gauge().is_visible());
        assert!(toggles[0].is_active());
        assert_eq!(active_count(&toggles), 1);
    }

    #[test]
    fn test_threshold_crossing() {
        let (mut target, toggles) = three_stage();
        target.start_pouring();

        let mut advanced_at = Vec::new();
        for _ in 0..50 {
            let before = target.accumulated_time();
            if let Some(stage) = target.continue_pouring(0.1) {
                advanced_at.push((stage, before, target.accumulated_time()));
            }
        }

        assert_eq!(advanced_at.len(), 2);
        let (stage, _, at) = advanced_at[0];
        assert_eq!(stage, 1);
        assert!(at >= 2.0 && at < 2.2);
        let (stage, _, at) = advanced_at[1];
        assert_eq!(stage, 2);
        assert!((at - 4.0).abs() < f32::EPSILON);

        assert!(target.is_complete());
        assert!(!target.gauge().is_visible());
        assert!(toggles[2].is_active());
        assert_eq!(active_count(&toggles), 1);
    }

    #[test]
    fn test_not_poured_on_does_not_grow() {
        let (mut target, _) = three_stage();
        assert_eq!(target.continue_pouring(1.0), None);
        assert!(target.accumulated_time().abs() < f32::EPSILON);
    }

    #[test]
    fn test_stop_preserves_progress_and_is_idempotent() {
        let (mut target, _) = three_stage();
        let stops = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&stops);
        target
            .signals_mut()
            .pouring_stopped
            .connect(move |_| *sink.borrow_mut() += 1);

        target.start_pouring();
        target.continue_pouring(1.0);
        target.stop_pouring();
        target.stop_pouring();

        assert_eq!(*stops.borrow(), 1);
        assert!((target.accumulated_time() - 1.0).abs() < f32::EPSILON);

        target.start_pouring();
        target.continue_pouring(0.5);
        assert!((target.accumulated_time() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_completion_fires_once_and_ignores_further_water() {
        let (mut target, _) = three_stage();
        let completions = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&completions);
        target
            .signals_mut()
            .growth_completed
            .connect(move |id| sink.borrow_mut().push(*id));

        target.start_pouring();
        target.continue_pouring(2.0);
        target.continue_pouring(2.0);
        assert!(target.is_complete());

        target.continue_pouring(2.0);
        target.stop_pouring();
        target.start_pouring();
        assert_eq!(*completions.borrow(), vec![target.id()]);
        assert!((target.accumulated_time() - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_transition_popup_uses_sprite_for_stage() {
        let settings = GrowthSettings {
            total_growth_time: 3.0,
            stage_thresholds: vec![0.3, 0.6, 1.0],
            transition_sprites: vec!["sprout".into()],
            ..GrowthSettings::default()
        };
        let (mut target, _) = plant(settings, 4);
        target.start_pouring();

        target.continue_pouring(1.0);
        assert_eq!(target.stage_index(), 1);
        assert_eq!(
            target.popups().current(),
            Some(&Popup::Transition {
                sprite: "sprout".into()
            })
        );

        // Stage 2 has no sprite: the sprout popup is left alone
        target.continue_pouring(1.0);
        assert_eq!(target.stage_index(), 2);
        assert!(target.popups().is_visible());

        target.tick(3.0);
        assert!(!target.popups().is_visible());
    }

    #[test]
    fn test_fact_popup_on_completion() {
        let settings = GrowthSettings {
            fact: Some("Basil repels flies.".into()),
            ..GrowthSettings::default()
        };
        let (mut target, _) = plant(settings, 3);
        target.start_pouring();
        target.continue_pouring(4.0);
        target.continue_pouring(0.0);

        assert!(matches!(
            target.popups().current(),
            Some(Popup::Fact { dismissable: true, .. })
        ));
        assert!(target.dismiss_fact());
        assert!(!target.dismiss_fact());
        assert!(!target.popups().is_visible());
    }

    #[test]
    fn test_threshold_mismatch_makes_target_inert() {
        let settings = GrowthSettings {
            stage_thresholds: vec![0.5],
            ..GrowthSettings::default()
        };
        let (mut target, toggles) = plant(settings, 3);

        assert!(target.is_inert());
        assert!(matches!(
            target.fault(),
            Some(ConfigError::ThresholdMismatch {
                stages: 3,
                expected: 2,
                thresholds: 1
            })
        ));
        assert!(!target.gauge().is_visible());

        target.start_pouring();
        target.continue_pouring(10.0);
        assert!(!target.is_poured_on());
        assert!(target.accumulated_time().abs() < f32::EPSILON);
        assert_eq!(target.set_stage(1), Err(GrowthError::Inert));
        assert_eq!(active_count(&toggles), 1);
    }

    #[test]
    fn test_no_stages_is_inert() {
        let (target, _) = plant(GrowthSettings::default(), 0);
        assert_eq!(target.fault(), Some(&ConfigError::NoStages));
    }

    #[test]
    fn test_single_stage_is_complete_at_setup() {
        let settings = GrowthSettings {
            stage_thresholds: Vec::new(),
            ..GrowthSettings::default()
        };
        let (target, toggles) = plant(settings, 1);
        assert!(target.is_complete());
        assert!(toggles[0].is_active());
        assert!(!target.gauge().is_visible());
    }

    #[test]
    fn test_invalid_stage_rejected_without_change() {
        let (mut target, toggles) = three_stage();
        assert_eq!(
            target.set_stage(7),
            Err(GrowthError::InvalidStage {
                requested: 7,
                stage_count: 3
            })
        );
        assert_eq!(target.stage_index(), 0);
        assert!(toggles[0].is_active());
    }

    #[test]
    fn test_set_stage_cannot_move_backwards() {
        let (mut target, toggles) = three_stage();
        target.start_pouring();
        target.continue_pouring(4.0);
        target.continue_pouring(0.0);
        assert!(target.is_complete());

        assert_eq!(
            target.set_stage(1),
            Err(GrowthError::Regression {
                current: 2,
                requested: 1
            })
        );
        assert_eq!(target.stage_index(), 2);
        assert!(target.is_complete());
        assert!(toggles[2].is_active());
        assert_eq!(active_count(&toggles), 1);
    }

    #[test]
    fn test_set_stage_forward_then_complete_once() {
        let (mut target, toggles) = three_stage();
        let completions = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&completions);
        target
            .signals_mut()
            .growth_completed
            .connect(move |_| *sink.borrow_mut() += 1);

        assert_eq!(target.set_stage(1), Ok(()));
        assert!(!target.is_complete());
        assert_eq!(target.set_stage(2), Ok(()));
        assert_eq!(target.set_stage(2), Ok(()));

        assert_eq!(*completions.borrow(), 1);
        assert!(target.is_complete());
        assert!(toggles[2].is_active());
        assert_eq!(active_count(&toggles), 1);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let settings = GrowthSettings {
            transition_sprites: vec!["sprout".into()],
            ..GrowthSettings::default()
        };
        let (mut target, toggles) = plant(settings, 3);
        target.start_pouring();
        target.continue_pouring(2.5);
        assert_eq!(target.stage_index(), 1);
        assert!(target.popups().is_visible());

        target.reset();

        assert!(target.accumulated_time().abs() < f32::EPSILON);
        assert_eq!(target.stage_index(), 0);
        assert!(!target.is_complete());
        assert!(!target.is_poured_on());
        assert!(target.gauge().is_visible());
        assert!(target.gauge().value().abs() < f32::EPSILON);
        assert!(!target.popups().is_visible());
        assert_eq!(target.popups().pending_hide(), None);
        assert!(toggles[0].is_active());
        assert_eq!(active_count(&toggles), 1);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Start,
        Continue(f32),
        Stop,
        Reset,
        SetStage(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Start),
            (0.0f32..1.5).prop_map(Op::Continue),
            Just(Op::Stop),
            Just(Op::Reset),
            (0usize..4).prop_map(Op::SetStage),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_for_any_sequence(ops in prop::collection::vec(op(), 0..80)) {
            let (mut target, toggles) = three_stage();
            let mut last_stage = target.stage_index();

            for op in ops {
                let was_reset = matches!(op, Op::Reset);
                match op {
                    Op::Start => target.start_pouring(),
                    Op::Continue(dt) => {
                        target.continue_pouring(dt);
                    }
                    Op::Stop => target.stop_pouring(),
                    Op::Reset => target.reset(),
                    Op::SetStage(index) => {
                        let _ = target.set_stage(index);
                    }
                }

                let t = target.accumulated_time();
                prop_assert!(t >= 0.0 && t <= target.total_growth_time());
                if !was_reset {
                    prop_assert!(target.stage_index() >= last_stage);
                }
                prop_assert_eq!(target.is_complete(), target.stage_index() == 2);
                prop_assert_eq!(active_count(&toggles), 1);
                prop_assert!(toggles[target.stage_index()].is_active());
                last_stage = target.stage_index();
            }
        }

        #[test]
        fn prop_second_stop_has_no_effect(dt in 0.0f32..3.0) {
            let (mut target, _) = three_stage();
            target.start_pouring();
            target.continue_pouring(dt);
            target.stop_pouring();
            let time = target.accumulated_time();
            let stage = target.stage_index();
            let poured = target.is_poured_on();

            target.stop_pouring();
            prop_assert_eq!(target.accumulated_time(), time);
            prop_assert_eq!(target.stage_index(), stage);
            prop_assert_eq!(target.is_poured_on(), poured);
        }
    }
}
