//! Seams to the presentation layer.
//!
//! The simulation never draws anything. It flips these collaborators and
//! keeps its own model of what they should be showing, so a missing view
//! only loses the visual.

use std::cell::Cell;
use std::rc::Rc;

use crate::popup::Popup;
use crate::pour::{StreamFactory, TracingStreamFactory};

/// Something that can be switched on and off (a stage model, a button).
pub trait Toggle {
    /// Activates or deactivates the object.
    fn set_active(&mut self, active: bool);
}

/// A bar-style progress display.
pub trait GaugeView {
    /// Sets the value at which the bar is full.
    fn configure(&mut self, max: f32);

    /// Sets the current fill value.
    fn set_value(&mut self, value: f32);

    /// Shows or hides the bar.
    fn set_visible(&mut self, visible: bool);
}

/// A popup panel.
pub trait PopupView {
    /// Displays a popup, replacing anything shown before.
    fn show(&mut self, popup: &Popup);

    /// Hides the panel.
    fn hide(&mut self);

    /// Removes the dismiss control for good.
    fn remove_dismiss(&mut self);
}

/// A [`Toggle`] whose state can be read back through any clone.
#[derive(Debug, Clone, Default)]
pub struct SharedToggle(Rc<Cell<bool>>);

impl SharedToggle {
    /// Creates an inactive toggle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the toggle is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.0.get()
    }
}

impl Toggle for SharedToggle {
    fn set_active(&mut self, active: bool) {
        self.0.set(active);
    }
}

/// Supplies the views a garden is built with.
///
/// Optional views may be `None`; the plant or gauge then runs without a
/// display.
pub trait SceneViews {
    /// Creates the stream factory for the can.
    fn stream_factory(&mut self) -> Box<dyn StreamFactory>;

    /// Model for stage `index` of a plant.
    fn stage(&mut self, plant: &str, index: usize) -> Box<dyn Toggle>;

    /// Progress bar over a plant.
    fn plant_gauge(&mut self, plant: &str) -> Option<Box<dyn GaugeView>>;

    /// Popup panel over a plant.
    fn plant_popup(&mut self, plant: &str) -> Option<Box<dyn PopupView>>;

    /// The can's own pour gauge.
    fn pour_gauge(&mut self) -> Option<Box<dyn GaugeView>>;

    /// Control enabled once every plant is grown.
    fn completion_control(&mut self) -> Option<Box<dyn Toggle>>;
}

/// Views with no display: stage models are [`SharedToggle`]s and streams
/// only log.
#[derive(Debug, Default)]
pub struct HeadlessViews {
    stages: Vec<(String, SharedToggle)>,
    control: SharedToggle,
}

impl HeadlessViews {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the active stage model of a plant, if any.
    #[must_use]
    pub fn active_stage(&self, plant: &str) -> Option<usize> {
        self.stages
            .iter()
            .filter(|(name, _)| name == plant)
            .position(|(_, toggle)| toggle.is_active())
    }

    /// Number of active stage models of a plant.
    #[must_use]
    pub fn active_stage_count(&self, plant: &str) -> usize {
        self.stages
            .iter()
            .filter(|(name, toggle)| name == plant && toggle.is_active())
            .count()
    }

    /// Whether the completion control is active.
    #[must_use]
    pub fn control_active(&self) -> bool {
        self.control.is_active()
    }
}

impl SceneViews for HeadlessViews {
    fn stream_factory(&mut self) -> Box<dyn StreamFactory> {
        Box::new(TracingStreamFactory::default())
    }

    fn stage(&mut self, plant: &str, _index: usize) -> Box<dyn Toggle> {
        let toggle = SharedToggle::new();
        self.stages.push((plant.to_string(), toggle.clone()));
        Box::new(toggle)
    }

    fn plant_gauge(&mut self, _plant: &str) -> Option<Box<dyn GaugeView>> {
        None
    }

    fn plant_popup(&mut self, _plant: &str) -> Option<Box<dyn PopupView>> {
        None
    }

    fn pour_gauge(&mut self) -> Option<Box<dyn GaugeView>> {
        None
    }

    fn completion_control(&mut self) -> Option<Box<dyn Toggle>> {
        Some(Box::new(self.control.clone()))
    }
}
