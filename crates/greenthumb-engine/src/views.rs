//! Views that write what a player would see to the log.

use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, trace};

use greenthumb_gameplay::{
    GaugeView, Popup, PopupView, SceneViews, StreamFactory, Toggle, TracingStreamFactory,
};

/// Counts of visible changes, shared by every view of a scene.
#[derive(Debug, Default)]
pub struct ViewStats {
    stage_switches: Cell<u32>,
    popups_shown: Cell<u32>,
    dismiss_removed: Cell<u32>,
    control_enabled: Cell<bool>,
}

impl ViewStats {
    /// Stage models switched on.
    #[must_use]
    pub fn stage_switches(&self) -> u32 {
        self.stage_switches.get()
    }

    /// Popups displayed.
    #[must_use]
    pub fn popups_shown(&self) -> u32 {
        self.popups_shown.get()
    }

    /// Dismiss controls removed.
    #[must_use]
    pub fn dismiss_removed(&self) -> u32 {
        self.dismiss_removed.get()
    }

    /// Whether the completion control is on.
    #[must_use]
    pub fn control_enabled(&self) -> bool {
        self.control_enabled.get()
    }

    fn bump(counter: &Cell<u32>) {
        counter.set(counter.get() + 1);
    }
}

struct LogStage {
    plant: String,
    index: usize,
    stats: Rc<ViewStats>,
}

impl Toggle for LogStage {
    fn set_active(&mut self, active: bool) {
        if active {
            ViewStats::bump(&self.stats.stage_switches);
            info!("{} shows stage {}", self.plant, self.index);
        } else {
            trace!("{} hides stage {}", self.plant, self.index);
        }
    }
}

struct LogGauge {
    label: String,
    max: f32,
}

impl GaugeView for LogGauge {
    fn configure(&mut self, max: f32) {
        self.max = max;
    }

    fn set_value(&mut self, value: f32) {
        trace!("{} bar {:.2}/{:.2}", self.label, value, self.max);
    }

    fn set_visible(&mut self, visible: bool) {
        debug!(
            "{} bar {}",
            self.label,
            if visible { "shown" } else { "hidden" }
        );
    }
}

struct LogPopup {
    plant: String,
    stats: Rc<ViewStats>,
}

impl PopupView for LogPopup {
    fn show(&mut self, popup: &Popup) {
        ViewStats::bump(&self.stats.popups_shown);
        match popup {
            Popup::Transition { sprite } => info!("{} popup: [{}]", self.plant, sprite),
            Popup::Fact { text, dismissable } => {
                info!("{} fact: {} (dismissable: {})", self.plant, text, dismissable);
            },
        }
    }

    fn hide(&mut self) {
        debug!("{} popup hidden", self.plant);
    }

    fn remove_dismiss(&mut self) {
        ViewStats::bump(&self.stats.dismiss_removed);
        debug!("{} dismiss control removed", self.plant);
    }
}

struct LogControl {
    stats: Rc<ViewStats>,
}

impl Toggle for LogControl {
    fn set_active(&mut self, active: bool) {
        self.stats.control_enabled.set(active);
        if active {
            info!("Garden complete: continue button enabled");
        }
    }
}

/// [`SceneViews`] that log through `tracing`.
#[derive(Debug, Default)]
pub struct LoggingViews {
    stats: Rc<ViewStats>,
}

impl LoggingViews {
    /// Creates the views.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared counters.
    #[must_use]
    pub fn stats(&self) -> Rc<ViewStats> {
        Rc::clone(&self.stats)
    }
}

impl SceneViews for LoggingViews {
    fn stream_factory(&mut self) -> Box<dyn StreamFactory> {
        Box::new(TracingStreamFactory::default())
    }

    fn stage(&mut self, plant: &str, index: usize) -> Box<dyn Toggle> {
        Box::new(LogStage {
            plant: plant.to_string(),
            index,
            stats: Rc::clone(&self.stats),
        })
    }

    fn plant_gauge(&mut self, plant: &str) -> Option<Box<dyn GaugeView>> {
        Some(Box::new(LogGauge {
            label: plant.to_string(),
            max: 0.0,
        }))
    }

    fn plant_popup(&mut self, plant: &str) -> Option<Box<dyn PopupView>> {
        Some(Box::new(LogPopup {
            plant: plant.to_string(),
            stats: Rc::clone(&self.stats),
        }))
    }

    fn pour_gauge(&mut self) -> Option<Box<dyn GaugeView>> {
        Some(Box::new(LogGauge {
            label: "Watering can".to_string(),
            max: 0.0,
        }))
    }

    fn completion_control(&mut self) -> Option<Box<dyn Toggle>> {
        Some(Box::new(LogControl {
            stats: Rc::clone(&self.stats),
        }))
    }
}
