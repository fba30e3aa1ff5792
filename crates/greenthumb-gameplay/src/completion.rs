//! One-shot reaction to every watched plant being fully grown.

use std::fmt;
use tracing::{error, info};

use greenthumb_common::EntityId;

use crate::events::Signal;
use crate::registry::TargetRegistry;
use crate::view::Toggle;

/// Watches a fixed set of plants and fires once when all are complete.
pub struct CompletionAggregator {
    watched: Vec<EntityId>,
    fired: bool,
    control: Option<Box<dyn Toggle>>,
    all_complete: Signal<()>,
}

impl CompletionAggregator {
    /// Creates an aggregator. `control` is activated when it fires.
    ///
    /// With nothing to watch the aggregator disables itself.
    #[must_use]
    pub fn new(watched: Vec<EntityId>, control: Option<Box<dyn Toggle>>) -> Self {
        if watched.is_empty() {
            error!("Completion aggregator has no plants to watch; disabled");
        }
        let mut aggregator = Self {
            watched,
            fired: false,
            control,
            all_complete: Signal::new(),
        };
        if let Some(control) = aggregator.control.as_mut() {
            control.set_active(false);
        }
        aggregator
    }

    /// Plants being watched.
    #[must_use]
    pub fn watched(&self) -> &[EntityId] {
        &self.watched
    }

    /// Whether the aggregator runs.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.watched.is_empty()
    }

    /// Whether it has fired.
    #[must_use]
    pub const fn has_fired(&self) -> bool {
        self.fired
    }

    /// Fires once when every watched plant is complete.
    pub fn on_all_complete(&mut self) -> &mut Signal<()> {
        &mut self.all_complete
    }

    /// Polls the plants. Returns true on the tick it fires.
    pub fn tick(&mut self, targets: &TargetRegistry) -> bool {
        if self.fired || !self.is_enabled() || !targets.all_complete(&self.watched) {
            return false;
        }
        self.fired = true;
        info!("All {} plants fully grown", self.watched.len());
        if let Some(control) = self.control.as_mut() {
            control.set_active(true);
        }
        self.all_complete.emit(&());
        true
    }
}

impl fmt::Debug for CompletionAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionAggregator")
            .field("watched", &self.watched)
            .field("fired", &self.fired)
            .field("has_control", &self.control.is_some())
            .field("all_complete", &self.all_complete)
            .finish()
    }
}
