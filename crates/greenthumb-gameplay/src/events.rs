//! Observer signals and the garden event bus.
//!
//! Components own [`Signal`]s for the notifications they raise. Listeners
//! are called synchronously, in the order they were connected. The
//! [`EventBus`] collects a flat [`GardenEvent`] stream that a driver can
//! drain once per tick.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::{trace, warn};

use greenthumb_common::EntityId;

type Listener<T> = Box<dyn FnMut(&T)>;

/// An ordered list of callbacks for one notification.
pub struct Signal<T> {
    listeners: Vec<Listener<T>>,
}

impl<T> Signal<T> {
    /// Creates a signal with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Registers a listener. Listeners run in registration order.
    pub fn connect<F>(&mut self, listener: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Calls every listener with the value.
    pub fn emit(&mut self, value: &T) {
        for listener in &mut self.listeners {
            listener(value);
        }
    }

    /// Number of connected listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Removes every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Everything observable that happens in a garden session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GardenEvent {
    /// The can tipped past the pour threshold and a stream was spawned
    StreamBegan,
    /// The can was righted and the stream released
    StreamEnded,
    /// Water started landing on a plant
    PouringStarted {
        /// Plant
        target: EntityId,
    },
    /// Water stopped landing on a plant
    PouringStopped {
        /// Plant
        target: EntityId,
    },
    /// A plant moved to a new growth stage
    StageAdvanced {
        /// Plant
        target: EntityId,
        /// New stage index
        stage: usize,
    },
    /// A plant reached its final stage
    GrowthComplete {
        /// Plant
        target: EntityId,
    },
    /// The player dismissed a plant's fact popup
    FactDismissed {
        /// Plant
        target: EntityId,
    },
    /// The pour gauge filled up
    ProgressFull,
    /// Every watched plant is fully grown
    AllComplete,
    /// The can took on water at a refill station
    Refilled {
        /// Units now in the can
        units: u32,
    },
}

/// Bounded fan-in queue of [`GardenEvent`]s.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for broadcasting events
    sender: Sender<GardenEvent>,
    /// Receiver for collecting events
    receiver: Receiver<GardenEvent>,
    /// Channel capacity
    capacity: usize,
    /// Events lost to a full channel
    dropped: Rc<Cell<u64>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
            dropped: Rc::new(Cell::new(0)),
        }
    }

    /// Publishes an event to the bus.
    ///
    /// Never blocks. When the channel is full the event is dropped, logged
    /// and counted in [`dropped_count`](Self::dropped_count).
    pub fn publish(&self, event: GardenEvent) {
        Self::send(&self.sender, &self.dropped, event);
    }

    /// Builds a signal listener that republishes onto this bus.
    pub fn forwarder<T, M>(&self, map: M) -> impl FnMut(&T) + 'static
    where
        M: Fn(&T) -> GardenEvent + 'static,
    {
        let sender = self.sender.clone();
        let dropped = Rc::clone(&self.dropped);
        move |value| Self::send(&sender, &dropped, map(value))
    }

    fn send(sender: &Sender<GardenEvent>, dropped: &Cell<u64>, event: GardenEvent) {
        match sender.try_send(event) {
            Ok(()) => {},
            Err(TrySendError::Full(event)) => {
                dropped.set(dropped.get() + 1);
                warn!("Event bus full, dropping {:?}", event);
            },
            Err(TrySendError::Disconnected(event)) => {
                trace!("Event bus gone, dropping {:?}", event);
            },
        }
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<GardenEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Events dropped because nobody drained the bus in time.
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.get()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_signal_delivers_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut signal: Signal<u32> = Signal::new();

        let first = Rc::clone(&log);
        signal.connect(move |v| first.borrow_mut().push(("first", *v)));
        let second = Rc::clone(&log);
        signal.connect(move |v| second.borrow_mut().push(("second", *v)));

        signal.emit(&7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
        assert_eq!(signal.listener_count(), 2);
    }

    #[test]
    fn test_bus_forwarder() {
        let bus = EventBus::new(8);
        let mut signal: Signal<EntityId> = Signal::new();
        signal.connect(bus.forwarder(|id: &EntityId| GardenEvent::GrowthComplete { target: *id }));

        let id = EntityId::from_raw(42);
        signal.emit(&id);

        assert_eq!(bus.pending_count(), 1);
        assert_eq!(bus.drain(), vec![GardenEvent::GrowthComplete { target: id }]);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_bus_drops_when_full() {
        let bus = EventBus::new(2);
        for _ in 0..5 {
            bus.publish(GardenEvent::ProgressFull);
        }
        assert_eq!(bus.drain().len(), 2);
        assert_eq!(bus.dropped_count(), 3);
    }

    #[test]
    fn test_forwarder_counts_drops() {
        let bus = EventBus::new(1);
        let mut signal: Signal<()> = Signal::new();
        signal.connect(bus.forwarder(|_: &()| GardenEvent::AllComplete));

        signal.emit(&());
        signal.emit(&());

        assert_eq!(bus.dropped_count(), 1);
        assert_eq!(bus.drain(), vec![GardenEvent::AllComplete]);

        signal.emit(&());
        assert_eq!(bus.pending_count(), 1);
        assert_eq!(bus.dropped_count(), 1);
    }
}
