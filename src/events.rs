//! Repository change notifications
//!
//! Typed replacement for a stringly-keyed on/emit bus: one subscriber list,
//! kind-filtered, invoked synchronously in registration order. The
//! presentation layer subscribes to re-render after mutations; the core
//! never depends on a listener's result.

use crate::item::Item;

/// Subscription key for [`RepositoryEvent`] payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ItemAdded,
    ItemUpdated,
    ItemDeleted,
    AllItemsReset,
    AllItemsDeleted,
}

/// A committed repository mutation. Item payloads are snapshots.
#[derive(Debug, Clone)]
pub enum RepositoryEvent {
    ItemAdded(Item),
    ItemUpdated(Item),
    ItemDeleted(Item),
    AllItemsReset,
    AllItemsDeleted,
}

impl RepositoryEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            RepositoryEvent::ItemAdded(_) => EventKind::ItemAdded,
            RepositoryEvent::ItemUpdated(_) => EventKind::ItemUpdated,
            RepositoryEvent::ItemDeleted(_) => EventKind::ItemDeleted,
            RepositoryEvent::AllItemsReset => EventKind::AllItemsReset,
            RepositoryEvent::AllItemsDeleted => EventKind::AllItemsDeleted,
        }
    }
}

type Listener = Box<dyn FnMut(&RepositoryEvent)>;

/// Subscriber registry. Single-threaded, like the rest of the core.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(EventKind, Listener)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register `listener` for `kind`. Listeners for the same kind fire in
    /// registration order.
    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&RepositoryEvent) + 'static,
    {
        self.listeners.push((kind, Box::new(listener)));
    }

    pub(crate) fn emit(&mut self, event: &RepositoryEvent) {
        let kind = event.kind();
        for (subscribed, listener) in self.listeners.iter_mut() {
            if *subscribed == kind {
                listener(event);
            }
        }
    }
}
