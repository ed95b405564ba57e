//! Store Events Module
//!
//! Synchronous publish/subscribe for store lifecycle notifications.

use std::fmt;

// == Store Event ==
/// Notification emitted after a state change has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A new key was inserted
    Add(String),
    /// An existing key was overwritten
    Update(String),
    /// A key was evicted to respect the capacity
    Remove(String),
    /// A lookup moved a key to the most recently used position
    Hit(String),
}

impl StoreEvent {
    /// Returns the event name (`add`, `update`, `remove`, `hit`).
    pub fn kind(&self) -> &'static str {
        match self {
            StoreEvent::Add(_) => "add",
            StoreEvent::Update(_) => "update",
            StoreEvent::Remove(_) => "remove",
            StoreEvent::Hit(_) => "hit",
        }
    }

    /// Returns the key the event refers to.
    pub fn key(&self) -> &str {
        match self {
            StoreEvent::Add(key)
            | StoreEvent::Update(key)
            | StoreEvent::Remove(key)
            | StoreEvent::Hit(key) => key,
        }
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.key())
    }
}

// == Subscription Id ==
/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent) + Send + Sync>;

// == Event Bus ==
/// Ordered list of listeners, invoked in registration order.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drops a listener. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: StoreEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
