//! LRU Store Module
//!
//! Bounded, namespace-addressed LRU cache mirrored into a backing store.

use serde::Deserialize;
use tracing::debug;

use crate::backend::{BackingStore, MemoryStore};
use crate::error::{LruError, Result};
use crate::store::{Entry, EventBus, RecencyList, StoreEvent, SubscriptionId};

// == Store Options ==
/// Construction parameters for an [`LruStore`].
///
/// Missing fields deserialize to their empty values and are rejected by
/// [`StoreOptions::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreOptions {
    /// Namespace the sequence is persisted under
    #[serde(default)]
    pub namespace: String,
    /// Maximum number of entries
    #[serde(default)]
    pub max: usize,
}

impl StoreOptions {
    pub fn new(namespace: impl Into<String>, max: usize) -> Self {
        Self {
            namespace: namespace.into(),
            max,
        }
    }

    /// Rejects an empty namespace or a zero capacity.
    pub fn validate(&self) -> Result<()> {
        if self.namespace.is_empty() || self.max == 0 {
            return Err(LruError::InvalidArgument(
                "namespace and max param can't be null".to_string(),
            ));
        }
        Ok(())
    }
}

// == LRU Store ==
/// Ordered key/value cache holding at most `max` entries.
///
/// Every structural change is written through to the backing store under
/// the configured namespace, then announced to subscribers.
#[derive(Debug)]
pub struct LruStore<V, S = MemoryStore<V>> {
    options: StoreOptions,
    store: S,
    entries: RecencyList<V>,
    events: EventBus,
}

impl<V> LruStore<V, MemoryStore<V>>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a store on the process-wide [`MemoryStore`] for `V`.
    ///
    /// Stores created this way with the same namespace share persisted
    /// state.
    pub fn new(options: StoreOptions) -> Result<Self> {
        Self::with_store(options, MemoryStore::global())
    }
}

impl<V, S> LruStore<V, S>
where
    V: Clone,
    S: BackingStore<V>,
{
    /// Creates a store on an explicit backing store.
    ///
    /// The persisted sequence for the namespace is loaded and, if it holds
    /// more than `max` entries, trimmed to its `max` most recent ones.
    pub fn with_store(options: StoreOptions, store: S) -> Result<Self> {
        options.validate()?;

        let mut entries = RecencyList::new();
        for entry in store.get(&options.namespace)?.unwrap_or_default() {
            entries.push_back(entry.key, entry.value);
        }

        let mut trimmed = 0;
        while entries.len() > options.max {
            entries.pop_front();
            trimmed += 1;
        }
        debug!(
            namespace = %options.namespace,
            loaded = entries.len(),
            trimmed,
            "lru store opened"
        );

        Ok(Self {
            options,
            store,
            entries,
            events: EventBus::new(),
        })
    }

    // == Set ==
    /// Inserts or overwrites `key`, making it the most recently used entry.
    ///
    /// Evicts the least recently used entry when the capacity is exceeded.
    /// Emits `Update` or `Add`, then `Remove` for an evicted key.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Result<V> {
        let key = key.into();
        let previous = self.entries.push_back(key.clone(), value.clone());

        let evicted = if self.entries.len() > self.options.max {
            self.entries.pop_front().map(|(evicted_key, _)| evicted_key)
        } else {
            None
        };

        self.sync()?;

        if previous.is_some() {
            self.events.emit(StoreEvent::Update(key));
        } else {
            self.events.emit(StoreEvent::Add(key));
        }
        if let Some(evicted_key) = evicted {
            debug!(namespace = %self.options.namespace, key = %evicted_key, "evicted");
            self.events.emit(StoreEvent::Remove(evicted_key));
        }

        Ok(value)
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A lookup of the entry that is already most recently used neither
    /// writes to the backing store nor emits `Hit`.
    pub fn get(&mut self, key: &str) -> Result<Option<V>> {
        if !self.entries.contains(key) {
            return Ok(None);
        }

        if !self.entries.is_back(key) {
            self.entries.move_to_back(key);
            self.sync()?;
            self.events.emit(StoreEvent::Hit(key.to_string()));
        }

        Ok(self.entries.get(key).cloned())
    }

    // == Remove ==
    /// Deletes `key`, returning its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Result<Option<V>> {
        let Some(value) = self.entries.remove(key) else {
            return Ok(None);
        };
        self.sync()?;
        Ok(Some(value))
    }

    // == Clear All ==
    /// Empties the store and deletes the namespace from the backing store.
    pub fn clear_all(&mut self) -> Result<()> {
        self.entries.clear();
        self.store.remove(&self.options.namespace)?;
        debug!(namespace = %self.options.namespace, "cleared");
        Ok(())
    }

    fn sync(&self) -> Result<()> {
        self.store.set(&self.options.namespace, self.entries())
    }
}

impl<V: Clone, S> LruStore<V, S> {
    // == Keys ==
    /// Keys from least to most recently used.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys()
    }

    /// Entries from least to most recently used.
    pub fn entries(&self) -> Vec<Entry<V>> {
        self.entries.to_pairs().into_iter().map(Entry::from).collect()
    }
}

impl<V, S> LruStore<V, S> {
    pub fn namespace(&self) -> &str {
        &self.options.namespace
    }

    pub fn max(&self) -> usize {
        self.options.max
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    /// Looks up `key` without touching recency.
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    // == Events ==
    /// Registers a listener for store events.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }
}
