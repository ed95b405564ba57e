//! In-memory backing store, shareable across LRU stores.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::backend::BackingStore;
use crate::error::{LruError, Result};
use crate::store::Entry;

type Namespaces<V> = HashMap<String, Vec<Entry<V>>>;

/// One global store per value type.
static GLOBAL_STORES: OnceLock<Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>> =
    OnceLock::new();

// == Memory Store ==
/// Map of namespace to entry sequence behind a shared lock.
///
/// Clones are handles onto the same map.
pub struct MemoryStore<V> {
    namespaces: Arc<RwLock<Namespaces<V>>>,
}

impl<V> MemoryStore<V> {
    /// Creates a new, private, empty store.
    pub fn new() -> Self {
        Self {
            namespaces: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the process-wide store for `V`.
    ///
    /// Every call with the same value type hands out a handle to the same
    /// map, so stores built with [`LruStore::new`](crate::store::LruStore::new)
    /// share state by namespace.
    pub fn global() -> Self
    where
        V: Send + Sync + 'static,
    {
        let registry = GLOBAL_STORES.get_or_init(|| Mutex::new(HashMap::new()));
        let mut stores = registry.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = stores
            .entry(TypeId::of::<V>())
            .or_insert_with(|| Box::new(MemoryStore::<V>::new()));

        match entry.downcast_ref::<MemoryStore<V>>() {
            Some(store) => store.clone(),
            None => MemoryStore::new(),
        }
    }

    /// Lists the namespaces currently holding a sequence.
    pub fn namespaces(&self) -> Result<Vec<String>> {
        let map = self.namespaces.read().map_err(poisoned)?;
        let mut names: Vec<String> = map.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl<V> Clone for MemoryStore<V> {
    fn clone(&self) -> Self {
        Self {
            namespaces: Arc::clone(&self.namespaces),
        }
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for MemoryStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl<V: Clone> BackingStore<V> for MemoryStore<V> {
    fn get(&self, namespace: &str) -> Result<Option<Vec<Entry<V>>>> {
        let map = self.namespaces.read().map_err(poisoned)?;
        Ok(map.get(namespace).cloned())
    }

    fn set(&self, namespace: &str, entries: Vec<Entry<V>>) -> Result<()> {
        debug!(namespace, len = entries.len(), "memory store set");
        let mut map = self.namespaces.write().map_err(poisoned)?;
        map.insert(namespace.to_string(), entries);
        Ok(())
    }

    fn remove(&self, namespace: &str) -> Result<()> {
        debug!(namespace, "memory store remove");
        let mut map = self.namespaces.write().map_err(poisoned)?;
        map.remove(namespace);
        Ok(())
    }
}

fn poisoned<T>(_: PoisonError<T>) -> LruError {
    LruError::Backend("memory store lock poisoned".to_string())
}
