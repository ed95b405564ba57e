//! Backing Store Module
//!
//! Defines the persistence contract an [`LruStore`](crate::store::LruStore)
//! mirrors its ordered sequence into, plus two implementations.
//!
//! # Example
//!
//! ```ignore
//! use lru_store::backend::{BackingStore, FileStore, MemoryStore};
//!
//! // Process-wide in-memory store (the default)
//! let memory: MemoryStore<String> = MemoryStore::global();
//!
//! // Or one JSON file per namespace
//! let files = FileStore::open("/var/lib/lru")?;
//! ```

mod file;
mod memory;

use std::sync::Arc;

use crate::error::Result;
use crate::store::Entry;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Trait for namespace-addressed persistence of an ordered entry sequence.
///
/// Sequences are stored oldest first. Methods take `&self` so one store can
/// back any number of LRU stores; implementations provide their own
/// interior mutability.
pub trait BackingStore<V> {
    /// Loads the sequence stored under `namespace`.
    ///
    /// Returns `Ok(None)` if nothing is stored there.
    fn get(&self, namespace: &str) -> Result<Option<Vec<Entry<V>>>>;

    /// Replaces the sequence stored under `namespace`.
    fn set(&self, namespace: &str, entries: Vec<Entry<V>>) -> Result<()>;

    /// Deletes `namespace` entirely. Removing an absent namespace is not an error.
    fn remove(&self, namespace: &str) -> Result<()>;
}

impl<V, S> BackingStore<V> for Arc<S>
where
    S: BackingStore<V> + ?Sized,
{
    fn get(&self, namespace: &str) -> Result<Option<Vec<Entry<V>>>> {
        (**self).get(namespace)
    }

    fn set(&self, namespace: &str, entries: Vec<Entry<V>>) -> Result<()> {
        (**self).set(namespace, entries)
    }

    fn remove(&self, namespace: &str) -> Result<()> {
        (**self).remove(namespace)
    }
}
