//! Store Module
//!
//! Provides the namespaced LRU store, its recency list and event plumbing.

mod entry;
mod events;
mod lru_store;
mod order;
mod stats;


// Re-export public types
pub use entry::Entry;
pub use events::{EventBus, StoreEvent, SubscriptionId};
pub use lru_store::{LruStore, StoreOptions};
pub use order::RecencyList;
pub use stats::StoreStats;
