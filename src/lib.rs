//! LRU Store - a namespaced, bounded LRU cache
//!
//! Keeps at most `max` entries per namespace in recency order and mirrors
//! every change into a pluggable backing store. An HTTP front end exposes
//! a single namespace.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use backend::{BackingStore, FileStore, MemoryStore};
pub use config::Config;
pub use error::{LruError, Result};
pub use store::{Entry, LruStore, StoreEvent, StoreOptions};
