//! Store Entry Module
//!
//! Defines the key/value pair persisted, in recency order, per namespace.

use serde::{Deserialize, Serialize};

// == Entry ==
/// A single cached pair. Identity is the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<V> {
    /// The cache key
    pub key: String,
    /// The opaque payload
    pub value: V,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates a new entry.
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl<V> From<(String, V)> for Entry<V> {
    fn from((key, value): (String, V)) -> Self {
        Self { key, value }
    }
}
