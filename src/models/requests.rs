//! Request DTOs for the store API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The key to store the value under
/// - `value`: Any JSON value
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The store key
    pub key: String,
    /// The value to store
    pub value: Value,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}
