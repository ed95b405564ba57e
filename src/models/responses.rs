//! Response DTOs for the store API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::store::StoreStats;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
            value,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
    /// The value it held
    pub value: Value,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
            value,
        }
    }
}

/// Response body for the keys listing (GET /keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub namespace: String,
    pub max: usize,
    pub length: usize,
    /// Keys from least to most recently used
    pub keys: Vec<String>,
}

/// Response body for the clear operation (DELETE /clear)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub namespace: String,
}

impl ClearResponse {
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            message: format!("Namespace '{}' cleared", namespace),
            namespace,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub adds: u64,
    pub updates: u64,
    pub hits: u64,
    pub misses: u64,
    pub promotions: u64,
    pub evictions: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            adds: stats.adds,
            updates: stats.updates,
            hits: stats.hits,
            misses: stats.misses,
            promotions: stats.promotions,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
