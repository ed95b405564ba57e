//! API Handlers
//!
//! HTTP request handlers for each store endpoint.

use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::backend::{BackingStore, FileStore, MemoryStore};
use crate::config::Config;
use crate::error::{LruError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, GetResponse, HealthResponse, KeysResponse, SetRequest,
    SetResponse, StatsResponse,
};
use crate::store::{LruStore, StoreOptions, StoreStats};

/// Backing store shared by the served namespace.
pub type SharedBackend = Arc<dyn BackingStore<Value> + Send + Sync>;

/// The store type served over HTTP.
pub type ServerStore = LruStore<Value, SharedBackend>;

/// Application state shared across all handlers.
///
/// The store itself is single-threaded, so it sits behind an async lock.
#[derive(Clone)]
pub struct AppState {
    /// Lock-guarded LRU store
    pub store: Arc<RwLock<ServerStore>>,
    /// Counters fed by store events and lookups
    pub stats: Arc<Mutex<StoreStats>>,
}

impl AppState {
    /// Wraps `store` and subscribes the stats recorder to its events.
    pub fn new(mut store: ServerStore) -> Self {
        let stats = Arc::new(Mutex::new(StoreStats::new()));
        let recorder = Arc::clone(&stats);
        store.subscribe(move |event| {
            recorder
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .record(event);
        });

        Self {
            store: Arc::new(RwLock::new(store)),
            stats,
        }
    }

    /// Builds state on a private in-memory backing store.
    pub fn in_memory(options: StoreOptions) -> Result<Self> {
        let backend: SharedBackend = Arc::new(MemoryStore::<Value>::new());
        Ok(Self::new(LruStore::with_store(options, backend)?))
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses a [`FileStore`] when `data_dir` is set, the process-wide
    /// [`MemoryStore`] otherwise.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend: SharedBackend = match &config.data_dir {
            Some(dir) => {
                info!("Persisting namespaces under {}", dir.display());
                Arc::new(FileStore::open(dir)?)
            }
            None => Arc::new(MemoryStore::<Value>::global()),
        };
        let store = LruStore::with_store(config.store_options(), backend)?;
        Ok(Self::new(store))
    }

    fn with_stats<T>(&self, f: impl FnOnce(&mut StoreStats) -> T) -> T {
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut stats)
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair, evicting the least recently used entry if full.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(LruError::InvalidArgument(error_msg));
    }

    let mut store = state.store.write().await;
    let value = store.set(req.key.clone(), req.value)?;

    Ok(Json(SetResponse::new(req.key, value)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value and marks it most recently used.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a hit reorders the store
    let mut store = state.store.write().await;
    match store.get(&key)? {
        Some(value) => {
            state.with_stats(StoreStats::record_hit);
            Ok(Json(GetResponse::new(key, value)))
        }
        None => {
            state.with_stats(StoreStats::record_miss);
            Err(LruError::NotFound(key))
        }
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut store = state.store.write().await;
    match store.remove(&key)? {
        Some(value) => Ok(Json(DeleteResponse::new(key, value))),
        None => Err(LruError::NotFound(key)),
    }
}

/// Handler for GET /keys
///
/// Lists keys from least to most recently used.
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let store = state.store.read().await;
    Json(KeysResponse {
        namespace: store.namespace().to_string(),
        max: store.max(),
        length: store.len(),
        keys: store.keys(),
    })
}

/// Handler for DELETE /clear
///
/// Empties the store and drops its namespace from the backing store.
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let mut store = state.store.write().await;
    store.clear_all()?;
    info!("Cleared namespace {}", store.namespace());

    Ok(Json(ClearResponse::new(store.namespace())))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let total_entries = state.store.read().await.len();
    let stats = state.with_stats(|stats| {
        stats.set_total_entries(total_entries);
        stats.clone()
    });

    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::assert_err;

    fn test_state(max: usize) -> AppState {
        AppState::in_memory(StoreOptions::new("handlers", max)).unwrap()
    }

    fn set_request(key: &str, value: Value) -> Json<SetRequest> {
        Json(SetRequest {
            key: key.to_string(),
            value,
        })
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state(10);

        let result = set_handler(State(state.clone()), set_request("tree", json!(10))).await;
        assert!(result.is_ok());

        let response = get_handler(State(state.clone()), Path("tree".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!(10));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state(10);

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(LruError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state(10);
        let _ = set_handler(State(state.clone()), set_request("to_delete", json!("v")))
            .await
            .unwrap();

        let response = delete_handler(State(state.clone()), Path("to_delete".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!("v"));

        let result = delete_handler(State(state), Path("to_delete".to_string())).await;
        assert_err!(result);
    }

    #[tokio::test]
    async fn test_keys_and_clear_handlers() {
        let state = test_state(2);
        for key in ["tree", "jenny", "vicanso"] {
            let _ = set_handler(State(state.clone()), set_request(key, json!(key)))
                .await
                .unwrap();
        }

        let keys = keys_handler(State(state.clone())).await;
        assert_eq!(keys.keys, vec!["jenny", "vicanso"]);
        assert_eq!(keys.length, 2);
        assert_eq!(keys.max, 2);

        assert!(clear_handler(State(state.clone())).await.is_ok());
        let keys = keys_handler(State(state)).await;
        assert!(keys.keys.is_empty());
    }

    #[tokio::test]
    async fn test_stats_handler_counts_events_and_lookups() {
        let state = test_state(2);
        for key in ["a", "b", "c"] {
            let _ = set_handler(State(state.clone()), set_request(key, json!(1)))
                .await
                .unwrap();
        }
        let _ = set_handler(State(state.clone()), set_request("b", json!(2)))
            .await
            .unwrap();
        let _ = get_handler(State(state.clone()), Path("c".to_string()))
            .await
            .unwrap();
        let _ = get_handler(State(state.clone()), Path("a".to_string())).await;

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.adds, 3);
        assert_eq!(stats.updates, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.promotions, 1);
        assert_eq!(stats.total_entries, 2);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = test_state(10);

        let result = set_handler(State(state), set_request("", json!("value"))).await;
        assert!(matches!(result, Err(LruError::InvalidArgument(_))));
    }

    #[test]
    fn test_from_config_rejects_zero_max() {
        let config = Config {
            max_entries: 0,
            ..Config::default()
        };
        assert!(matches!(
            AppState::from_config(&config),
            Err(LruError::InvalidArgument(_))
        ));
    }
}
