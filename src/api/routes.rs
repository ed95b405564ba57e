//! API Routes
//!
//! Configures the Axum router with all store endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_handler, get_handler, health_handler, keys_handler, set_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a key-value pair
/// - `GET /get/:key` - Retrieve a value by key
/// - `DELETE /del/:key` - Delete a key
/// - `GET /keys` - List keys, least recently used first
/// - `DELETE /clear` - Drop every entry and the persisted namespace
/// - `GET /stats` - Get store statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/keys", get(keys_handler))
        .route("/clear", delete(clear_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
