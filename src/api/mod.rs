//! API Module
//!
//! HTTP handlers and routing that expose one namespace of the LRU store.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `GET /keys` - List keys in recency order
//! - `DELETE /clear` - Clear the namespace
//! - `GET /stats` - Get store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
