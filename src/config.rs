//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::store::StoreOptions;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace served by the HTTP front end
    pub namespace: String,
    /// Maximum number of entries the store can hold
    pub max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Directory for the file backing store; in-memory when unset
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_NAMESPACE` - Namespace to serve (default: "default")
    /// - `LRU_MAX` - Maximum store entries (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATA_DIR` - Persist namespaces as JSON files here (default: in-memory)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            namespace: env::var("LRU_NAMESPACE")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.namespace),
            max_entries: env::var("LRU_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            data_dir: env::var_os("DATA_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Options for the store this configuration describes.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::new(self.namespace.clone(), self.max_entries)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
            max_entries: 1000,
            server_port: 3000,
            data_dir: None,
        }
    }
}
