//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{CacheOptions, DEFAULT_NAMESPACE, MAX_SIZE_CEILING};

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace partition served by this process
    pub namespace: String,
    /// Entry count at which the size-cap sweep starts evicting
    pub max_size: usize,
    /// Root directory for persistent storage; None = in-memory only
    pub storage_dir: Option<PathBuf>,
    /// Size-cap sweep interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_NAMESPACE` - Namespace (default: keyv-cache)
    /// - `CACHE_MAX_SIZE` - Size cap, at most 10000 (default: 10000)
    /// - `CACHE_STORAGE_DIR` - Persistent storage root (default: unset)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            namespace: env::var("CACHE_NAMESPACE")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.namespace),
            max_size: env::var("CACHE_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_size),
            storage_dir: env::var("CACHE_STORAGE_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Derives the cache construction options.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions::default()
            .with_namespace(self.namespace.clone())
            .with_max_size(self.max_size)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            max_size: MAX_SIZE_CEILING,
            storage_dir: None,
            sweep_interval: 60,
            server_port: 3000,
        }
    }
}
