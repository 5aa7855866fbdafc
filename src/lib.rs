//! Keyv Cache - A namespaced key-value cache with TTL expiry
//!
//! Runs the same cache contract over persistent storage when the host has
//! it, and over process memory when it does not.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use cache::{create_cache, BackendKind, CacheHandle, CacheHandlers, CacheOptions};
pub use config::Config;
pub use error::{CacheError, Result};
pub use storage::{CacheStorage, FileSystemStorage, MemoryStorage, StorageHost};
pub use tasks::spawn_sweep_task;
