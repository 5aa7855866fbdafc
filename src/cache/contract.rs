//! The cache contract shared by every backend.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::Milliseconds;
use crate::error::Result;

/// Bounds a type needs to be cached by either backend.
pub trait CacheValue: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> CacheValue for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

// == Cache Handlers ==
/// Operations every cache backend supports.
///
/// Reads never fail because an entry expired or its payload is corrupt;
/// those cases are misses. Storage failures propagate.
#[async_trait]
pub trait CacheHandlers<T: Send + 'static>: Send + Sync {
    /// Stores `value` under `key` for `ttl` milliseconds, replacing any
    /// previous entry. Returns `"OK"`.
    async fn set(&self, key: &str, value: T, ttl: Milliseconds) -> Result<String>;

    /// Returns the live value under `key`. Expired entries are deleted.
    async fn get(&self, key: &str) -> Result<Option<T>>;

    /// Returns true if `get` would return a value.
    async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Deletes the entry under `key`. Returns whether one existed.
    async fn remove(&self, key: &str) -> Result<bool>;

    /// Deletes every entry whose storage key contains `pattern`.
    ///
    /// Returns one result per attempted deletion, in enumeration order.
    async fn remove_pattern(&self, pattern: &str) -> Result<Vec<bool>>;

    /// Lists the storage keys of live entries.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Deletes the whole namespace.
    async fn clear(&self) -> Result<bool>;
}
