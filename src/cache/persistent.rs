//! Persistent Backend
//!
//! Cache contract on top of a host [`CacheStorage`], one storage namespace
//! per cache. Every operation reopens the namespace, so a `clear` from
//! another handle is observed immediately.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{
    canonicalize, current_timestamp_ms, decode, encode, is_live, CacheHandlers, CacheOptions,
    CacheValue, Milliseconds,
};
use crate::error::Result;
use crate::storage::{NamespaceHandle, StorageHost};

// == Persistent Cache ==
/// Cache backend that stores envelopes in host-provided storage.
pub struct PersistentCache<T> {
    host: StorageHost,
    namespace: String,
    max_size: usize,
    _value: PhantomData<fn() -> T>,
}

impl<T> PersistentCache<T> {
    // == Constructor ==
    /// Creates a backend over `host`.
    ///
    /// Never fails; a host without storage surfaces
    /// [`CacheError::UnsupportedEnvironment`](crate::error::CacheError::UnsupportedEnvironment)
    /// on first use.
    pub fn new(host: StorageHost, options: &CacheOptions) -> Self {
        let options = options.clone().normalized();
        Self {
            host,
            namespace: options.namespace,
            max_size: options.max_size,
            _value: PhantomData,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the storage key for `key` in this cache's namespace.
    pub fn make_key(&self, key: &str) -> String {
        canonicalize(key, &self.namespace)
    }

    async fn open(&self) -> Result<Arc<dyn NamespaceHandle>> {
        self.host.caches()?.open(&self.namespace).await
    }

    // == Sanitize ==
    /// Enforces the size cap.
    ///
    /// When the namespace holds `max_size` or more records, deletes the
    /// oldest enumerated one and returns its key.
    pub async fn sanitize(&self) -> Result<Option<String>> {
        let cache = self.open().await?;
        let keys = cache.keys().await?;
        if keys.len() < self.max_size {
            return Ok(None);
        }

        match keys.into_iter().next() {
            Some(oldest) => {
                cache.delete(&oldest).await?;
                Ok(Some(oldest))
            }
            None => Ok(None),
        }
    }

    /// Best-effort delete of a stale record; failures are only logged.
    async fn discard(&self, cache: &dyn NamespaceHandle, key: &str) {
        if let Err(e) = cache.delete(key).await {
            debug!("Failed to discard stale cache record {}: {}", key, e);
        }
    }
}

impl<T> Clone for PersistentCache<T> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            namespace: self.namespace.clone(),
            max_size: self.max_size,
            _value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for PersistentCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentCache")
            .field("host", &self.host)
            .field("namespace", &self.namespace)
            .field("max_size", &self.max_size)
            .finish()
    }
}

#[async_trait]
impl<T: CacheValue> CacheHandlers<T> for PersistentCache<T> {
    async fn set(&self, key: &str, value: T, ttl: Milliseconds) -> Result<String> {
        let record = encode(&value, ttl, current_timestamp_ms())?;
        let cache = self.open().await?;
        cache.put(&self.make_key(key), record).await?;
        Ok("OK".to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<T>> {
        let key = self.make_key(key);
        let cache = self.open().await?;

        let Some(record) = cache.match_key(&key).await? else {
            return Ok(None);
        };

        if is_live(&record, current_timestamp_ms()) {
            if let Some(value) = decode(&record) {
                return Ok(Some(value));
            }
        } else {
            debug!("Lazily evicting expired cache record {}", key);
        }

        self.discard(cache.as_ref(), &key).await;
        Ok(None)
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let cache = self.open().await?;
        cache.delete(&self.make_key(key)).await
    }

    async fn remove_pattern(&self, pattern: &str) -> Result<Vec<bool>> {
        let cache = self.open().await?;
        let keys = cache.keys().await?;

        let mut removed = Vec::new();
        for key in keys.iter().filter(|k| k.contains(pattern)) {
            removed.push(cache.delete(key).await?);
        }
        Ok(removed)
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let cache = self.open().await?;
        let now = current_timestamp_ms();

        Ok(cache
            .records()
            .await?
            .into_iter()
            .filter(|(_, record)| is_live(record, now))
            .map(|(key, _)| key)
            .collect())
    }

    async fn clear(&self) -> Result<bool> {
        self.host.caches()?.delete(&self.namespace).await
    }
}
