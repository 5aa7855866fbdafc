//! Backend Selection
//!
//! [`create_cache`] checks the host once and wraps the chosen backend in a
//! [`CacheHandle`], which every caller uses the same way.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::cache::stats::StatsRecorder;
use crate::cache::{
    CacheHandlers, CacheOptions, CacheStats, CacheValue, Milliseconds, PersistentCache,
    TransientCache,
};
use crate::error::Result;
use crate::storage::StorageHost;

// == Backend Kind ==
/// Which backend a [`CacheHandle`] was built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    Persistent,
    Transient,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Persistent => "persistent",
            BackendKind::Transient => "transient",
        }
    }
}

#[derive(Debug)]
enum Backend<T> {
    Persistent(PersistentCache<T>),
    Transient(TransientCache<T>),
}

// == Cache Handle ==
/// A cache bound to one namespace and one backend for its whole lifetime.
#[derive(Debug)]
pub struct CacheHandle<T> {
    backend: Backend<T>,
    stats: StatsRecorder,
}

// == Create Cache ==
/// Builds a cache, choosing the persistent backend when `host` has usable
/// storage and the transient backend otherwise.
///
/// Never fails.
pub fn create_cache<T: CacheValue>(options: CacheOptions, host: StorageHost) -> CacheHandle<T> {
    let options = options.normalized();
    let backend = if host.is_available() {
        Backend::Persistent(PersistentCache::new(host, &options))
    } else {
        Backend::Transient(TransientCache::new(&options))
    };

    let handle = CacheHandle {
        backend,
        stats: StatsRecorder::default(),
    };
    info!(
        "Cache '{}' using {} backend",
        handle.namespace(),
        handle.kind().as_str()
    );
    handle
}

impl<T: CacheValue> CacheHandle<T> {
    pub fn kind(&self) -> BackendKind {
        match &self.backend {
            Backend::Persistent(_) => BackendKind::Persistent,
            Backend::Transient(_) => BackendKind::Transient,
        }
    }

    pub fn namespace(&self) -> &str {
        match &self.backend {
            Backend::Persistent(cache) => cache.namespace(),
            Backend::Transient(cache) => cache.namespace(),
        }
    }

    /// Returns the storage key `key` maps to.
    pub fn make_key(&self, key: &str) -> String {
        match &self.backend {
            Backend::Persistent(cache) => cache.make_key(key),
            Backend::Transient(cache) => cache.make_key(key),
        }
    }

    fn handlers(&self) -> &dyn CacheHandlers<T> {
        match &self.backend {
            Backend::Persistent(cache) => cache,
            Backend::Transient(cache) => cache,
        }
    }

    // == Sanitize ==
    /// Runs one size-cap sweep. The transient backend has no cap.
    pub async fn sanitize(&self) -> Result<Option<String>> {
        let Backend::Persistent(cache) = &self.backend else {
            return Ok(None);
        };

        let evicted = cache.sanitize().await?;
        if evicted.is_some() {
            self.stats.record_eviction();
        }
        Ok(evicted)
    }

    // == Stats ==
    /// Returns hit/miss/eviction counters and the live entry count.
    pub async fn stats(&self) -> Result<CacheStats> {
        let total_entries = self.keys().await?.len();
        Ok(self.stats.snapshot(total_entries))
    }
}

#[async_trait]
impl<T: CacheValue> CacheHandlers<T> for CacheHandle<T> {
    async fn set(&self, key: &str, value: T, ttl: Milliseconds) -> Result<String> {
        self.handlers().set(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> Result<Option<T>> {
        let value = self.handlers().get(key).await?;
        if value.is_some() {
            self.stats.record_hit();
        } else {
            debug!("Cache miss for {}", key);
            self.stats.record_miss();
        }
        Ok(value)
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        self.handlers().remove(key).await
    }

    async fn remove_pattern(&self, pattern: &str) -> Result<Vec<bool>> {
        self.handlers().remove_pattern(pattern).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.handlers().keys().await
    }

    async fn clear(&self) -> Result<bool> {
        self.handlers().clear().await
    }
}
