//! Transient Backend
//!
//! Cache contract on an in-process map, for hosts without persistent
//! storage. Growth is bounded only by process memory.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{
    canonicalize, CacheEntry, CacheHandlers, CacheOptions, CacheValue, InsertionOrder,
    Milliseconds,
};
use crate::error::Result;

// == Transient Cache ==
/// Cache backend holding entries in process memory.
#[derive(Debug)]
pub struct TransientCache<T> {
    namespace: String,
    state: RwLock<TransientState<T>>,
}

#[derive(Debug)]
struct TransientState<T> {
    entries: HashMap<String, CacheEntry<T>>,
    order: InsertionOrder,
}

impl<T> TransientState<T> {
    fn remove(&mut self, key: &str) -> bool {
        self.order.remove(key);
        self.entries.remove(key).is_some()
    }
}

impl<T> TransientCache<T> {
    // == Constructor ==
    pub fn new(options: &CacheOptions) -> Self {
        Self {
            namespace: options.clone().normalized().namespace,
            state: RwLock::new(TransientState {
                entries: HashMap::new(),
                order: InsertionOrder::new(),
            }),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the storage key for `key` in this cache's namespace.
    pub fn make_key(&self, key: &str) -> String {
        canonicalize(key, &self.namespace)
    }

    /// Returns the number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<T: CacheValue> CacheHandlers<T> for TransientCache<T> {
    async fn set(&self, key: &str, value: T, ttl: Milliseconds) -> Result<String> {
        let key = self.make_key(key);
        let mut state = self.state.write().await;
        state.entries.insert(key.clone(), CacheEntry::new(value, ttl));
        state.order.record(&key);
        Ok("OK".to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<T>> {
        let key = self.make_key(key);
        let mut state = self.state.write().await;

        let expired = match state.entries.get(&key) {
            Some(entry) if entry.is_live() => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!("Lazily evicting expired cache entry {}", key);
            state.remove(&key);
        }
        Ok(None)
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let key = self.make_key(key);
        Ok(self.state.write().await.remove(&key))
    }

    async fn remove_pattern(&self, pattern: &str) -> Result<Vec<bool>> {
        let mut state = self.state.write().await;
        let matched: Vec<String> = state
            .order
            .iter()
            .filter(|k| k.contains(pattern))
            .cloned()
            .collect();

        Ok(matched.iter().map(|key| state.remove(key)).collect())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let state = self.state.read().await;
        Ok(state
            .order
            .iter()
            .filter(|k| state.entries.get(*k).is_some_and(|entry| entry.is_live()))
            .cloned()
            .collect())
    }

    async fn clear(&self) -> Result<bool> {
        let mut state = self.state.write().await;
        state.entries.clear();
        state.order.clear();
        Ok(true)
    }
}
