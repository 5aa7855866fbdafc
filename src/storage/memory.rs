//! In-process keyed blob store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::InsertionOrder;
use crate::error::Result;
use crate::storage::{CacheStorage, NamespaceHandle, StoredRecord};

// == Memory Storage ==
/// A [`CacheStorage`] holding every namespace in process memory.
#[derive(Debug)]
pub struct MemoryStorage {
    namespaces: RwLock<HashMap<String, Arc<MemoryNamespace>>>,
    available: bool,
}

impl MemoryStorage {
    /// Creates an empty, available store.
    pub fn new() -> Self {
        Self {
            namespaces: RwLock::new(HashMap::new()),
            available: true,
        }
    }

    /// Creates a store whose availability check fails.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn open(&self, namespace: &str) -> Result<Arc<dyn NamespaceHandle>> {
        let mut namespaces = self.namespaces.write().await;
        let handle: Arc<dyn NamespaceHandle> = namespaces
            .entry(namespace.to_string())
            .or_insert_with(|| Arc::new(MemoryNamespace::default()))
            .clone();
        Ok(handle)
    }

    async fn delete(&self, namespace: &str) -> Result<bool> {
        Ok(self.namespaces.write().await.remove(namespace).is_some())
    }
}

// == Memory Namespace ==
#[derive(Debug, Default)]
struct MemoryNamespace {
    state: RwLock<NamespaceState>,
}

#[derive(Debug, Default)]
struct NamespaceState {
    records: HashMap<String, StoredRecord>,
    order: InsertionOrder,
}

#[async_trait]
impl NamespaceHandle for MemoryNamespace {
    async fn put(&self, key: &str, record: StoredRecord) -> Result<()> {
        let mut state = self.state.write().await;
        state.records.insert(key.to_string(), record);
        state.order.record(key);
        Ok(())
    }

    async fn match_key(&self, key: &str) -> Result<Option<StoredRecord>> {
        Ok(self.state.read().await.records.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        let existed = state.records.remove(key).is_some();
        state.order.remove(key);
        Ok(existed)
    }

    async fn records(&self) -> Result<Vec<(String, StoredRecord)>> {
        let state = self.state.read().await;
        Ok(state
            .order
            .iter()
            .filter_map(|key| {
                state
                    .records
                    .get(key)
                    .map(|record| (key.clone(), record.clone()))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_match() {
        let storage = MemoryStorage::new();
        let ns = storage.open("ns").await.unwrap();

        ns.put("k", StoredRecord::new("1")).await.unwrap();

        let record = ns.match_key("k").await.unwrap().unwrap();
        assert_eq!(record.body, "1");
        assert!(ns.match_key("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let storage = MemoryStorage::new();

        storage
            .open("ns")
            .await
            .unwrap()
            .put("k", StoredRecord::new("1"))
            .await
            .unwrap();

        let reopened = storage.open("ns").await.unwrap();
        assert_eq!(reopened.keys().await.unwrap(), vec!["k".to_string()]);
    }

    #[tokio::test]
    async fn test_keys_in_write_order() {
        let storage = MemoryStorage::new();
        let ns = storage.open("ns").await.unwrap();

        for key in ["c", "a", "b"] {
            ns.put(key, StoredRecord::new("x")).await.unwrap();
        }

        assert_eq!(ns.keys().await.unwrap(), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_delete_record() {
        let storage = MemoryStorage::new();
        let ns = storage.open("ns").await.unwrap();
        ns.put("k", StoredRecord::new("1")).await.unwrap();

        assert!(ns.delete("k").await.unwrap());
        assert!(!ns.delete("k").await.unwrap());
        assert!(ns.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_namespace() {
        let storage = MemoryStorage::new();
        storage
            .open("a")
            .await
            .unwrap()
            .put("k", StoredRecord::new("1"))
            .await
            .unwrap();
        storage
            .open("b")
            .await
            .unwrap()
            .put("k", StoredRecord::new("2"))
            .await
            .unwrap();

        assert!(storage.delete("a").await.unwrap());
        assert!(!storage.delete("a").await.unwrap());

        assert!(storage.open("a").await.unwrap().keys().await.unwrap().is_empty());
        assert_eq!(storage.open("b").await.unwrap().keys().await.unwrap().len(), 1);
    }
}
