//! Storage Module
//!
//! The keyed blob store the persistent cache backend is built on, plus the
//! host handle that reports whether such a store is available.
//!
//! # Substrates
//! - [`FileSystemStorage`]: durable, one directory per namespace
//! - [`MemoryStorage`]: in-process stand-in for hosts without a disk store

mod fs;
mod memory;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;
use crate::error::{CacheError, Result};

pub use fs::FileSystemStorage;
pub use memory::MemoryStorage;

// == Stored Record ==
/// A payload plus string-valued metadata, as held by a [`NamespaceHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Whether the record is usable; corrupt records surface as `false`
    pub ok: bool,
    /// Metadata fields (e.g. `timestamp`, `ttl`)
    pub metadata: BTreeMap<String, String>,
    /// Serialized payload
    pub body: String,
}

impl StoredRecord {
    /// Creates a usable record with no metadata.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            ok: true,
            metadata: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Creates a record marking unreadable stored data.
    pub fn unreadable() -> Self {
        Self {
            ok: false,
            metadata: BTreeMap::new(),
            body: String::new(),
        }
    }

    /// Adds a metadata field.
    pub fn with_metadata(mut self, name: &str, value: impl Into<String>) -> Self {
        self.metadata.insert(name.to_string(), value.into());
        self
    }

    /// Reads a metadata field.
    pub fn metadata(&self, name: &str) -> Option<&str> {
        self.metadata.get(name).map(String::as_str)
    }
}

// == Storage Traits ==
/// A host-provided keyed blob store partitioned by namespace.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Reports whether the store can be used in the current environment.
    fn is_available(&self) -> bool;

    /// Opens a namespace, creating it when absent.
    async fn open(&self, namespace: &str) -> Result<Arc<dyn NamespaceHandle>>;

    /// Deletes a whole namespace. Returns whether it existed.
    async fn delete(&self, namespace: &str) -> Result<bool>;
}

/// One open namespace of a [`CacheStorage`].
#[async_trait]
pub trait NamespaceHandle: Send + Sync {
    /// Stores a record, replacing any previous record under `key`.
    async fn put(&self, key: &str, record: StoredRecord) -> Result<()>;

    /// Looks up a record.
    async fn match_key(&self, key: &str) -> Result<Option<StoredRecord>>;

    /// Deletes a record. Returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Lists stored records with their keys, oldest write first.
    async fn records(&self) -> Result<Vec<(String, StoredRecord)>>;

    /// Lists stored keys, oldest write first.
    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .records()
            .await?
            .into_iter()
            .map(|(key, _)| key)
            .collect())
    }
}

// == Storage Host ==
/// The execution environment's view of persistent storage.
///
/// Carries the injected substrate, if any, so cache code never reaches for
/// ambient state. The substrate is checked once; clones share the result.
#[derive(Clone, Default)]
pub struct StorageHost {
    storage: Option<Arc<dyn CacheStorage>>,
    availability: Arc<OnceLock<bool>>,
}

impl StorageHost {
    /// Creates a host backed by the given storage.
    pub fn new(storage: Arc<dyn CacheStorage>) -> Self {
        Self {
            storage: Some(storage),
            availability: Arc::default(),
        }
    }

    /// Creates a host with no persistent storage.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Creates a host from configuration.
    ///
    /// A configured storage directory yields a [`FileSystemStorage`];
    /// otherwise the host has no persistent storage.
    pub fn from_config(config: &Config) -> Self {
        match &config.storage_dir {
            Some(dir) => Self::new(Arc::new(FileSystemStorage::new(dir))),
            None => Self::unavailable(),
        }
    }

    // == Availability ==
    /// Returns true if persistent storage can be used here.
    pub fn is_available(&self) -> bool {
        let Some(storage) = &self.storage else {
            return false;
        };
        *self.availability.get_or_init(|| {
            let available = storage.is_available();
            if !available {
                warn!("Persistent cache storage failed its availability check");
            }
            available
        })
    }

    // == Caches ==
    /// Returns the persistent storage.
    ///
    /// Fails with [`CacheError::UnsupportedEnvironment`] when the host has
    /// no usable storage.
    pub fn caches(&self) -> Result<&Arc<dyn CacheStorage>> {
        match &self.storage {
            Some(storage) if self.is_available() => Ok(storage),
            Some(_) => Err(CacheError::UnsupportedEnvironment(
                "persistent cache storage is not usable in this environment".to_string(),
            )),
            None => Err(CacheError::UnsupportedEnvironment(
                "persistent cache storage is not available in this environment".to_string(),
            )),
        }
    }
}

impl fmt::Debug for StorageHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageHost")
            .field("has_storage", &self.storage.is_some())
            .finish()
    }
}
