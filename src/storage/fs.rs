//! File System Storage
//!
//! Durable keyed blob store. Layout:
//!
//! ```text
//! {root}/{sha256(namespace)}/{sha256(key)}.json
//! ```
//!
//! Digests keep every file name the same length however long the key is.
//! Each record file holds the unencoded key, a write sequence used for
//! enumeration order, and the stored record itself.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::Result;
use crate::storage::{CacheStorage, NamespaceHandle, StoredRecord};

const RECORD_EXTENSION: &str = ".json";
const TEMP_EXTENSION: &str = ".tmp";

fn digest(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hex::encode(hasher.finalize())
}

// == File System Storage ==
/// A [`CacheStorage`] rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root: PathBuf,
}

impl FileSystemStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn namespace_dir(&self, namespace: &str) -> PathBuf {
        self.root.join(digest(namespace))
    }
}

#[async_trait]
impl CacheStorage for FileSystemStorage {
    fn is_available(&self) -> bool {
        if let Err(e) = std::fs::create_dir_all(&self.root) {
            warn!("Cache storage root {} unavailable: {}", self.root.display(), e);
            return false;
        }
        match std::fs::metadata(&self.root) {
            Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
            Err(e) => {
                warn!("Cache storage root {} unavailable: {}", self.root.display(), e);
                false
            }
        }
    }

    async fn open(&self, namespace: &str) -> Result<Arc<dyn NamespaceHandle>> {
        let dir = self.namespace_dir(namespace);
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Arc::new(FsNamespace { dir }))
    }

    async fn delete(&self, namespace: &str) -> Result<bool> {
        match tokio::fs::remove_dir_all(self.namespace_dir(namespace)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

// == Record File ==
#[derive(Debug, Serialize, Deserialize)]
struct RecordFile {
    url: String,
    sequence: i64,
    record: StoredRecord,
}

// == Namespace Directory ==
#[derive(Debug)]
struct FsNamespace {
    dir: PathBuf,
}

impl FsNamespace {
    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}", digest(key), RECORD_EXTENSION))
    }
}

fn write_sequence() -> i64 {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| chrono::Utc::now().timestamp_micros())
}

#[async_trait]
impl NamespaceHandle for FsNamespace {
    async fn put(&self, key: &str, record: StoredRecord) -> Result<()> {
        let sequence = write_sequence();
        let file = RecordFile {
            url: key.to_string(),
            sequence,
            record,
        };
        let bytes = serde_json::to_vec(&file)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.record_path(key);
        let temp = self
            .dir
            .join(format!("{}.{}{}", digest(key), sequence, TEMP_EXTENSION));
        tokio::fs::write(&temp, bytes).await?;
        tokio::fs::rename(&temp, &path).await?;
        Ok(())
    }

    async fn match_key(&self, key: &str) -> Result<Option<StoredRecord>> {
        let bytes = match tokio::fs::read(self.record_path(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<RecordFile>(&bytes) {
            Ok(file) if file.url == key => Ok(Some(file.record)),
            Ok(file) => {
                warn!("Cache record for {} holds key {}", key, file.url);
                Ok(None)
            }
            Err(e) => {
                warn!("Unreadable cache record for {}: {}", key, e);
                Ok(Some(StoredRecord::unreadable()))
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        match tokio::fs::remove_file(self.record_path(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Unreadable files are skipped; their key only lives inside the file.
    async fn records(&self) -> Result<Vec<(String, StoredRecord)>> {
        let mut dir = match tokio::fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut found: Vec<RecordFile> = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if !entry.file_name().to_string_lossy().ends_with(RECORD_EXTENSION) {
                continue;
            }

            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                // Deleted between listing and reading
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            match serde_json::from_slice::<RecordFile>(&bytes) {
                Ok(file) => found.push(file),
                Err(e) => warn!("Skipping unreadable cache record {}: {}", path.display(), e),
            }
        }

        found.sort_by(|a, b| (a.sequence, &a.url).cmp(&(b.sequence, &b.url)));
        Ok(found
            .into_iter()
            .map(|file| (file.url, file.record))
            .collect())
    }
}
