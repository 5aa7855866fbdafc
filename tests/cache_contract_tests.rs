//! Integration Tests for the Cache Contract
//!
//! Runs the same scenarios against the transient backend and the
//! persistent backend on both storage substrates.

use std::sync::Arc;
use std::time::Duration;

use keyv_cache::{
    create_cache, BackendKind, CacheError, CacheHandle, CacheHandlers, CacheOptions,
    FileSystemStorage, MemoryStorage, StorageHost,
};
use keyv_cache::cache::{CacheValue, PersistentCache};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct User {
    name: String,
}

// == Helper Functions ==

/// A host per substrate; the TempDir must outlive the file system host.
fn hosts() -> Vec<(StorageHost, Option<tempfile::TempDir>)> {
    let dir = tempfile::tempdir().unwrap();
    vec![
        (StorageHost::unavailable(), None),
        (StorageHost::new(Arc::new(MemoryStorage::new())), None),
        (
            StorageHost::new(Arc::new(FileSystemStorage::new(dir.path()))),
            Some(dir),
        ),
    ]
}

fn cache_on<T: CacheValue>(host: &StorageHost, namespace: &str) -> CacheHandle<T> {
    create_cache(
        CacheOptions::default().with_namespace(namespace),
        host.clone(),
    )
}

/// Every record file under a file system storage root.
fn record_files(root: &std::path::Path) -> Vec<std::path::PathBuf> {
    let mut files = Vec::new();
    for namespace in std::fs::read_dir(root).unwrap() {
        let namespace = namespace.unwrap().path();
        if !namespace.is_dir() {
            continue;
        }
        for entry in std::fs::read_dir(&namespace).unwrap() {
            let path = entry.unwrap().path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
    }
    files
}

// == Scenarios ==

#[tokio::test]
async fn test_has_until_ttl_elapses() {
    for (host, _dir) in hosts() {
        let cache: CacheHandle<User> = cache_on(&host, "users");

        cache
            .set("user:42", User { name: "a".into() }, 300)
            .await
            .unwrap();
        assert!(cache.has("user:42").await.unwrap(), "{:?}", cache.kind());

        tokio::time::sleep(Duration::from_millis(450)).await;

        assert!(!cache.has("user:42").await.unwrap(), "{:?}", cache.kind());
    }
}

#[tokio::test]
async fn test_value_readable_halfway_through_ttl() {
    for (host, _dir) in hosts() {
        let cache: CacheHandle<Value> = cache_on(&host, "ns");

        cache.set("k", json!({"v": "myValue"}), 400).await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.get("k").await.unwrap(), Some(json!({"v": "myValue"})));
    }
}

#[tokio::test]
async fn test_namespace_isolation() {
    for (host, _dir) in hosts() {
        let ns1: CacheHandle<String> = cache_on(&host, "ns1");
        let ns2: CacheHandle<String> = cache_on(&host, "ns2");

        ns1.set("k", "v".to_string(), 5000).await.unwrap();

        assert_eq!(ns2.get("k").await.unwrap(), None);
        assert!(!ns2.remove("k").await.unwrap());
        assert_eq!(ns1.get("k").await.unwrap(), Some("v".to_string()));
    }
}

#[tokio::test]
async fn test_clear_leaves_other_namespaces() {
    for (host, _dir) in hosts() {
        let mine: CacheHandle<String> = cache_on(&host, "my-namespace");
        let other: CacheHandle<String> = cache_on(&host, "another-namespace");

        mine.set("myKey", "myValue".into(), 3000).await.unwrap();
        other.set("otherKey", "otherValue".into(), 3000).await.unwrap();

        assert!(mine.clear().await.unwrap());

        assert!(!mine.has("myKey").await.unwrap());
        assert!(other.has("otherKey").await.unwrap());
    }
}

#[tokio::test]
async fn test_remove_pattern_prefix_keys() {
    for (host, _dir) in hosts() {
        let cache: CacheHandle<i32> = cache_on(&host, "ns");

        cache.set("a", 1, 9999).await.unwrap();
        cache.set("ab", 2, 9999).await.unwrap();

        assert_eq!(cache.remove_pattern("a").await.unwrap(), vec![true, true]);
        assert!(cache.keys().await.unwrap().is_empty(), "{:?}", cache.kind());
    }
}

#[tokio::test]
async fn test_remove_pattern_without_matches() {
    for (host, _dir) in hosts() {
        let cache: CacheHandle<i32> = cache_on(&host, "ns");
        cache.set("alpha", 1, 9999).await.unwrap();

        assert!(cache.remove_pattern("zzz").await.unwrap().is_empty());
        assert_eq!(cache.keys().await.unwrap(), vec![cache.make_key("alpha")]);
    }
}

#[tokio::test]
async fn test_remove_twice() {
    for (host, _dir) in hosts() {
        let cache: CacheHandle<i32> = cache_on(&host, "ns");

        assert!(!cache.remove("k").await.unwrap());
        cache.set("k", 1, 9999).await.unwrap();
        assert!(cache.remove("k").await.unwrap());
        assert!(!cache.remove("k").await.unwrap());
    }
}

#[tokio::test]
async fn test_keys_are_namespaced() {
    for (host, _dir) in hosts() {
        let cache: CacheHandle<String> = cache_on(&host, "keyv-cache");

        cache.set("myKey", "myValue".into(), 3000).await.unwrap();

        assert_eq!(
            cache.keys().await.unwrap(),
            vec!["myKey:ns=keyv-cache".to_string()]
        );
    }
}

#[tokio::test]
async fn test_backend_selection() {
    let kinds: Vec<BackendKind> = hosts()
        .iter()
        .map(|(host, _)| cache_on::<Value>(host, "ns").kind())
        .collect();

    assert_eq!(
        kinds,
        vec![
            BackendKind::Transient,
            BackendKind::Persistent,
            BackendKind::Persistent
        ]
    );
}

#[tokio::test]
async fn test_direct_persistent_access_without_storage() {
    let cache: PersistentCache<Value> =
        PersistentCache::new(StorageHost::unavailable(), &CacheOptions::default());

    let err = cache.keys().await.unwrap_err();
    assert!(matches!(err, CacheError::UnsupportedEnvironment(_)));
}

#[tokio::test]
async fn test_long_and_encoded_keys() {
    let long = "x".repeat(300);
    let url = format!("https://example.com/{}?q=a%20b", "path/".repeat(36));
    assert!(url.len() >= 200);

    for (host, _dir) in hosts() {
        let cache: CacheHandle<i32> = cache_on(&host, "ns");

        for key in [&long, &url] {
            cache.set(key, 7, 60_000).await.unwrap();
            assert_eq!(cache.get(key).await.unwrap(), Some(7), "{:?}", cache.kind());
            assert!(cache.has(key).await.unwrap());
        }

        assert_eq!(cache.keys().await.unwrap().len(), 2);
        assert!(cache.remove(&long).await.unwrap());
        assert!(cache.remove(&url).await.unwrap());
        assert!(cache.keys().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_corrupt_record_on_disk_is_a_deleted_miss() {
    for (host, dir) in hosts() {
        let Some(dir) = dir else {
            continue;
        };
        let cache: CacheHandle<Value> = cache_on(&host, "ns");
        cache.set("k", json!({"a": 1}), 60_000).await.unwrap();

        let files = record_files(dir.path());
        assert_eq!(files.len(), 1);
        std::fs::write(&files[0], b"{ not json").unwrap();

        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(record_files(dir.path()).is_empty());
        assert!(!cache.has("k").await.unwrap());
    }
}
