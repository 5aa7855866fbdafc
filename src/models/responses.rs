//! Response DTOs for the cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{BackendKind, CacheStats};

/// Response body for the GET operation (GET /entries)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /entries)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Acknowledgment from the cache ("OK")
    pub result: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            key: key.into(),
        }
    }
}

/// Response body for the existence check (GET /entries/exists)
#[derive(Debug, Clone, Serialize)]
pub struct HasResponse {
    pub key: String,
    pub exists: bool,
}

/// Response body for the DELETE operation (DELETE /entries)
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    /// The key that was targeted
    pub key: String,
    /// Whether an entry existed and was deleted
    pub removed: bool,
}

/// Response body for pattern deletes (DELETE /entries/pattern)
#[derive(Debug, Clone, Serialize)]
pub struct RemovePatternResponse {
    pub pattern: String,
    /// One result per attempted deletion, in enumeration order
    pub removed: Vec<bool>,
}

/// Response body for the key listing (GET /keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub keys: Vec<String>,
}

/// Response body for namespace deletion (DELETE /namespace)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub namespace: String,
    pub cleared: bool,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of size-cap evictions
    pub evictions: u64,
    /// Current number of live entries
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Active backend
    pub backend: BackendKind,
    /// Namespace being served
    pub namespace: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(backend: BackendKind, namespace: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            backend,
            namespace: namespace.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("test_key", json!({"v": 1}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, json!({"key": "test_key", "value": {"v": 1}}));
    }

    #[test]
    fn test_set_response_serialize() {
        let resp = SetResponse::new("my_key", "OK");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("my_key"));
        assert!(json.contains("OK"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let resp = StatsResponse::from(CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            total_entries: 100,
        });
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy(BackendKind::Transient, "keyv-cache");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["backend"], "transient");
        assert!(json.get("timestamp").is_some());
    }
}
