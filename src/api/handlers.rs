//! API Handlers
//!
//! HTTP request handlers for each cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::{create_cache, CacheHandle, CacheHandlers};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, GetResponse, HasResponse, HealthResponse, KeyQuery, KeysResponse,
    PatternQuery, RemovePatternResponse, RemoveResponse, SetRequest, SetResponse, StatsResponse,
};
use crate::storage::StorageHost;

/// Application state shared across all handlers.
///
/// Holds one cache handle; which backend it runs on is fixed when the
/// state is built.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache handle
    pub cache: Arc<CacheHandle<Value>>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: CacheHandle<Value>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses file system storage when a storage directory is configured and
    /// usable, in-memory storage otherwise.
    pub fn from_config(config: &Config) -> Self {
        let host = StorageHost::from_config(config);
        Self::new(create_cache(config.cache_options(), host))
    }
}

/// Handler for PUT /entries
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let result = state.cache.set(&req.key, req.value, req.ttl).await?;

    Ok(Json(SetResponse::new(req.key, result)))
}

/// Handler for GET /entries?key=
pub async fn get_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<GetResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    match state.cache.get(&query.key).await? {
        Some(value) => Ok(Json(GetResponse::new(query.key, value))),
        None => Err(CacheError::NotFound(query.key)),
    }
}

/// Handler for GET /entries/exists?key=
pub async fn has_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<HasResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let exists = state.cache.has(&query.key).await?;
    Ok(Json(HasResponse {
        key: query.key,
        exists,
    }))
}

/// Handler for DELETE /entries?key=
pub async fn remove_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<RemoveResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let removed = state.cache.remove(&query.key).await?;
    Ok(Json(RemoveResponse {
        key: query.key,
        removed,
    }))
}

/// Handler for DELETE /entries/pattern?pattern=
pub async fn remove_pattern_handler(
    State(state): State<AppState>,
    Query(query): Query<PatternQuery>,
) -> Result<Json<RemovePatternResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let removed = state.cache.remove_pattern(&query.pattern).await?;
    Ok(Json(RemovePatternResponse {
        pattern: query.pattern,
        removed,
    }))
}

/// Handler for GET /keys
pub async fn keys_handler(State(state): State<AppState>) -> Result<Json<KeysResponse>> {
    let keys = state.cache.keys().await?;
    Ok(Json(KeysResponse { keys }))
}

/// Handler for DELETE /namespace
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let cleared = state.cache.clear().await?;
    Ok(Json(ClearResponse {
        namespace: state.cache.namespace().to_string(),
        cleared,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.cache.stats().await?;
    Ok(Json(StatsResponse::from(stats)))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.cache.kind(),
        state.cache.namespace(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{BackendKind, CacheOptions};
    use serde_json::json;

    fn state() -> AppState {
        AppState::new(create_cache(
            CacheOptions::default(),
            StorageHost::unavailable(),
        ))
    }

    fn key(key: &str) -> Query<KeyQuery> {
        Query(KeyQuery {
            key: key.to_string(),
        })
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = state();

        let req = SetRequest {
            key: "test_key".to_string(),
            value: json!({"name": "a"}),
            ttl: 3000,
        };
        let response = set_handler(State(state.clone()), Json(req)).await.unwrap();
        assert_eq!(response.result, "OK");

        let response = get_handler(State(state.clone()), key("test_key"))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"name": "a"}));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let result = get_handler(State(state()), key("nonexistent")).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_has_and_remove_handlers() {
        let state = state();
        state.cache.set("k", json!(1), 3000).await.unwrap();

        assert!(has_handler(State(state.clone()), key("k")).await.unwrap().exists);
        assert!(remove_handler(State(state.clone()), key("k")).await.unwrap().removed);
        assert!(!remove_handler(State(state.clone()), key("k")).await.unwrap().removed);
        assert!(!has_handler(State(state), key("k")).await.unwrap().exists);
    }

    #[tokio::test]
    async fn test_remove_pattern_and_keys_handlers() {
        let state = state();
        state.cache.set("a", json!(1), 9999).await.unwrap();
        state.cache.set("ab", json!(2), 9999).await.unwrap();

        let response = remove_pattern_handler(
            State(state.clone()),
            Query(PatternQuery {
                pattern: "a".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.removed, vec![true, true]);

        let keys = keys_handler(State(state)).await.unwrap();
        assert!(keys.keys.is_empty());
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let state = state();
        state.cache.set("k", json!(1), 3000).await.unwrap();

        let response = clear_handler(State(state.clone())).await.unwrap();
        assert!(response.cleared);
        assert_eq!(response.namespace, "keyv-cache");
        assert!(!state.cache.has("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let response = stats_handler(State(state())).await.unwrap();
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(State(state())).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.backend, BackendKind::Transient);
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let req = SetRequest {
            key: "".to_string(),
            value: json!("value"),
            ttl: 1000,
        };
        let result = set_handler(State(state()), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
