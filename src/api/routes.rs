//! API Routes
//!
//! Configures the Axum router with all cache endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, get_handler, has_handler, health_handler, keys_handler,
    remove_handler, remove_pattern_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /entries` - Store a value (`{key, value, ttl}`)
/// - `GET /entries?key=` - Retrieve a value
/// - `DELETE /entries?key=` - Delete a value
/// - `GET /entries/exists?key=` - Check for a live value
/// - `DELETE /entries/pattern?pattern=` - Delete every key containing a pattern
/// - `GET /keys` - List live keys
/// - `DELETE /namespace` - Delete the whole namespace
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/entries",
            get(get_handler).put(set_handler).delete(remove_handler),
        )
        .route("/entries/exists", get(has_handler))
        .route("/entries/pattern", delete(remove_pattern_handler))
        .route("/keys", get(keys_handler))
        .route("/namespace", delete(clear_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
