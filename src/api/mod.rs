//! API Module
//!
//! HTTP handlers and routing that expose one cache handle.
//!
//! # Endpoints
//! - `PUT /entries`, `GET /entries`, `DELETE /entries` - Single-key operations
//! - `GET /entries/exists` - Existence check
//! - `DELETE /entries/pattern` - Pattern delete
//! - `GET /keys` - Key listing
//! - `DELETE /namespace` - Clear the namespace
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
