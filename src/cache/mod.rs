//! Cache Module
//!
//! Namespaced key-value caching with TTL expiry over either a persistent
//! storage substrate or an in-process map.

mod contract;
mod entry;
mod envelope;
mod handle;
mod key;
mod options;
mod order;
mod persistent;
mod stats;
mod transient;


// Re-export public types
pub use contract::{CacheHandlers, CacheValue};
pub use entry::{current_timestamp_ms, CacheEntry};
pub use envelope::{decode, encode, is_live, TIMESTAMP_FIELD, TTL_FIELD};
pub use handle::{create_cache, BackendKind, CacheHandle};
pub use key::{canonicalize, is_valid_url, NAMESPACE_SEPARATOR};
pub use options::{CacheOptions, DEFAULT_NAMESPACE, MAX_SIZE_CEILING};
pub use order::InsertionOrder;
pub use persistent::PersistentCache;
pub use stats::CacheStats;
pub use transient::TransientCache;

// == Public Types ==
/// A duration in milliseconds.
pub type Milliseconds = u64;
