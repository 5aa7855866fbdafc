//! Cache Entry Module
//!
//! Defines the in-process record of a cached value with its TTL.

use crate::cache::Milliseconds;

// == Cache Entry ==
/// Represents a single cache entry with value and timing metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Write timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Time to live in milliseconds, counted from `stored_at`
    pub ttl: Milliseconds,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: T, ttl: Milliseconds) -> Self {
        Self {
            value,
            stored_at: current_timestamp_ms(),
            ttl,
        }
    }

    /// Returns the Unix millisecond timestamp the entry expires at.
    pub fn expires_at(&self) -> u64 {
        self.stored_at.saturating_add(self.ttl)
    }

    // == Liveness ==
    /// Checks if the entry is live at `now`.
    ///
    /// Boundary condition: the entry is still live when `now` equals its
    /// expiration time, and expired from the next millisecond on.
    pub fn is_live_at(&self, now: u64) -> bool {
        self.expires_at() >= now
    }

    /// Checks if the entry is live right now.
    pub fn is_live(&self) -> bool {
        self.is_live_at(current_timestamp_ms())
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at().saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
