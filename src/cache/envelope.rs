//! Envelope Codec
//!
//! Packs a value and its TTL metadata into a [`StoredRecord`] and back.
//! Values travel as JSON text; `timestamp` and `ttl` travel as decimal
//! strings in the record metadata.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::Milliseconds;
use crate::error::Result;
use crate::storage::StoredRecord;

/// Metadata field holding the write time in Unix milliseconds.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Metadata field holding the TTL in milliseconds.
pub const TTL_FIELD: &str = "ttl";

// == Encode ==
/// Serializes `value` into a record stamped with `now` and `ttl`.
pub fn encode<T: Serialize>(value: &T, ttl: Milliseconds, now: u64) -> Result<StoredRecord> {
    let body = serde_json::to_string(value)?;
    Ok(StoredRecord::new(body)
        .with_metadata(TIMESTAMP_FIELD, now.to_string())
        .with_metadata(TTL_FIELD, ttl.to_string()))
}

// == Is Live ==
/// Checks whether a record is usable at `now`.
///
/// A record is live when it is `ok` and `timestamp + ttl >= now`. Missing
/// or unparseable timing metadata counts as expired.
pub fn is_live(record: &StoredRecord, now: u64) -> bool {
    if !record.ok {
        return false;
    }
    match (
        read_millis(record, TIMESTAMP_FIELD),
        read_millis(record, TTL_FIELD),
    ) {
        (Some(timestamp), Some(ttl)) => timestamp.saturating_add(ttl) >= now,
        _ => false,
    }
}

// == Decode ==
/// Deserializes the record body. Corrupt payloads yield `None`.
pub fn decode<T: DeserializeOwned>(record: &StoredRecord) -> Option<T> {
    match serde_json::from_str(&record.body) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Discarding undecodable cache payload: {}", e);
            None
        }
    }
}

fn read_millis(record: &StoredRecord, field: &str) -> Option<u64> {
    record.metadata(field)?.trim().parse().ok()
}
