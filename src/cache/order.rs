//! Insertion Order Module
//!
//! Tracks write order so enumeration and the size-cap sweep see the
//! oldest write first.

use std::collections::{BTreeMap, HashMap};

// == Insertion Order ==
/// Tracks key write order.
///
/// Every write takes the next sequence number:
/// - `sequences` maps key -> its latest sequence
/// - `order` maps sequence -> key, lowest (oldest) first
///
/// Record and remove are both O(log n).
#[derive(Debug, Default, Clone)]
pub struct InsertionOrder {
    sequences: HashMap<String, u64>,
    order: BTreeMap<u64, String>,
    next: u64,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Marks a key as freshly written (moves to back).
    pub fn record(&mut self, key: &str) {
        self.remove(key);
        let sequence = self.next;
        self.next += 1;
        self.sequences.insert(key.to_string(), sequence);
        self.order.insert(sequence, key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        if let Some(sequence) = self.sequences.remove(key) {
            self.order.remove(&sequence);
        }
    }

    // == Oldest ==
    /// Returns the oldest written key without removing it.
    pub fn oldest(&self) -> Option<&String> {
        self.order.values().next()
    }

    /// Iterates keys, oldest write first.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.values()
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.sequences.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
