//! Cache construction options.

use serde::Deserialize;

/// Namespace used when none is given.
pub const DEFAULT_NAMESPACE: &str = "keyv-cache";

/// Upper bound for `max_size`.
pub const MAX_SIZE_CEILING: usize = 10_000;

// == Cache Options ==
/// Options recognized when constructing a cache.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    /// Namespace partition the cache owns
    pub namespace: String,
    /// Entry count at which the size-cap sweep starts evicting
    pub max_size: usize,
}

impl CacheOptions {
    /// Sets the namespace. An empty name keeps the default.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = if namespace.is_empty() {
            DEFAULT_NAMESPACE.to_string()
        } else {
            namespace
        };
        self
    }

    /// Sets the size cap. Zero or anything above [`MAX_SIZE_CEILING`]
    /// falls back to the ceiling.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = clamp_max_size(max_size);
        self
    }

    /// Returns a copy with out-of-range values replaced by defaults.
    pub fn normalized(self) -> Self {
        let Self {
            namespace,
            max_size,
        } = self;
        Self::default()
            .with_namespace(namespace)
            .with_max_size(max_size)
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            max_size: MAX_SIZE_CEILING,
        }
    }
}

fn clamp_max_size(max_size: usize) -> usize {
    if max_size == 0 || max_size > MAX_SIZE_CEILING {
        MAX_SIZE_CEILING
    } else {
        max_size
    }
}
