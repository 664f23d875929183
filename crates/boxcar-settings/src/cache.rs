//! Resolution cache
//!
//! Memoizes resolved values keyed by (setting name, controller). Alias
//! chains make an uncached lookup O(chain length); the cache brings repeat
//! lookups back to O(1). Entries are only dropped explicitly.

use std::collections::HashMap;

use boxcar_common::Value;

/// Cache key components
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CacheKey {
    name: String,
    controller: String,
}

impl CacheKey {
    fn new(controller: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            controller: controller.to_string(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached entries
    pub entry_count: u64,
    pub hits: u64,
    pub misses: u64,
}

/// In-memory cache of resolved values
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: HashMap<CacheKey, Value>,
    hits: u64,
    misses: u64,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value, counting the hit or miss
    pub fn get(&mut self, controller: &str, name: &str) -> Option<Value> {
        match self.entries.get(&CacheKey::new(controller, name)) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, controller: &str, name: &str, value: Value) {
        self.entries.insert(CacheKey::new(controller, name), value);
    }

    /// Drop one entry; returns whether it was present
    pub fn invalidate(&mut self, controller: &str, name: &str) -> bool {
        self.entries
            .remove(&CacheKey::new(controller, name))
            .is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entries.len() as u64,
            hits: self.hits,
            misses: self.misses,
        }
    }
}
