//! Response cache keyed on the canonical outbound request bytes.
//!
//! Two logically equal requests with different header order or content get
//! different keys: the cache is keyed on the wire form, not on semantic
//! equivalence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::config::CacheConfig;
use crate::observability::metrics;

/// A thread-safe response cache shared by every connection task.
#[derive(Clone, Default)]
pub struct CacheStore {
    entries: Arc<DashMap<Vec<u8>, Vec<u8>>>,
    enabled: Arc<AtomicBool>,
}

impl CacheStore {
    /// Create a new empty, disabled cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache with the enabled flag seeded from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        let store = Self::new();
        store.set_enabled(config.enabled);
        store
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Clear all entries; the enabled flag is untouched.
    pub fn flush(&self) {
        self.entries.clear();
        metrics::record_cache_entries(0);
    }

    /// Fetch the response stored under a key.
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Store a response, overwriting any prior entry under the key.
    pub fn insert(&self, key: Vec<u8>, response: Vec<u8>) {
        self.entries.insert(key, response);
        metrics::record_cache_entries(self.entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
