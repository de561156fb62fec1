//! Rendered-content cache.
//!
//! Maps tab id to the HTML that was injected for it. Entries live until an
//! explicit clear or single-key eviction; there is no eviction policy since
//! a session can visit at most as many tabs as the manifest declares.

use dashmap::DashMap;

use crate::observability::metrics;

/// Tab id → rendered HTML.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: DashMap<String, String>,
}

impl ContentCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached HTML for a tab.
    #[must_use]
    pub fn get(&self, tab_id: &str) -> Option<String> {
        let hit = self.entries.get(tab_id).map(|entry| entry.value().clone());
        metrics::record_cache_lookup(hit.is_some());
        hit
    }

    /// Stores (or replaces) a tab's HTML.
    pub fn insert(&self, tab_id: &str, html: String) {
        self.entries.insert(tab_id.to_string(), html);
        metrics::set_cache_entries(self.entries.len());
    }

    /// Evicts one tab. Returns `true` if an entry was present.
    pub fn remove(&self, tab_id: &str) -> bool {
        let removed = self.entries.remove(tab_id).is_some();
        metrics::set_cache_entries(self.entries.len());
        removed
    }

    /// Evicts everything.
    pub fn clear(&self) {
        self.entries.clear();
        metrics::set_cache_entries(0);
    }

    #[must_use]
    pub fn contains(&self, tab_id: &str) -> bool {
        self.entries.contains_key(tab_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
