//! In-memory fetcher.
//!
//! Serves a fixed set of resources and counts every fetch, which lets
//! callers assert that cached tabs are never fetched twice.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::{Fetcher, normalize_resource};
use crate::error::FetchError;

#[derive(Debug, Clone)]
enum Entry {
    Body(String),
    Status(u16),
}

/// Fetcher backed by a concurrent map of resource bodies.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    entries: DashMap<String, Entry>,
    counts: DashMap<String, AtomicU64>,
}

impl StaticFetcher {
    /// Creates an empty fetcher. Every resource answers 404.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource, builder style.
    #[must_use]
    pub fn with(self, resource: &str, body: impl Into<String>) -> Self {
        self.insert(resource, body);
        self
    }

    /// Adds a resource that answers with a non-success status, builder style.
    #[must_use]
    pub fn with_status(self, resource: &str, status: u16) -> Self {
        self.entries.insert(key(resource), Entry::Status(status));
        self
    }

    /// Adds or replaces a resource.
    pub fn insert(&self, resource: &str, body: impl Into<String>) {
        self.entries.insert(key(resource), Entry::Body(body.into()));
    }

    /// Removes a resource; later fetches answer 404.
    pub fn remove(&self, resource: &str) {
        self.entries.remove(&key(resource));
    }

    /// Number of fetches made for `resource`, successful or not.
    #[must_use]
    pub fn fetch_count(&self, resource: &str) -> u64 {
        self.counts
            .get(&key(resource))
            .map_or(0, |c| c.load(Ordering::SeqCst))
    }

    /// Total number of fetches across all resources.
    #[must_use]
    pub fn total_fetches(&self) -> u64 {
        self.counts
            .iter()
            .map(|c| c.value().load(Ordering::SeqCst))
            .sum()
    }
}

fn key(resource: &str) -> String {
    normalize_resource(resource).unwrap_or_else(|_| resource.to_string())
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch_text(&self, resource: &str) -> Result<String, FetchError> {
        let key = normalize_resource(resource)?;
        self.counts
            .entry(key.clone())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::SeqCst);

        match self.entries.get(&key).map(|e| e.value().clone()) {
            Some(Entry::Body(body)) => Ok(body),
            Some(Entry::Status(status)) => Err(FetchError::Status(status)),
            None => Err(FetchError::Status(404)),
        }
    }

    fn describe(&self) -> String {
        format!("in-memory site ({} resources)", self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_inserted_bodies_and_counts() {
        let fetcher = StaticFetcher::new().with("json/a.json", "{}");
        assert_eq!(fetcher.fetch_text("./json/a.json").await.unwrap(), "{}");
        assert_eq!(fetcher.fetch_text("json/a.json").await.unwrap(), "{}");
        assert_eq!(fetcher.fetch_count("json/a.json"), 2);
        assert_eq!(fetcher.total_fetches(), 2);
    }

    #[tokio::test]
    async fn unknown_resource_is_404_and_counted() {
        let fetcher = StaticFetcher::new();
        assert_eq!(
            fetcher.fetch_text("missing.md").await.unwrap_err(),
            FetchError::Status(404)
        );
        assert_eq!(fetcher.fetch_count("missing.md"), 1);
    }

    #[tokio::test]
    async fn configured_status_is_returned() {
        let fetcher = StaticFetcher::new().with_status("app.json", 503);
        assert_eq!(
            fetcher.fetch_text("app.json").await.unwrap_err(),
            FetchError::Status(503)
        );
    }

    #[tokio::test]
    async fn removed_resource_is_404() {
        let fetcher = StaticFetcher::new().with("a.html", "<p>a</p>");
        fetcher.remove("a.html");
        assert!(fetcher.fetch_text("a.html").await.is_err());
    }
}
