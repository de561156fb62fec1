//! Fetch-and-transform functions, one per content source.
//!
//! All three share one contract: produce HTML, never fail. A fetch or
//! parse failure is logged, counted, and replaced by the placeholder.

use std::time::Instant;

use tracing::{debug, warn};

use crate::config::TabDescriptor;
use crate::error::FetchError;
use crate::fetch::Fetcher;
use crate::observability::metrics;
use crate::render::{ContentDocument, generate, markdown, placeholder};

/// Fetches a JSON content document and renders it with the generator.
pub async fn load_json(tab: &TabDescriptor, resource: &str, fetcher: &dyn Fetcher) -> String {
    let raw = match timed_fetch("json", resource, fetcher).await {
        Ok(raw) => raw,
        Err(e) => return fallback(tab, "json", resource, &e),
    };

    match ContentDocument::parse(&raw) {
        Ok(doc) => generate(&doc, &tab.id),
        Err(e) => fallback(tab, "json", resource, &e),
    }
}

/// Fetches Markdown and applies the minimal transform.
pub async fn load_markdown(tab: &TabDescriptor, resource: &str, fetcher: &dyn Fetcher) -> String {
    match timed_fetch("markdown", resource, fetcher).await {
        Ok(raw) => markdown::to_html(&raw),
        Err(e) => fallback(tab, "markdown", resource, &e),
    }
}

/// Fetches HTML and returns it unmodified.
pub async fn load_html(tab: &TabDescriptor, resource: &str, fetcher: &dyn Fetcher) -> String {
    match timed_fetch("html", resource, fetcher).await {
        Ok(raw) => raw,
        Err(e) => fallback(tab, "html", resource, &e),
    }
}

async fn timed_fetch(
    source: &'static str,
    resource: &str,
    fetcher: &dyn Fetcher,
) -> Result<String, FetchError> {
    let started = Instant::now();
    let result = fetcher.fetch_text(resource).await;
    metrics::record_fetch_duration(source, started.elapsed());
    debug!(source, resource, ok = result.is_ok(), "content fetched");
    result
}

fn fallback(
    tab: &TabDescriptor,
    source: &'static str,
    resource: &str,
    error: &dyn std::fmt::Display,
) -> String {
    let kind = match source {
        "json" => "JSON",
        "markdown" => "Markdown",
        _ => "HTML",
    };
    warn!(tab = %tab.id, resource, error = %error, "Could not load {kind} for {}", tab.id);
    metrics::record_adapter_fallback(source);
    placeholder::empty_tab(tab)
}
