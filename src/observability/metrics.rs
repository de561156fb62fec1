//! Prometheus-compatible metrics for the portal pipeline.
//!
//! Label values that originate from manifests are sanitized before use so a
//! hostile manifest cannot blow up label cardinality.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::ServeError;

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Content source labels; anything else is bucketed as `__unknown__`.
const KNOWN_SOURCES: [&str; 4] = ["json", "markdown", "html", "none"];

/// Asset kind labels.
const KNOWN_ASSET_KINDS: [&str; 2] = ["stylesheet", "script"];

/// Returns `label` when it is in `known`, `"__unknown__"` otherwise.
#[must_use]
pub fn sanitize_label<'a>(label: &'a str, known: &[&str]) -> &'a str {
    if known.contains(&label) {
        label
    } else {
        "__unknown__"
    }
}

/// Initializes the global metrics recorder.
///
/// With `Some(port)` a Prometheus HTTP listener is started on
/// `127.0.0.1:<port>`; with `None` the recorder is installed without an
/// endpoint.
///
/// # Errors
///
/// Returns [`ServeError::Metrics`] if the recorder or listener cannot be
/// installed (e.g. port already in use).
pub fn init_metrics(port: Option<u16>) -> Result<(), ServeError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    port.map_or_else(
        || PrometheusBuilder::new().install_recorder().map(|_| ()),
        |p| {
            PrometheusBuilder::new()
                .with_http_listener(([127, 0, 0, 1], p))
                .install()
        },
    )
    .map_err(|e| ServeError::Metrics(e.to_string()))?;

    describe_metrics();
    Ok(())
}

fn describe_metrics() {
    describe_counter!(
        "docportal_tab_switches_total",
        "Tab switch requests by outcome"
    );
    describe_counter!("docportal_cache_hits_total", "Content cache hits");
    describe_counter!("docportal_cache_misses_total", "Content cache misses");
    describe_counter!(
        "docportal_adapter_fallbacks_total",
        "Adapter results replaced by the placeholder"
    );
    describe_counter!(
        "docportal_asset_failures_total",
        "Stylesheets or scripts that failed to load"
    );
    describe_histogram!(
        "docportal_fetch_duration_ms",
        "Content fetch duration in milliseconds"
    );
    describe_gauge!("docportal_cache_entries", "Entries in the content cache");
}

/// Records a tab switch outcome (`rendered`, `cached`, `error`,
/// `superseded`, `unknown_tab`).
pub fn record_tab_switch(outcome: &'static str) {
    counter!("docportal_tab_switches_total", "outcome" => outcome).increment(1);
}

/// Records a cache lookup.
pub fn record_cache_lookup(hit: bool) {
    if hit {
        counter!("docportal_cache_hits_total").increment(1);
    } else {
        counter!("docportal_cache_misses_total").increment(1);
    }
}

/// Records an adapter that fell back to the placeholder.
pub fn record_adapter_fallback(source: &str) {
    let label = sanitize_label(source, &KNOWN_SOURCES);
    counter!("docportal_adapter_fallbacks_total", "source" => label.to_owned()).increment(1);
}

/// Records a stylesheet or script failure.
pub fn record_asset_failure(kind: &str) {
    let label = sanitize_label(kind, &KNOWN_ASSET_KINDS);
    counter!("docportal_asset_failures_total", "kind" => label.to_owned()).increment(1);
}

/// Records how long an adapter's fetch took.
pub fn record_fetch_duration(source: &str, duration: Duration) {
    let label = sanitize_label(source, &KNOWN_SOURCES);
    histogram!("docportal_fetch_duration_ms", "source" => label.to_owned())
        .record(duration.as_secs_f64() * 1000.0);
}

/// Sets the cache size gauge.
#[allow(clippy::cast_precision_loss)]
pub fn set_cache_entries(count: usize) {
    gauge!("docportal_cache_entries").set(count as f64);
}
