//! Runtime options for the portal.
//!
//! Defaults can be overridden through environment variables so a deployed
//! portal can be tuned without rebuilding.

use std::time::Duration;

/// Default manifest resource.
pub const DEFAULT_MANIFEST: &str = "app.json";

/// Runtime options shared by the fetchers and the configuration store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalOptions {
    /// Manifest resource, relative to the site root.
    pub manifest: String,

    /// Per-request fetch timeout.
    pub fetch_timeout: Duration,

    /// Maximum size of any fetched resource in bytes.
    pub max_resource_size: usize,
}

impl Default for PortalOptions {
    fn default() -> Self {
        Self {
            manifest: env_or("DOCPORTAL_MANIFEST", DEFAULT_MANIFEST.to_string()),
            fetch_timeout: Duration::from_millis(env_or("DOCPORTAL_FETCH_TIMEOUT_MS", 10_000)),
            max_resource_size: env_or("DOCPORTAL_MAX_RESOURCE_SIZE", 5 * 1024 * 1024),
        }
    }
}

impl PortalOptions {
    /// Returns `true` when the manifest should be parsed as YAML.
    #[must_use]
    pub fn manifest_is_yaml(&self) -> bool {
        let lower = self.manifest.to_ascii_lowercase();
        lower.ends_with(".yaml") || lower.ends_with(".yml")
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_detection_by_extension() {
        let mut options = PortalOptions {
            manifest: "app.json".into(),
            fetch_timeout: Duration::from_secs(1),
            max_resource_size: 1024,
        };
        assert!(!options.manifest_is_yaml());
        options.manifest = "site/App.YAML".into();
        assert!(options.manifest_is_yaml());
        options.manifest = "app.yml".into();
        assert!(options.manifest_is_yaml());
    }

    #[test]
    fn env_or_falls_back_on_garbage() {
        // Variable name is unique to this test so parallel tests cannot race it.
        assert_eq!(env_or("DOCPORTAL_TEST_UNSET_VARIABLE", 42_u64), 42);
    }
}
