//! Configuration store.
//!
//! Holds the manifest for the lifetime of a portal session. The only field
//! written after load is each tab's `active` flag.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, error, info, warn};

use super::options::PortalOptions;
use super::schema::{AppInfo, Configuration, TabDescriptor};
use crate::error::ConfigError;
use crate::fetch::Fetcher;

/// Loads the manifest once and tracks the active tab.
#[derive(Debug)]
pub struct ConfigStore {
    config: RwLock<Configuration>,
}

impl ConfigStore {
    /// Wraps an already-loaded configuration.
    #[must_use]
    pub const fn new(config: Configuration) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Fetches and parses the manifest, falling back to
    /// [`Configuration::fallback`] on any failure. Never retries.
    pub async fn load(fetcher: &dyn Fetcher, options: &PortalOptions) -> Self {
        match Self::try_load(fetcher, options).await {
            Ok(config) => {
                info!(
                    manifest = %options.manifest,
                    tabs = config.navigation.tabs.len(),
                    "configuration loaded"
                );
                Self::new(config)
            }
            Err(e) => {
                error!(error = %e, "Error loading config");
                warn!("using fallback configuration");
                Self::new(Configuration::fallback())
            }
        }
    }

    /// Fetches, parses and validates the manifest without falling back.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unreachable`] when the fetch fails,
    /// [`ConfigError::Malformed`] when the document does not parse, and
    /// [`ConfigError::DuplicateTab`] when two tabs share an id.
    pub async fn try_load(
        fetcher: &dyn Fetcher,
        options: &PortalOptions,
    ) -> Result<Configuration, ConfigError> {
        let resource = options.manifest.clone();
        let raw = fetcher
            .fetch_text(&resource)
            .await
            .map_err(|source| ConfigError::Unreachable {
                resource: resource.clone(),
                source,
            })?;

        let config = if options.manifest_is_yaml() {
            serde_yaml::from_str::<Configuration>(&raw).map_err(|e| e.to_string())
        } else {
            serde_json::from_str::<Configuration>(&raw).map_err(|e| e.to_string())
        }
        .map_err(|message| ConfigError::Malformed {
            resource: resource.clone(),
            message,
        })?;

        validate(&config)?;
        Ok(config)
    }

    /// Returns a clone of the current configuration.
    #[must_use]
    pub fn snapshot(&self) -> Configuration {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the application metadata.
    #[must_use]
    pub fn app(&self) -> AppInfo {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .app
            .clone()
    }

    /// Looks up a tab by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<TabDescriptor> {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tab(id)
            .cloned()
    }

    /// Tabs sorted by `order`; ties keep manifest order.
    #[must_use]
    pub fn sorted_tabs(&self) -> Vec<TabDescriptor> {
        let guard = self.config.read().unwrap_or_else(PoisonError::into_inner);
        let mut tabs = guard.navigation.tabs.clone();
        tabs.sort_by_key(|t| t.order);
        tabs
    }

    /// Id of the tab whose `active` flag is set, if any.
    #[must_use]
    pub fn active_tab(&self) -> Option<String> {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .navigation
            .tabs
            .iter()
            .find(|t| t.active)
            .map(|t| t.id.clone())
    }

    /// Sets `active` on `tab_id` and clears it on every other tab.
    ///
    /// Returns `false` and leaves the flags untouched when the id is unknown.
    pub fn set_active(&self, tab_id: &str) -> bool {
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        if guard.tab(tab_id).is_none() {
            warn!(tab = tab_id, "cannot activate unknown tab");
            return false;
        }
        for tab in &mut guard.navigation.tabs {
            tab.active = tab.id == tab_id;
        }
        debug!(tab = tab_id, "active tab updated");
        true
    }

    /// Chooses the tab shown on startup.
    ///
    /// A fragment naming a known tab wins, then the manifest's active tab,
    /// then the first tab in manifest order.
    #[must_use]
    pub fn initial_tab(&self, fragment: Option<&str>) -> Option<String> {
        let guard = self.config.read().unwrap_or_else(PoisonError::into_inner);
        let fragment = fragment
            .map(|f| f.trim_start_matches('#'))
            .filter(|f| !f.is_empty());

        fragment
            .and_then(|f| guard.tab(f))
            .or_else(|| guard.navigation.tabs.iter().find(|t| t.active))
            .or_else(|| guard.navigation.tabs.first())
            .map(|t| t.id.clone())
    }
}

/// Rejects manifests with duplicate tab ids.
///
/// # Errors
///
/// Returns [`ConfigError::DuplicateTab`] naming the first repeated id.
pub fn validate(config: &Configuration) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for tab in &config.navigation.tabs {
        if !seen.insert(tab.id.as_str()) {
            return Err(ConfigError::DuplicateTab { id: tab.id.clone() });
        }
    }
    Ok(())
}
