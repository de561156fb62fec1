//! Tab controller.
//!
//! [`PortalController`] owns the configuration store, the content cache,
//! the page model and the history, and sequences every tab switch:
//! resolve the descriptor, mark it active, show the loading indicator,
//! attach assets and resolve content concurrently, then inject.
//!
//! Overlapping switches are ordered by a monotonically increasing request
//! token. Only the most recently issued token may write the page, the
//! history or the current tab; older results are still cached.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Local;
use dashmap::DashMap;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::cache::ContentCache;
use crate::config::{ConfigStore, Configuration, PortalOptions, TabDescriptor};
use crate::content::ContentSpec;
use crate::error::RenderError;
use crate::fetch::Fetcher;
use crate::history::History;
use crate::navigation;
use crate::observability::metrics;
use crate::page::{AssetElement, AssetKind, AssetStatus, Page};
use crate::render::placeholder;

/// Per-tab lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TabState {
    #[default]
    Idle,
    Loading,
    Rendered,
    Error,
}

/// Result of a [`PortalController::switch_tab`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Content was injected
    Rendered {
        /// Served from the content cache without touching an adapter
        from_cache: bool,
    },
    /// The tab could not be rendered; the error fragment is shown
    Failed(RenderError),
    /// A newer switch was issued before this one finished
    Superseded,
    /// No tab with that id exists; nothing changed
    UnknownTab,
}

impl SwitchOutcome {
    /// Returns `true` when this switch wrote the content region.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Rendered { .. } | Self::Failed(_))
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::Rendered { from_cache: true } => "cached",
            Self::Rendered { from_cache: false } => "rendered",
            Self::Failed(_) => "error",
            Self::Superseded => "superseded",
            Self::UnknownTab => "unknown_tab",
        }
    }
}

/// A switch outcome together with the content region it wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchReport {
    pub outcome: SwitchOutcome,
    /// Content region as left by this switch; `None` unless applied
    pub content: Option<String>,
}

impl SwitchReport {
    const fn unapplied(outcome: SwitchOutcome) -> Self {
        Self {
            outcome,
            content: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TabStatus {
    state: TabState,
    token: u64,
}

/// The portal instance handed to every consumer.
pub struct PortalController {
    fetcher: Arc<dyn Fetcher>,
    store: ConfigStore,
    cache: ContentCache,
    page: Mutex<Page>,
    history: Mutex<History>,
    current_tab: Mutex<Option<String>>,
    tab_states: DashMap<String, TabStatus>,
    latest_request: AtomicU64,
}

impl std::fmt::Debug for PortalController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalController")
            .field("fetcher", &self.fetcher.describe())
            .field("cache_entries", &self.cache.len())
            .field("latest_request", &self.latest_request.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl PortalController {
    /// Builds a controller around a loaded store and paints navigation and
    /// footer. No tab is shown yet.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, store: ConfigStore) -> Self {
        let tabs = store.sorted_tabs();
        let app = store.app();
        let page = Page {
            app_name: app.name.clone(),
            nav: navigation::nav_links(&tabs),
            footer_links: navigation::footer_links(&tabs),
            last_updated: navigation::format_last_updated(
                app.last_updated.as_deref(),
                Local::now().date_naive(),
            ),
            ..Page::default()
        };

        Self {
            fetcher,
            store,
            cache: ContentCache::new(),
            page: Mutex::new(page),
            history: Mutex::new(History::new()),
            current_tab: Mutex::new(None),
            tab_states: DashMap::new(),
            latest_request: AtomicU64::new(0),
        }
    }

    /// Loads the manifest and shows the initial tab.
    pub async fn bootstrap(
        fetcher: Arc<dyn Fetcher>,
        options: &PortalOptions,
        fragment: Option<&str>,
    ) -> Arc<Self> {
        let controller = Self::load(fetcher, options).await;
        controller.show_initial(fragment).await;
        controller
    }

    /// Loads the manifest and paints navigation, without showing a tab.
    pub async fn load(fetcher: Arc<dyn Fetcher>, options: &PortalOptions) -> Arc<Self> {
        let store = ConfigStore::load(fetcher.as_ref(), options).await;
        Arc::new(Self::new(fetcher, store))
    }

    /// Shows the initial tab: the one named by `fragment` if known, else the
    /// manifest's active tab, else the first tab. The switch records the
    /// current history entry instead of pushing a new one.
    ///
    /// Returns `None` when the manifest declares no tabs.
    pub async fn show_initial(&self, fragment: Option<&str>) -> Option<SwitchReport> {
        let Some(initial) = self.store.initial_tab(fragment) else {
            warn!("manifest declares no tabs");
            return None;
        };
        info!(tab = %initial, "showing initial tab");
        let report = self.show_tab(&initial, false).await;
        if report.outcome.is_applied() {
            self.lock_history().replace(&initial);
        }
        Some(report)
    }

    /// Switches the displayed tab.
    ///
    /// With `update_history` a history entry is pushed once the content is
    /// applied; history replays pass `false`.
    pub async fn switch_tab(&self, tab_id: &str, update_history: bool) -> SwitchOutcome {
        self.show_tab(tab_id, update_history).await.outcome
    }

    /// Like [`switch_tab`](Self::switch_tab), also returning the content
    /// this switch wrote. Reading [`page`](Self::page) afterwards may already
    /// observe a later switch.
    pub async fn show_tab(&self, tab_id: &str, update_history: bool) -> SwitchReport {
        let Some(tab) = self.store.find(tab_id) else {
            error!(tab = tab_id, "Tab not found");
            metrics::record_tab_switch(SwitchOutcome::UnknownTab.label());
            return SwitchReport::unapplied(SwitchOutcome::UnknownTab);
        };

        let token = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(tab = %tab.id, token, "switching tab");

        self.store.set_active(&tab.id);
        {
            let mut page = self.lock_page();
            page.mark_active(&tab.id);
            page.show_loading();
        }
        self.tab_states.insert(
            tab.id.clone(),
            TabStatus {
                state: TabState::Loading,
                token,
            },
        );

        let ((), content) = tokio::join!(self.attach_assets(&tab), self.resolve_content(&tab));

        let report = self.apply(&tab, token, content, update_history);
        metrics::record_tab_switch(report.outcome.label());
        report
    }

    /// Writes a resolved switch to the page, unless a newer one was issued.
    fn apply(
        &self,
        tab: &TabDescriptor,
        token: u64,
        content: Result<(String, bool), RenderError>,
        update_history: bool,
    ) -> SwitchReport {
        let mut page = self.lock_page();

        if self.latest_request.load(Ordering::SeqCst) != token {
            debug!(tab = %tab.id, token, "switch superseded, discarding result");
            if let Some(mut status) = self.tab_states.get_mut(&tab.id) {
                if status.token == token {
                    status.state = TabState::Idle;
                }
            }
            return SwitchReport::unapplied(SwitchOutcome::Superseded);
        }

        // Concurrent switches may have attached assets for other tabs.
        for kind in [AssetKind::Stylesheet, AssetKind::Script] {
            let keep = declared_asset(tab, kind).map(|_| kind.element_id(&tab.id));
            page.remove_assets_except(kind, keep.as_deref());
        }

        let (outcome, state) = match content {
            Ok((html, from_cache)) => {
                page.inject(html);
                let app_name = self.store.app().name;
                page.set_title(format!("{} - {app_name}", tab.display_title()));
                (SwitchOutcome::Rendered { from_cache }, TabState::Rendered)
            }
            Err(e) => {
                error!(tab = %tab.id, error = %e, "Error loading tab");
                page.show_error(placeholder::error_content(tab));
                (SwitchOutcome::Failed(e), TabState::Error)
            }
        };
        page.fragment = Some(tab.id.clone());

        if update_history {
            self.lock_history().push(&tab.id);
        }
        *self
            .current_tab
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(tab.id.clone());
        self.tab_states
            .insert(tab.id.clone(), TabStatus { state, token });

        SwitchReport {
            outcome,
            content: Some(page.content.clone()),
        }
    }

    /// Cache hit, or adapter dispatch with unconditional caching.
    async fn resolve_content(&self, tab: &TabDescriptor) -> Result<(String, bool), RenderError> {
        if let Some(html) = self.cache.get(&tab.id) {
            debug!(tab = %tab.id, "content cache hit");
            return Ok((html, true));
        }
        debug!(tab = %tab.id, "content cache miss");

        let spec = ContentSpec::from_tab(tab)?;
        let html = spec.resolve(tab, self.fetcher.as_ref()).await;
        self.cache.insert(&tab.id, html.clone());
        Ok((html, false))
    }

    async fn attach_assets(&self, tab: &TabDescriptor) {
        tokio::join!(
            self.attach_asset(tab, AssetKind::Stylesheet),
            self.attach_asset(tab, AssetKind::Script)
        );
    }

    /// Removes stale assets of `kind`, then attaches and probes the tab's
    /// own. A failed probe is logged; the element stays attached.
    async fn attach_asset(&self, tab: &TabDescriptor, kind: AssetKind) {
        let href = declared_asset(tab, kind);
        let id = kind.element_id(&tab.id);

        let attached = {
            let mut page = self.lock_page();
            page.remove_assets_except(kind, href.as_ref().map(|_| id.as_str()));
            href.as_ref().is_some_and(|href| {
                page.attach_asset(AssetElement {
                    id: id.clone(),
                    kind,
                    href: href.clone(),
                    status: AssetStatus::Pending,
                })
            })
        };
        let Some(href) = href.filter(|_| attached) else {
            return;
        };

        let status = match self.fetcher.fetch_text(&href).await {
            Ok(_) => {
                debug!(tab = %tab.id, %kind, %href, "asset loaded");
                AssetStatus::Loaded
            }
            Err(e) => {
                warn!(tab = %tab.id, %kind, %href, error = %e, "Could not load {kind} for {}", tab.id);
                metrics::record_asset_failure(kind.as_str());
                AssetStatus::Failed
            }
        };
        self.lock_page().set_asset_status(&id, status);
    }

    /// Evicts the current tab from the cache and re-renders it without a
    /// history entry. Returns `None` when no tab is shown.
    pub async fn refresh(&self) -> Option<SwitchReport> {
        let current = self.current_tab()?;
        info!(tab = %current, "refreshing tab");
        self.cache.remove(&current);
        Some(self.show_tab(&current, false).await)
    }

    /// Drops every cached render.
    pub fn clear_cache(&self) {
        let entries = self.cache.len();
        self.cache.clear();
        info!(entries, "content cache cleared");
    }

    /// Navigates one history entry back. Returns `None` at the start.
    pub async fn back(&self) -> Option<SwitchReport> {
        let target = self.lock_history().back().map(str::to_owned)?;
        Some(self.show_tab(&target, false).await)
    }

    /// Navigates one history entry forward. Returns `None` at the end.
    pub async fn forward(&self) -> Option<SwitchReport> {
        let target = self.lock_history().forward().map(str::to_owned)?;
        Some(self.show_tab(&target, false).await)
    }

    /// Snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> Configuration {
        self.store.snapshot()
    }

    #[must_use]
    pub fn current_tab(&self) -> Option<String> {
        self.current_tab
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot of the page model.
    #[must_use]
    pub fn page(&self) -> Page {
        self.lock_page().clone()
    }

    /// Snapshot of the session history.
    #[must_use]
    pub fn history(&self) -> History {
        self.lock_history().clone()
    }

    #[must_use]
    pub fn tab_state(&self, tab_id: &str) -> TabState {
        self.tab_states
            .get(tab_id)
            .map(|status| status.state)
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn cache(&self) -> &ContentCache {
        &self.cache
    }

    #[must_use]
    pub const fn store(&self) -> &ConfigStore {
        &self.store
    }

    fn lock_page(&self) -> MutexGuard<'_, Page> {
        self.page.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_history(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resource of the tab's declared stylesheet or script.
fn declared_asset(tab: &TabDescriptor, kind: AssetKind) -> Option<String> {
    match kind {
        AssetKind::Stylesheet => tab.styles.as_ref().map(|_| tab.styles_resource()),
        AssetKind::Script => tab.scripts.as_ref().map(|_| tab.scripts_resource()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticFetcher;

    const MANIFEST: &str = r#"{
        "app": {"name": "Ops Portal", "lastUpdated": "2024-03-07"},
        "navigation": {"tabs": [
            {"id": "homepage", "name": "Home", "order": 1, "active": true},
            {"id": "about", "name": "About", "title": "About", "order": 2,
             "content": {"source": "json", "file": "about.json"},
             "styles": {"file": "about.css"}},
            {"id": "guide", "name": "Guide", "order": 3,
             "content": {"source": "markdown", "file": "guide.md"},
             "scripts": {"file": "guide.js"}},
            {"id": "broken", "name": "Broken", "order": 4,
             "content": {"source": "html"}}
        ]}
    }"#;

    fn site() -> Arc<StaticFetcher> {
        Arc::new(
            StaticFetcher::new()
                .with("app.json", MANIFEST)
                .with(
                    "json/about.json",
                    r#"{"title":"About Us","sections":[{"title":"Mission","content":"Our mission..."}]}"#,
                )
                .with("css/about.css", "body {}")
                .with("markdown/guide.md", "# Guide\n\n* one"),
        )
    }

    async fn portal(fetcher: &Arc<StaticFetcher>) -> Arc<PortalController> {
        let options = PortalOptions::default();
        PortalController::bootstrap(fetcher.clone(), &options, None).await
    }

    #[tokio::test]
    async fn bootstrap_shows_active_tab() {
        let fetcher = site();
        let portal = portal(&fetcher).await;

        assert_eq!(portal.current_tab().as_deref(), Some("homepage"));
        let page = portal.page();
        assert!(page.content.contains("empty-tab"));
        assert_eq!(page.title, "Home - Ops Portal");
        assert_eq!(page.last_updated, "3/7/2024");
        assert_eq!(page.nav.len(), 4);
        assert_eq!(portal.history().len(), 1);
    }

    #[tokio::test]
    async fn bootstrap_honours_fragment() {
        let fetcher = site();
        let options = PortalOptions::default();
        let portal = PortalController::bootstrap(fetcher.clone(), &options, Some("#about")).await;
        assert_eq!(portal.current_tab().as_deref(), Some("about"));
        assert_eq!(portal.config().navigation.tabs.iter().filter(|t| t.active).count(), 1);
    }

    #[tokio::test]
    async fn switch_renders_json_and_sets_title() {
        let fetcher = site();
        let portal = portal(&fetcher).await;

        let outcome = portal.switch_tab("about", true).await;
        assert_eq!(outcome, SwitchOutcome::Rendered { from_cache: false });

        let page = portal.page();
        assert!(page.content.contains(r#"<div class="page-header"><h1>About Us</h1></div>"#));
        assert_eq!(page.title, "About - Ops Portal");
        assert_eq!(page.content_classes, vec!["fade-in"]);
        assert_eq!(page.active_link(), Some("about"));
        assert_eq!(page.fragment.as_deref(), Some("about"));
        assert_eq!(portal.tab_state("about"), TabState::Rendered);
    }

    #[tokio::test]
    async fn second_switch_is_served_from_cache() {
        let fetcher = site();
        let portal = portal(&fetcher).await;

        portal.switch_tab("about", true).await;
        let first = portal.page().content;
        let outcome = portal.switch_tab("about", true).await;

        assert_eq!(outcome, SwitchOutcome::Rendered { from_cache: true });
        assert_eq!(portal.page().content, first);
        assert_eq!(fetcher.fetch_count("json/about.json"), 1);
    }

    #[tokio::test]
    async fn unknown_tab_changes_nothing() {
        let fetcher = site();
        let portal = portal(&fetcher).await;
        let before = portal.page();

        assert_eq!(portal.switch_tab("nope", true).await, SwitchOutcome::UnknownTab);
        assert_eq!(portal.page(), before);
        assert_eq!(portal.current_tab().as_deref(), Some("homepage"));
        assert_eq!(portal.history().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_shows_error_and_is_not_cached() {
        let fetcher = site();
        let portal = portal(&fetcher).await;

        let outcome = portal.switch_tab("broken", true).await;
        assert!(matches!(outcome, SwitchOutcome::Failed(RenderError::MissingFile { .. })));
        assert!(portal.page().content.contains("Error Loading Broken"));
        assert_eq!(portal.tab_state("broken"), TabState::Error);
        assert!(!portal.cache().contains("broken"));

        // Other tabs still switch.
        assert!(portal.switch_tab("guide", true).await.is_applied());
        assert_eq!(portal.tab_state("guide"), TabState::Rendered);
    }

    #[tokio::test]
    async fn assets_follow_the_active_tab() {
        let fetcher = site();
        let portal = portal(&fetcher).await;

        portal.switch_tab("about", true).await;
        let page = portal.page();
        assert_eq!(
            page.asset("style-about").map(|a| a.status),
            Some(AssetStatus::Loaded)
        );

        portal.switch_tab("guide", true).await;
        let page = portal.page();
        assert!(!page.has_asset("style-about"));
        // js/guide.js does not exist: attached but failed.
        assert_eq!(
            page.asset("script-guide").map(|a| a.status),
            Some(AssetStatus::Failed)
        );
        assert!(page.content.contains("<h1>Guide</h1>"));

        portal.switch_tab("homepage", true).await;
        assert!(portal.page().head.is_empty());
    }

    #[tokio::test]
    async fn history_round_trip() {
        let fetcher = site();
        let portal = portal(&fetcher).await;

        portal.switch_tab("about", true).await;
        assert_eq!(portal.history().len(), 2);

        let back = portal.back().await;
        assert!(back.is_some_and(|r| r.outcome.is_applied()));
        assert_eq!(portal.current_tab().as_deref(), Some("homepage"));
        assert_eq!(portal.history().len(), 2);
        assert!(portal.back().await.is_none());

        portal.forward().await;
        assert_eq!(portal.current_tab().as_deref(), Some("about"));
        assert!(portal.forward().await.is_none());
    }

    #[tokio::test]
    async fn refresh_refetches_current_tab() {
        let fetcher = site();
        let portal = portal(&fetcher).await;
        portal.switch_tab("about", true).await;

        fetcher.insert("json/about.json", r#"{"title":"About Them"}"#);
        let outcome = portal.refresh().await;

        let report = outcome.unwrap();
        assert_eq!(report.outcome, SwitchOutcome::Rendered { from_cache: false });
        assert!(report.content.is_some_and(|c| c.contains("About Them")));
        assert!(portal.page().content.contains("About Them"));
        assert_eq!(fetcher.fetch_count("json/about.json"), 2);
        assert_eq!(portal.history().len(), 2);
    }

    #[tokio::test]
    async fn clear_cache_forces_refetch() {
        let fetcher = site();
        let portal = portal(&fetcher).await;
        portal.switch_tab("about", true).await;
        portal.clear_cache();
        assert!(portal.cache().is_empty());

        portal.switch_tab("about", false).await;
        assert_eq!(fetcher.fetch_count("json/about.json"), 2);
    }

    #[tokio::test]
    async fn missing_manifest_uses_fallback() {
        let fetcher = Arc::new(StaticFetcher::new());
        let portal = portal(&fetcher).await;
        let config = portal.config();
        assert_eq!(config.navigation.tabs.len(), 1);
        assert_eq!(portal.current_tab().as_deref(), Some("homepage"));
    }

    /// Holds one resource back until released.
    struct GatedFetcher {
        inner: Arc<StaticFetcher>,
        gated: &'static str,
        gate: tokio::sync::Notify,
    }

    #[async_trait::async_trait]
    impl Fetcher for GatedFetcher {
        async fn fetch_text(&self, resource: &str) -> Result<String, crate::error::FetchError> {
            if resource == self.gated {
                self.gate.notified().await;
            }
            self.inner.fetch_text(resource).await
        }

        fn describe(&self) -> String {
            "gated".to_string()
        }
    }

    #[tokio::test]
    async fn loading_indicator_shows_while_content_resolves() {
        let fetcher = Arc::new(GatedFetcher {
            inner: site(),
            gated: "json/about.json",
            gate: tokio::sync::Notify::new(),
        });
        let portal =
            PortalController::bootstrap(fetcher.clone(), &PortalOptions::default(), None).await;
        assert!(portal.page().content_classes.iter().any(|c| c == "fade-in"));

        let switch = tokio::spawn({
            let portal = portal.clone();
            async move { portal.switch_tab("about", true).await }
        });
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let page = portal.page();
        assert_eq!(page.content, placeholder::loading());
        assert!(!page.content_classes.iter().any(|c| c == "fade-in"));
        assert_eq!(page.active_link(), Some("about"));
        assert_eq!(portal.tab_state("about"), TabState::Loading);

        fetcher.gate.notify_one();
        assert_eq!(
            switch.await.unwrap(),
            SwitchOutcome::Rendered { from_cache: false }
        );
        let page = portal.page();
        assert!(page.content.contains("<h1>About Us</h1>"));
        assert_eq!(page.content_classes, vec!["fade-in"]);
    }

    #[tokio::test]
    async fn report_carries_the_content_it_wrote() {
        let fetcher = site();
        let portal = portal(&fetcher).await;

        let report = portal.show_tab("guide", true).await;
        assert!(report.outcome.is_applied());
        assert_eq!(report.content.as_deref(), Some(portal.page().content.as_str()));

        let unknown = portal.show_tab("nope", true).await;
        assert_eq!(unknown.outcome, SwitchOutcome::UnknownTab);
        assert!(unknown.content.is_none());
    }

    #[tokio::test]
    async fn show_initial_reports_render_failure() {
        let fetcher = site();
        let portal = PortalController::load(fetcher.clone(), &PortalOptions::default()).await;
        assert!(portal.current_tab().is_none());

        let report = portal.show_initial(Some("broken")).await.unwrap();
        assert!(matches!(
            report.outcome,
            SwitchOutcome::Failed(RenderError::MissingFile { .. })
        ));
        assert!(report.content.is_some_and(|c| c.contains("Error Loading Broken")));
        assert_eq!(portal.history().len(), 1);
    }
}
