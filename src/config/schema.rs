//! Manifest schema.
//!
//! Mirrors the `app.json` document: application metadata, the navigation
//! tab list and an opaque `departments` block that page decorators read.

use serde::{Deserialize, Serialize};

/// Default stylesheet directory for tabs without an explicit `styles.path`.
pub const DEFAULT_STYLES_DIR: &str = "css/";

/// Default script directory for tabs without an explicit `scripts.path`.
pub const DEFAULT_SCRIPTS_DIR: &str = "js/";

/// Default directory for JSON content documents.
pub const DEFAULT_JSON_DIR: &str = "json/";

/// Fixed directory for Markdown content. `content.path` is ignored.
pub const MARKDOWN_DIR: &str = "markdown/";

/// Application name used when the manifest is unavailable.
pub const FALLBACK_APP_NAME: &str = "Documentation Portal";

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Application metadata.
    #[serde(default)]
    pub app: AppInfo,

    /// Navigation manifest.
    #[serde(default)]
    pub navigation: Navigation,

    /// Department directory consumed by page decorators; never interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departments: Option<serde_json::Value>,
}

impl Configuration {
    /// The minimal configuration used when the manifest cannot be loaded:
    /// a single active `homepage` tab with no content source.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            app: AppInfo {
                name: FALLBACK_APP_NAME.to_string(),
                version: Some("1.0.0".to_string()),
                last_updated: None,
            },
            navigation: Navigation {
                tabs: vec![TabDescriptor {
                    id: "homepage".to_string(),
                    name: "Home".to_string(),
                    title: Some("Documentation Home".to_string()),
                    order: 1,
                    active: true,
                    icon: None,
                    content: None,
                    styles: None,
                    scripts: None,
                }],
            },
            departments: None,
        }
    }

    /// Looks up a tab by id.
    #[must_use]
    pub fn tab(&self, id: &str) -> Option<&TabDescriptor> {
        self.navigation.tabs.iter().find(|t| t.id == id)
    }
}

/// Application metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    /// Display name, appended to every document title.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Free-form version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// ISO date (`YYYY-MM-DD`) shown in the footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: None,
            last_updated: None,
        }
    }
}

fn default_app_name() -> String {
    FALLBACK_APP_NAME.to_string()
}

/// Navigation block holding the tab list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    /// Tabs in declaration order. Display order comes from [`TabDescriptor::order`].
    #[serde(default)]
    pub tabs: Vec<TabDescriptor>,
}

/// One navigable tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDescriptor {
    /// Unique, immutable key. Also the URL fragment and cache key.
    pub id: String,

    /// Label shown in navigation.
    pub name: String,

    /// Longer title; used for the document title and link tooltip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Sort key for navigation.
    #[serde(default)]
    pub order: i64,

    /// Whether this is the active tab. Exactly one tab is active after a switch.
    #[serde(default)]
    pub active: bool,

    /// Icon glyph reference, rendered as `icon-{icon}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Content resource and how to interpret it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentRef>,

    /// Stylesheet attached while the tab is displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<AssetRef>,

    /// Script attached while the tab is displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<AssetRef>,
}

impl TabDescriptor {
    /// Returns `title`, or `name` when no title is configured.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Content resource the tab uses, or would use if configured.
    #[must_use]
    pub fn content_resource(&self) -> String {
        let content = self.content.as_ref();
        let dir = content
            .and_then(|c| c.path.as_deref())
            .unwrap_or(DEFAULT_JSON_DIR);
        content.and_then(|c| c.file.clone()).map_or_else(
            || format!("{dir}{}.json", self.id),
            |file| format!("{dir}{file}"),
        )
    }

    /// Stylesheet resource the tab uses, or would use if configured.
    #[must_use]
    pub fn styles_resource(&self) -> String {
        asset_resource(self.styles.as_ref(), DEFAULT_STYLES_DIR, &self.id, "css")
    }

    /// Script resource the tab uses, or would use if configured.
    #[must_use]
    pub fn scripts_resource(&self) -> String {
        asset_resource(self.scripts.as_ref(), DEFAULT_SCRIPTS_DIR, &self.id, "js")
    }
}

fn asset_resource(asset: Option<&AssetRef>, default_dir: &str, id: &str, ext: &str) -> String {
    let dir = asset.and_then(|a| a.path.as_deref()).unwrap_or(default_dir);
    asset
        .and_then(|a| a.file.as_deref())
        .map_or_else(|| format!("{dir}{id}.{ext}"), |file| format!("{dir}{file}"))
}

/// Content reference of a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRef {
    /// Interpretation of the resource. Absent means no content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ContentSource>,

    /// Directory prefix, including the trailing slash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// File name inside `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Declared content source tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// Structured JSON document rendered by the generator
    Json,
    /// Markdown converted by the minimal transform
    Markdown,
    /// HTML injected verbatim
    Html,
    /// Any other tag; treated as unconfigured
    #[serde(other)]
    Other,
}

impl ContentSource {
    /// Returns the tag as written in the manifest.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stylesheet or script reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Directory prefix, including the trailing slash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// File name inside `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}
