//! Content source adapters.
//!
//! A tab's `content.source` tag is resolved once into a [`ContentSpec`];
//! each variant knows which resource to fetch and how to turn it into HTML.
//! Adapters never fail: fetch and parse problems degrade to the empty-state
//! placeholder.

mod adapters;

use tracing::debug;

use crate::config::{ContentSource, DEFAULT_JSON_DIR, MARKDOWN_DIR, TabDescriptor};
use crate::error::RenderError;
use crate::fetch::Fetcher;
use crate::render::placeholder;

pub use adapters::{load_html, load_json, load_markdown};

/// How a tab's content is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSpec {
    /// Structured JSON rendered by the generator
    JsonContent {
        /// Resource to fetch
        resource: String,
    },
    /// Markdown from the fixed `markdown/` directory
    MarkdownContent {
        /// Resource to fetch
        resource: String,
    },
    /// HTML injected verbatim
    HtmlContent {
        /// Resource to fetch
        resource: String,
    },
    /// No content source, or one this portal does not understand
    Unconfigured,
}

impl ContentSpec {
    /// Resolves the tab's content declaration.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingFile`] when a recognized source is
    /// declared without a `file`.
    pub fn from_tab(tab: &TabDescriptor) -> Result<Self, RenderError> {
        let Some(content) = &tab.content else {
            return Ok(Self::Unconfigured);
        };
        let source = match content.source {
            None => return Ok(Self::Unconfigured),
            Some(ContentSource::Other) => {
                debug!(tab = %tab.id, "unrecognized content source, using placeholder");
                return Ok(Self::Unconfigured);
            }
            Some(source) => source,
        };

        let file = content
            .file
            .as_deref()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| RenderError::MissingFile {
                tab: tab.id.clone(),
                kind: source.as_str(),
            })?;
        let path = content.path.as_deref();

        Ok(match source {
            ContentSource::Json => Self::JsonContent {
                resource: format!("{}{file}", path.unwrap_or(DEFAULT_JSON_DIR)),
            },
            ContentSource::Markdown => Self::MarkdownContent {
                resource: format!("{MARKDOWN_DIR}{file}"),
            },
            ContentSource::Html => Self::HtmlContent {
                resource: format!("{}{file}", path.unwrap_or_default()),
            },
            ContentSource::Other => Self::Unconfigured,
        })
    }

    /// Resource this spec fetches, if any.
    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        match self {
            Self::JsonContent { resource }
            | Self::MarkdownContent { resource }
            | Self::HtmlContent { resource } => Some(resource),
            Self::Unconfigured => None,
        }
    }

    /// Metrics label for the source kind.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::JsonContent { .. } => "json",
            Self::MarkdownContent { .. } => "markdown",
            Self::HtmlContent { .. } => "html",
            Self::Unconfigured => "none",
        }
    }

    /// Produces the tab's HTML. Never fails.
    pub async fn resolve(&self, tab: &TabDescriptor, fetcher: &dyn Fetcher) -> String {
        match self {
            Self::JsonContent { resource } => load_json(tab, resource, fetcher).await,
            Self::MarkdownContent { resource } => load_markdown(tab, resource, fetcher).await,
            Self::HtmlContent { resource } => load_html(tab, resource, fetcher).await,
            Self::Unconfigured => placeholder::empty_tab(tab),
        }
    }
}
