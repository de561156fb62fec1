//! Headless page model.
//!
//! Stands in for the browser document: head assets, navigation, footer,
//! the content region and the document title. The controller is the only
//! writer; consumers read snapshots.

use std::fmt;

use serde::Serialize;

use crate::navigation::{self, FooterLink, NavLink};
use crate::render::{Element, Node, placeholder};

/// Marker class applied to freshly injected content.
pub const FADE_IN_CLASS: &str = "fade-in";

/// Kind of per-tab head asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Stylesheet,
    Script,
}

impl AssetKind {
    /// Prefix of the per-tab marker id.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Stylesheet => "style-",
            Self::Script => "script-",
        }
    }

    /// Marker id of this kind of asset for a tab.
    #[must_use]
    pub fn element_id(self, tab_id: &str) -> String {
        format!("{}{tab_id}", self.id_prefix())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stylesheet => "stylesheet",
            Self::Script => "script",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load state of an attached asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Pending,
    Loaded,
    Failed,
}

/// A stylesheet or script element in the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetElement {
    pub id: String,
    pub kind: AssetKind,
    pub href: String,
    pub status: AssetStatus,
}

impl AssetElement {
    fn to_element(&self) -> Element {
        match self.kind {
            AssetKind::Stylesheet => Element::new("link")
                .attr("id", &self.id)
                .attr("rel", "stylesheet")
                .attr("href", &self.href),
            AssetKind::Script => Element::new("script")
                .attr("id", &self.id)
                .attr("src", &self.href),
        }
    }
}

/// Document state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Application name shown in the header
    pub app_name: String,
    /// Per-tab head assets in attachment order
    pub head: Vec<AssetElement>,
    pub nav: Vec<NavLink>,
    pub footer_links: Vec<FooterLink>,
    /// Footer "last updated" text
    pub last_updated: String,
    /// Content region HTML
    pub content: String,
    /// Marker classes on the content region
    pub content_classes: Vec<String>,
    /// Document title
    pub title: String,
    /// Location fragment, without the `#`
    pub fragment: Option<String>,
}

impl Page {
    /// Shows the loading indicator and drops the entrance marker.
    pub fn show_loading(&mut self) {
        self.content = placeholder::loading();
        self.content_classes.retain(|c| c != FADE_IN_CLASS);
    }

    /// Injects rendered content with the entrance marker.
    pub fn inject(&mut self, html: String) {
        self.content = html;
        if !self.content_classes.iter().any(|c| c == FADE_IN_CLASS) {
            self.content_classes.push(FADE_IN_CLASS.to_string());
        }
    }

    /// Replaces the content region with an error fragment.
    pub fn show_error(&mut self, html: String) {
        self.content = html;
        self.content_classes.retain(|c| c != FADE_IN_CLASS);
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// Marks `tab_id`'s navigation link active and clears every other.
    pub fn mark_active(&mut self, tab_id: &str) {
        for link in &mut self.nav {
            link.active = link.tab_id == tab_id;
        }
    }

    /// Id of the active navigation link.
    #[must_use]
    pub fn active_link(&self) -> Option<&str> {
        self.nav
            .iter()
            .find(|l| l.active)
            .map(|l| l.tab_id.as_str())
    }

    /// Removes every asset of `kind` whose id is not `keep`.
    ///
    /// Returns the removed ids.
    pub fn remove_assets_except(&mut self, kind: AssetKind, keep: Option<&str>) -> Vec<String> {
        let mut removed = Vec::new();
        self.head.retain(|asset| {
            let stale = asset.kind == kind && Some(asset.id.as_str()) != keep;
            if stale {
                removed.push(asset.id.clone());
            }
            !stale
        });
        removed
    }

    #[must_use]
    pub fn has_asset(&self, id: &str) -> bool {
        self.head.iter().any(|a| a.id == id)
    }

    #[must_use]
    pub fn asset(&self, id: &str) -> Option<&AssetElement> {
        self.head.iter().find(|a| a.id == id)
    }

    /// Attaches an asset unless one with the same id is present.
    ///
    /// Returns `true` when the asset was attached.
    pub fn attach_asset(&mut self, asset: AssetElement) -> bool {
        if self.has_asset(&asset.id) {
            return false;
        }
        self.head.push(asset);
        true
    }

    /// Updates an attached asset's load status. Unknown ids are ignored.
    pub fn set_asset_status(&mut self, id: &str, status: AssetStatus) {
        if let Some(asset) = self.head.iter_mut().find(|a| a.id == id) {
            asset.status = status;
        }
    }

    /// The content region element.
    #[must_use]
    pub fn content_region(&self) -> Element {
        let mut main = Element::new("main")
            .attr("id", "content-container")
            .class("content-container");
        for class in &self.content_classes {
            main = main.class(class);
        }
        main.child(Node::raw(&self.content))
    }

    /// Renders the full shell document.
    #[must_use]
    pub fn render_document(&self) -> String {
        let head = Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(Element::new("title").text(&self.title))
            .children(self.head.iter().map(AssetElement::to_element));

        let header = Element::new("header")
            .class("site-header")
            .child(Element::new("h1").class("site-title").text(&self.app_name))
            .child(
                Element::new("nav")
                    .attr("id", "navigation-tabs")
                    .child(navigation::render_nav(&self.nav)),
            );

        let footer = Element::new("footer")
            .class("site-footer")
            .child(navigation::render_footer_links(&self.footer_links))
            .child(
                Element::new("p")
                    .class("last-updated")
                    .text("Last updated: ")
                    .child(
                        Element::new("span")
                            .attr("id", "last-updated")
                            .text(&self.last_updated),
                    ),
            );

        let html = Element::new("html")
            .attr("lang", "en")
            .child(head)
            .child(
                Element::new("body")
                    .child(header)
                    .child(self.content_region())
                    .child(footer),
            );

        format!("<!DOCTYPE html>\n{}", html.render())
    }
}
