//! Navigation renderer.
//!
//! Projects the sorted tab list into navigation and footer links, and
//! renders them as markup for the page shell.

use chrono::NaiveDate;

use crate::config::TabDescriptor;
use crate::render::{Element, Node};

/// One entry in the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub tab_id: String,
    pub label: String,
    pub title: String,
    pub icon: Option<String>,
    pub active: bool,
}

/// One entry in the footer link list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLink {
    pub tab_id: String,
    pub label: String,
}

/// Builds navigation links from tabs already sorted by `order`.
#[must_use]
pub fn nav_links(tabs: &[TabDescriptor]) -> Vec<NavLink> {
    tabs.iter()
        .map(|tab| NavLink {
            tab_id: tab.id.clone(),
            label: tab.name.clone(),
            title: tab.display_title().to_string(),
            icon: tab.icon.clone(),
            active: tab.active,
        })
        .collect()
}

/// Builds footer links from tabs already sorted by `order`.
#[must_use]
pub fn footer_links(tabs: &[TabDescriptor]) -> Vec<FooterLink> {
    tabs.iter()
        .map(|tab| FooterLink {
            tab_id: tab.id.clone(),
            label: tab.name.clone(),
        })
        .collect()
}

/// Renders the navigation list.
#[must_use]
pub fn render_nav(links: &[NavLink]) -> Element {
    Element::new("ul")
        .class("nav-tabs")
        .children(links.iter().map(|link| {
            let anchor = Element::new("a")
                .attr("href", format!("#{}", link.tab_id))
                .class("nav-tab-link")
                .class(if link.active { "active" } else { "" })
                .attr("data-tab", &link.tab_id)
                .attr("title", &link.title)
                .child_opt(
                    link.icon
                        .as_ref()
                        .map(|icon| Element::new("i").class(&format!("icon-{icon}"))),
                )
                .child(Node::text(&link.label));
            Element::new("li").class("nav-tab").child(anchor)
        }))
}

/// Renders the footer link list.
#[must_use]
pub fn render_footer_links(links: &[FooterLink]) -> Element {
    Element::new("ul")
        .class("footer-links")
        .children(links.iter().map(|link| {
            Element::new("li").child(
                Element::new("a")
                    .attr("href", format!("#{}", link.tab_id))
                    .attr("data-tab", &link.tab_id)
                    .text(&link.label),
            )
        }))
}

/// Formats `app.lastUpdated` (`YYYY-MM-DD`) as `M/D/YYYY`.
///
/// Missing or unparsable values fall back to `today`.
#[must_use]
pub fn format_last_updated(last_updated: Option<&str>, today: NaiveDate) -> String {
    let date = last_updated
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        .unwrap_or(today);
    date.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tabs() -> Vec<TabDescriptor> {
        serde_json::from_value(json!([
            {"id": "homepage", "name": "Home", "active": true, "icon": "home"},
            {"id": "about", "name": "About", "title": "About the Team"}
        ]))
        .unwrap()
    }

    #[test]
    fn nav_links_mirror_tabs() {
        let links = nav_links(&tabs());
        assert_eq!(links.len(), 2);
        assert!(links[0].active);
        assert_eq!(links[1].title, "About the Team");
        assert_eq!(links[0].icon.as_deref(), Some("home"));
    }

    #[test]
    fn nav_markup_marks_active() {
        let html = render_nav(&nav_links(&tabs())).render();
        assert!(html.contains(
            r##"<a class="nav-tab-link active" href="#homepage" data-tab="homepage" title="Home"><i class="icon-home"></i>Home</a>"##
        ));
        assert!(html.contains(
            r##"<a class="nav-tab-link" href="#about" data-tab="about" title="About the Team">About</a>"##
        ));
    }

    #[test]
    fn footer_markup() {
        let html = render_footer_links(&footer_links(&tabs())).render();
        assert_eq!(
            html,
            concat!(
                r#"<ul class="footer-links">"#,
                r##"<li><a href="#homepage" data-tab="homepage">Home</a></li>"##,
                r##"<li><a href="#about" data-tab="about">About</a></li>"##,
                "</ul>"
            )
        );
    }

    #[test]
    fn last_updated_formats_without_padding() {
        let today = NaiveDate::from_ymd_opt(2030, 12, 25).unwrap();
        assert_eq!(format_last_updated(Some("2024-03-07"), today), "3/7/2024");
        assert_eq!(format_last_updated(Some("2024-11-30"), today), "11/30/2024");
    }

    #[test]
    fn last_updated_falls_back_to_today() {
        let today = NaiveDate::from_ymd_opt(2030, 1, 5).unwrap();
        assert_eq!(format_last_updated(None, today), "1/5/2030");
        assert_eq!(format_last_updated(Some("yesterday"), today), "1/5/2030");
    }
}
