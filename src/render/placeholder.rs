//! Built-in fragments: empty-state, error and loading content.

use super::html::Element;
use crate::config::TabDescriptor;

/// Glyph shown above the empty-state heading.
const EMPTY_ICON: &str = "\u{1F4C4}";

/// Self-documenting empty state for a tab with no (or unloadable) content.
///
/// Names the content, stylesheet and script resources the tab would use
/// and shows a starter JSON document.
#[must_use]
pub fn empty_tab(tab: &TabDescriptor) -> String {
    let files = Element::new("ul").class("file-list").children([
        file_entry(&tab.content_resource(), "Page content and structure"),
        file_entry(&tab.styles_resource(), "Custom styles for this tab"),
        file_entry(&tab.scripts_resource(), "Interactive functionality"),
    ]);

    Element::new("div")
        .class("content-section empty-tab")
        .child(
            Element::new("div")
                .class("empty-state")
                .child(Element::new("div").class("empty-icon").text(EMPTY_ICON))
                .child(Element::new("h2").text(tab.display_title()))
                .child(
                    Element::new("p")
                        .class("empty-message")
                        .text("This tab is ready for content!"),
                )
                .child(
                    Element::new("div")
                        .class("empty-instructions")
                        .child(Element::new("h3").text("To add content, create these files:"))
                        .child(files),
                )
                .child(
                    Element::new("div")
                        .class("empty-example")
                        .child(Element::new("h4").text("Example JSON structure:"))
                        .child(
                            Element::new("pre")
                                .class("code-block")
                                .text(example_json(tab)),
                        ),
                ),
        )
        .render()
}

fn file_entry(resource: &str, description: &str) -> Element {
    Element::new("li")
        .child(Element::new("code").text(resource))
        .child(
            Element::new("span")
                .class("file-desc")
                .text(format!("- {description}")),
        )
}

/// Starter content document for a tab, pretty-printed.
#[must_use]
pub fn example_json(tab: &TabDescriptor) -> String {
    let example = serde_json::json!({
        "title": tab.display_title(),
        "subtitle": format!("Welcome to {}", tab.name),
        "hero": {
            "title": "Hero Section Title",
            "description": "Hero description"
        },
        "sections": [
            {
                "title": "Section Title",
                "content": "Section content here..."
            }
        ]
    });
    serde_json::to_string_pretty(&example).unwrap_or_default()
}

/// Error fragment naming the tab, shown when rendering fails unexpectedly.
#[must_use]
pub fn error_content(tab: &TabDescriptor) -> String {
    Element::new("div")
        .class("content-section")
        .child(Element::new("h2").text(format!("Error Loading {}", tab.name)))
        .child(
            Element::new("div")
                .class("card")
                .child(Element::new("h3").text("Content Not Available"))
                .child(
                    Element::new("p")
                        .text("There was an error loading the content for this section."),
                )
                .child(
                    Element::new("p")
                        .text("Please check that the required files exist and try again."),
                ),
        )
        .render()
}

/// Loading indicator shown while a tab resolves.
#[must_use]
pub fn loading() -> String {
    Element::new("div")
        .class("loading")
        .text("Loading content...")
        .render()
}
