//! Structural HTML generator.
//!
//! Turns a [`ContentDocument`] into an HTML fragment. Fragment order is
//! fixed: hero, page header, sections, grid, cards, lists. Missing fields
//! produce no markup at all.

use super::document::{Card, ContentDocument, Grid, Hero, List, ListItem, Section};
use super::html::{Element, Node};

/// Renders a document into the tab-scoped content container.
#[must_use]
pub fn generate(doc: &ContentDocument, tab_id: &str) -> String {
    Element::new("div")
        .class("content-section")
        .class(&format!("{tab_id}-content"))
        .children(fragments(doc))
        .render()
}

/// Renders the document's fragments in display order, unwrapped.
#[must_use]
pub fn fragments(doc: &ContentDocument) -> Vec<Node> {
    let mut nodes = Vec::new();

    if let Some(hero) = &doc.hero {
        nodes.push(hero_node(hero).into());
    }

    if let Some(header) = header_node(doc) {
        nodes.push(header.into());
    }

    if let Some(sections) = &doc.sections {
        nodes.extend(sections.iter().map(|s| Node::from(section_node(s))));
    }

    if let Some(grid) = &doc.grid {
        nodes.push(grid_node(grid).into());
    }

    if let Some(cards) = &doc.cards {
        nodes.push(
            Element::new("div")
                .class("cards-container")
                .children(cards.iter().map(card_node))
                .into(),
        );
    }

    if let Some(lists) = &doc.lists {
        nodes.extend(lists.iter().map(|l| Node::from(list_node(l))));
    }

    nodes
}

/// Page header; only rendered when the document has a title.
#[must_use]
pub fn header_node(doc: &ContentDocument) -> Option<Element> {
    let title = doc.title.as_ref()?;
    Some(
        Element::new("div")
            .class("page-header")
            .child(Element::new("h1").text(title))
            .child_opt(
                doc.subtitle
                    .as_ref()
                    .map(|s| Element::new("p").class("subtitle").text(s)),
            ),
    )
}

/// Hero banner.
#[must_use]
pub fn hero_node(hero: &Hero) -> Element {
    let buttons = hero.buttons.iter().flatten().filter_map(|button| {
        let text = button.text.as_ref()?;
        Some(
            Element::new("a")
                .attr("href", button.link.as_deref().unwrap_or("#"))
                .class("btn")
                .class(button.class_name.as_deref().unwrap_or_default())
                .text(text),
        )
    });

    Element::new("div")
        .class(hero.class_name.as_deref().unwrap_or("hero-section"))
        .child_opt(hero.title.as_ref().map(|t| Element::new("h1").text(t)))
        .child_opt(
            hero.subtitle
                .as_ref()
                .map(|s| Element::new("p").class("hero-subtitle").text(s)),
        )
        .child_opt(
            hero.description
                .as_ref()
                .map(|d| Element::new("p").class("hero-description").text(d)),
        )
        .children(buttons)
}

/// Content section with optional heading, body and item list.
#[must_use]
pub fn section_node(section: &Section) -> Element {
    let items = section.items.as_ref().map(|items| {
        Element::new("div")
            .class("section-items")
            .children(items.iter().map(|item| {
                Element::new("div")
                    .class("section-item")
                    .child_opt(item.title.as_ref().map(|t| Element::new("h3").text(t)))
                    .child_opt(item.content.as_ref().map(|c| Element::new("p").text(c)))
                    .child_opt(item.link.as_ref().map(|l| {
                        Element::new("a")
                            .attr("href", l)
                            .class("btn btn-secondary")
                            .text("Learn More")
                    }))
            }))
    });

    Element::new("div")
        .class("content-section")
        .class(section.class_name.as_deref().unwrap_or_default())
        .child_opt(section.title.as_ref().map(|t| Element::new("h2").text(t)))
        .child_opt(
            section
                .content
                .as_ref()
                .map(|c| Element::new("div").class("section-content").text(c)),
        )
        .child_opt(items)
}

/// Grid with a column-count class, or `grid-auto` when none is given.
#[must_use]
pub fn grid_node(grid: &Grid) -> Element {
    let layout = grid
        .columns
        .as_ref()
        .map_or_else(|| "grid-auto".to_string(), |n| format!("grid-cols-{n}"));

    let cells = grid.items.iter().flatten().map(|item| {
        Element::new("div")
            .class("grid-item")
            .child_opt(
                item.icon
                    .as_ref()
                    .map(|i| Element::new("div").class("grid-icon").text(i)),
            )
            .child_opt(item.title.as_ref().map(|t| Element::new("h3").text(t)))
            .child_opt(
                item.description
                    .as_ref()
                    .map(|d| Element::new("p").text(d)),
            )
            .child_opt(item.link.as_ref().map(|l| {
                Element::new("a")
                    .attr("href", l)
                    .class("grid-link")
                    .text("View")
            }))
    });

    Element::new("div")
        .class("grid-container")
        .class(grid.class_name.as_deref().unwrap_or_default())
        .child_opt(
            grid.title
                .as_ref()
                .map(|t| Element::new("h2").class("grid-title").text(t)),
        )
        .child(Element::new("div").class("grid").class(&layout).children(cells))
}

/// Card with optional image, heading, body and link.
#[must_use]
pub fn card_node(card: &Card) -> Element {
    let image = card.image.as_ref().map(|src| {
        Element::new("img")
            .attr("src", src)
            .attr("alt", card.title.as_deref().unwrap_or_default())
            .class("card-image")
    });

    let body = Element::new("div")
        .class("card-content")
        .child_opt(
            card.title
                .as_ref()
                .map(|t| Element::new("h3").class("card-title").text(t)),
        )
        .child_opt(
            card.content
                .as_ref()
                .map(|c| Element::new("p").class("card-text").text(c)),
        )
        .child_opt(card.link.as_ref().map(|l| {
            Element::new("a")
                .attr("href", l)
                .class("btn card-btn")
                .text("Read More")
        }));

    Element::new("div")
        .class("card")
        .class(card.class_name.as_deref().unwrap_or_default())
        .child_opt(image)
        .child(body)
}

/// Titled list; `ordered` lists render as `<ol>`.
#[must_use]
pub fn list_node(list: &List) -> Element {
    let tag = if list.is_ordered() { "ol" } else { "ul" };

    let entries = list.items.iter().flatten().map(|item| match item {
        ListItem::Plain(text) => Element::new("li").text(text),
        ListItem::Detailed { title, content } => Element::new("li")
            .child_opt(title.as_ref().map(|t| Element::new("strong").text(t)))
            .child_opt(content.as_ref().map(|c| Element::new("span").text(c))),
    });

    Element::new("div")
        .class("list-container")
        .class(list.class_name.as_deref().unwrap_or_default())
        .child_opt(
            list.title
                .as_ref()
                .map(|t| Element::new("h3").class("list-title").text(t)),
        )
        .child(Element::new(tag).class("content-list").children(entries))
}
