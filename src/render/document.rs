//! JSON content document schema.
//!
//! Every field is optional and parsing is lenient: a field with the wrong
//! shape is dropped instead of failing the document, and scalar text fields
//! accept numbers and booleans. Falsy scalars (`""`, `0`, `false`) count as
//! absent. Only syntactically invalid JSON is an error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A structured content document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContentDocument {
    /// Page heading.
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,

    /// Line under the page heading.
    #[serde(default, deserialize_with = "text")]
    pub subtitle: Option<String>,

    /// Hero banner, rendered first.
    #[serde(default, deserialize_with = "lenient")]
    pub hero: Option<Hero>,

    /// Content sections in order.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub sections: Option<Vec<Section>>,

    /// Icon grid.
    #[serde(default, deserialize_with = "lenient")]
    pub grid: Option<Grid>,

    /// Cards, rendered in one shared container.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub cards: Option<Vec<Card>>,

    /// Titled lists, each in its own container.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub lists: Option<Vec<List>>,
}

impl ContentDocument {
    /// Parses a document from JSON text.
    ///
    /// A JSON value that is not an object yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns the parser error when `raw` is not valid JSON.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(value))
    }

    /// Builds a document from an already-parsed JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if value.is_object() {
            Self::deserialize(value).unwrap_or_default()
        } else {
            Self::default()
        }
    }
}

/// Hero banner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    /// Banner heading.
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    /// Line under the heading.
    #[serde(default, deserialize_with = "text")]
    pub subtitle: Option<String>,
    /// Longer description.
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
    /// Call-to-action buttons.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub buttons: Option<Vec<Button>>,
    /// Replaces the default `hero-section` class.
    #[serde(default, deserialize_with = "text")]
    pub class_name: Option<String>,
}

/// Hero call-to-action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    /// Label.
    #[serde(default, deserialize_with = "text")]
    pub text: Option<String>,
    /// Target; `#` when absent.
    #[serde(default, deserialize_with = "text")]
    pub link: Option<String>,
    /// Extra classes next to `btn`.
    #[serde(default, deserialize_with = "text")]
    pub class_name: Option<String>,
}

/// Content section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Section heading.
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    /// Body text.
    #[serde(default, deserialize_with = "text")]
    pub content: Option<String>,
    /// Extra classes next to `content-section`.
    #[serde(default, deserialize_with = "text")]
    pub class_name: Option<String>,
    /// Sub-items.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub items: Option<Vec<SectionItem>>,
}

/// Item inside a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SectionItem {
    /// Item heading.
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    /// Item body.
    #[serde(default, deserialize_with = "text")]
    pub content: Option<String>,
    /// "Learn More" target.
    #[serde(default, deserialize_with = "text")]
    pub link: Option<String>,
}

/// Icon grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    /// Grid heading.
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    /// Column count; `grid-auto` when absent.
    #[serde(default, deserialize_with = "text")]
    pub columns: Option<String>,
    /// Extra classes next to `grid-container`.
    #[serde(default, deserialize_with = "text")]
    pub class_name: Option<String>,
    /// Grid cells.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub items: Option<Vec<GridItem>>,
}

/// Grid cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GridItem {
    /// Icon glyph or emoji.
    #[serde(default, deserialize_with = "text")]
    pub icon: Option<String>,
    /// Cell heading.
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    /// Cell body.
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
    /// "View" target.
    #[serde(default, deserialize_with = "text")]
    pub link: Option<String>,
}

/// Card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Image URL.
    #[serde(default, deserialize_with = "text")]
    pub image: Option<String>,
    /// Card heading; also the image alt text.
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    /// Card body.
    #[serde(default, deserialize_with = "text")]
    pub content: Option<String>,
    /// "Read More" target.
    #[serde(default, deserialize_with = "text")]
    pub link: Option<String>,
    /// Extra classes next to `card`.
    #[serde(default, deserialize_with = "text")]
    pub class_name: Option<String>,
}

/// Titled list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    /// List heading.
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    /// `ordered` renders `<ol>`; anything else `<ul>`.
    #[serde(default, rename = "type", deserialize_with = "text")]
    pub kind: Option<String>,
    /// Extra classes next to `list-container`.
    #[serde(default, deserialize_with = "text")]
    pub class_name: Option<String>,
    /// Entries.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub items: Option<Vec<ListItem>>,
}

impl List {
    /// Whether the list renders as `<ol>`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.kind.as_deref() == Some("ordered")
    }
}

/// List entry: a bare string or a titled pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListItem {
    /// Rendered as a bare `<li>`
    Plain(String),
    /// Rendered with an emphasized title and inline content
    Detailed {
        /// Emphasized part.
        #[serde(default, deserialize_with = "text")]
        title: Option<String>,
        /// Inline part.
        #[serde(default, deserialize_with = "text")]
        content: Option<String>,
    },
}

// ============================================================================
// Lenient deserializers
// ============================================================================

/// Accepts strings, numbers and `true` as text. Empty strings, zero,
/// `false` and non-scalars are `None`.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

/// Drops a value whose shape does not match `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(T::deserialize(value).ok())
}

/// Keeps the array elements that match `T`; a non-array becomes `None`.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| T::deserialize(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}
