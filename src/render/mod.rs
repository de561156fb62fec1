//! Rendering: the typed fragment builder and everything that produces
//! HTML from content documents, Markdown, or built-in templates.

pub mod document;
pub mod generator;
pub mod html;
pub mod markdown;
pub mod placeholder;

pub use document::ContentDocument;
pub use generator::generate;
pub use html::{Element, Node, escape_attr, escape_html};
