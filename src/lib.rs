//! `docportal`: a tab-based documentation portal.
//!
//! A navigation manifest declares tabs; each tab's content comes from a JSON
//! content document, a Markdown file, or raw HTML. [`PortalController`]
//! loads the manifest, switches tabs, caches rendered content and keeps a
//! headless [`Page`] model and a session [`History`] in step.
//!
//! ```no_run
//! # async fn demo() -> Result<(), docportal::error::PortalError> {
//! use docportal::config::PortalOptions;
//! use docportal::{PortalController, fetch};
//!
//! let options = PortalOptions::default();
//! let fetcher = fetch::from_site("./site", &options)?;
//! let portal = PortalController::bootstrap(fetcher, &options, None).await;
//! portal.switch_tab("about", true).await;
//! println!("{}", portal.page().content);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod content;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod history;
pub mod navigation;
pub mod observability;
pub mod page;
pub mod render;
pub mod server;

pub use controller::{PortalController, SwitchOutcome, SwitchReport, TabState};
pub use history::History;
pub use page::Page;
