//! Configuration module
//!
//! The navigation manifest schema, runtime options, and the store that
//! owns the manifest for a portal session.

pub mod options;
pub mod schema;
pub mod store;

pub use options::{DEFAULT_MANIFEST, PortalOptions};
pub use schema::*;
pub use store::{ConfigStore, validate};
