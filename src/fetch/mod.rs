//! Resource fetching.
//!
//! Every remote read in the portal (manifest, content documents, stylesheet
//! and script probes) goes through a [`Fetcher`]. A site is served either
//! from a local directory or from a base URL; tests use the in-memory
//! [`StaticFetcher`].

pub mod fs;
pub mod http;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::PortalOptions;
use crate::error::{FetchError, PortalError};

pub use fs::FsFetcher;
pub use http::HttpFetcher;
pub use memory::StaticFetcher;

/// Fetches site-relative resources as text.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `resource` (relative to the site root) and returns its body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] for non-success responses (including a
    /// missing file, reported as 404), [`FetchError::Network`] for transport
    /// failures, [`FetchError::Timeout`], [`FetchError::TooLarge`] and
    /// [`FetchError::InvalidPath`].
    async fn fetch_text(&self, resource: &str) -> Result<String, FetchError>;

    /// Human-readable description of where resources come from.
    fn describe(&self) -> String;
}

/// Normalizes a site-relative resource path.
///
/// Strips a leading `./`, collapses `.` segments and rejects absolute paths,
/// `..` traversal, empty paths and backslashes.
///
/// # Errors
///
/// Returns [`FetchError::InvalidPath`] when the path cannot be served.
pub fn normalize_resource(resource: &str) -> Result<String, FetchError> {
    let invalid = || FetchError::InvalidPath(resource.to_string());

    if resource.starts_with('/') || resource.contains('\\') || resource.contains("://") {
        return Err(invalid());
    }

    let mut segments = Vec::new();
    for segment in resource.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(invalid()),
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Err(invalid());
    }
    Ok(segments.join("/"))
}

/// Builds a fetcher for a site location.
///
/// `http://` and `https://` locations use [`HttpFetcher`]; anything else is
/// treated as a local directory and uses [`FsFetcher`].
///
/// # Errors
///
/// Returns an error if the URL is invalid, the HTTP client cannot be built,
/// or the directory does not exist.
pub fn from_site(site: &str, options: &PortalOptions) -> Result<Arc<dyn Fetcher>, PortalError> {
    if site.starts_with("http://") || site.starts_with("https://") {
        let fetcher = HttpFetcher::new(site, options)?;
        Ok(Arc::new(fetcher))
    } else {
        let root = std::path::PathBuf::from(site);
        if !root.is_dir() {
            return Err(PortalError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("site directory not found: {}", root.display()),
            )));
        }
        Ok(Arc::new(FsFetcher::new(root, options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_dot_prefix() {
        assert_eq!(normalize_resource("./app.json").unwrap(), "app.json");
        assert_eq!(
            normalize_resource("json/./about.json").unwrap(),
            "json/about.json"
        );
    }

    #[test]
    fn normalize_collapses_duplicate_slashes() {
        assert_eq!(
            normalize_resource("markdown//guide.md").unwrap(),
            "markdown/guide.md"
        );
    }

    #[test]
    fn normalize_rejects_traversal_and_absolute() {
        assert!(normalize_resource("../secret").is_err());
        assert!(normalize_resource("json/../../etc/passwd").is_err());
        assert!(normalize_resource("/etc/passwd").is_err());
        assert!(normalize_resource("https://evil.example/x").is_err());
        assert!(normalize_resource("a\\b").is_err());
    }

    #[test]
    fn normalize_rejects_empty() {
        assert!(normalize_resource("").is_err());
        assert!(normalize_resource("./").is_err());
    }

    #[test]
    fn from_site_rejects_missing_directory() {
        let result = from_site("/nonexistent/docportal/site", &PortalOptions::default());
        assert!(matches!(result, Err(PortalError::Io(_))));
    }

    #[test]
    fn from_site_accepts_directory() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = from_site(dir.path().to_str().unwrap(), &PortalOptions::default()).unwrap();
        assert!(fetcher.describe().contains(&dir.path().display().to_string()));
    }
}
