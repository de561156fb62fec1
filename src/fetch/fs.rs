//! Filesystem fetcher serving a site from a local directory.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

use super::{Fetcher, normalize_resource};
use crate::config::PortalOptions;
use crate::error::FetchError;

/// Reads resources from a site root directory.
///
/// Missing files map to status 404 and permission failures to 403, so the
/// adapters see the same errors they would from a web server.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
    timeout: Duration,
    max_size: usize,
}

impl FsFetcher {
    /// Creates a fetcher rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, options: &PortalOptions) -> Self {
        Self {
            root: root.into(),
            timeout: options.fetch_timeout,
            max_size: options.max_resource_size,
        }
    }

    async fn read(&self, resource: &str) -> Result<String, FetchError> {
        let relative = normalize_resource(resource)?;
        let path = self.root.join(&relative);
        trace!(path = %path.display(), "reading resource");

        let metadata = tokio::fs::metadata(&path).await.map_err(map_io_error)?;
        if metadata.is_dir() {
            return Err(FetchError::Status(404));
        }
        if usize::try_from(metadata.len()).map_or(true, |len| len > self.max_size) {
            return Err(FetchError::TooLarge {
                limit: self.max_size,
            });
        }

        tokio::fs::read_to_string(&path).await.map_err(map_io_error)
    }
}

fn map_io_error(error: std::io::Error) -> FetchError {
    match error.kind() {
        ErrorKind::NotFound => FetchError::Status(404),
        ErrorKind::PermissionDenied => FetchError::Status(403),
        _ => FetchError::Network(error.to_string()),
    }
}

#[async_trait]
impl Fetcher for FsFetcher {
    async fn fetch_text(&self, resource: &str) -> Result<String, FetchError> {
        tokio::time::timeout(self.timeout, self.read(resource))
            .await
            .map_err(|_| FetchError::Timeout)?
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(max: usize) -> PortalOptions {
        PortalOptions {
            manifest: "app.json".into(),
            fetch_timeout: Duration::from_secs(5),
            max_resource_size: max,
        }
    }

    #[tokio::test]
    async fn reads_nested_resource() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("json")).unwrap();
        std::fs::write(dir.path().join("json/about.json"), r#"{"title":"About"}"#).unwrap();

        let fetcher = FsFetcher::new(dir.path(), &options(1024));
        let body = fetcher.fetch_text("./json/about.json").await.unwrap();
        assert_eq!(body, r#"{"title":"About"}"#);
    }

    #[tokio::test]
    async fn missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FsFetcher::new(dir.path(), &options(1024));
        let err = fetcher.fetch_text("json/missing.json").await.unwrap_err();
        assert_eq!(err, FetchError::Status(404));
    }

    #[tokio::test]
    async fn directory_is_404() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("json")).unwrap();
        let fetcher = FsFetcher::new(dir.path(), &options(1024));
        let err = fetcher.fetch_text("json").await.unwrap_err();
        assert_eq!(err, FetchError::Status(404));
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("big.html"), "x".repeat(64)).unwrap();
        let fetcher = FsFetcher::new(dir.path(), &options(16));
        let err = fetcher.fetch_text("big.html").await.unwrap_err();
        assert_eq!(err, FetchError::TooLarge { limit: 16 });
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FsFetcher::new(dir.path(), &options(1024));
        let err = fetcher.fetch_text("../outside.txt").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidPath(_)));
    }
}
