//! HTTP fetcher resolving resources against a base URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Url, redirect};
use tracing::debug;

use super::{Fetcher, normalize_resource};
use crate::config::PortalOptions;
use crate::error::FetchError;

/// Fetches resources from a web server.
///
/// Redirects are not followed, so a site cannot bounce the portal to an
/// unrelated host.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base: Url,
    timeout: Duration,
    max_size: usize,
}

impl HttpFetcher {
    /// Creates a fetcher for the site at `base`.
    ///
    /// A trailing slash is added to `base` when missing so relative
    /// resources resolve beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidPath`] if `base` is not a valid URL and
    /// [`FetchError::Network`] if the HTTP client cannot be built.
    pub fn new(base: &str, options: &PortalOptions) -> Result<Self, FetchError> {
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        let base = Url::parse(&normalized).map_err(|_| FetchError::InvalidPath(base.to_string()))?;

        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(options.fetch_timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base,
            timeout: options.fetch_timeout,
            max_size: options.max_resource_size,
        })
    }

    /// Resolves a site-relative resource to an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidPath`] for paths that escape the site.
    pub fn resolve(&self, resource: &str) -> Result<Url, FetchError> {
        let relative = normalize_resource(resource)?;
        self.base
            .join(&relative)
            .map_err(|_| FetchError::InvalidPath(resource.to_string()))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, resource: &str) -> Result<String, FetchError> {
        let url = self.resolve(resource)?;
        debug!(%url, "fetching resource");

        let response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        if response
            .content_length()
            .is_some_and(|len| usize::try_from(len).map_or(true, |len| len > self.max_size))
        {
            return Err(FetchError::TooLarge {
                limit: self.max_size,
            });
        }

        let bytes = tokio::time::timeout(self.timeout, response.bytes())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if bytes.len() > self.max_size {
            return Err(FetchError::TooLarge {
                limit: self.max_size,
            });
        }

        String::from_utf8(bytes.to_vec()).map_err(|e| FetchError::Network(e.to_string()))
    }

    fn describe(&self) -> String {
        format!("site {}", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;

    fn options() -> PortalOptions {
        PortalOptions {
            manifest: "app.json".into(),
            fetch_timeout: Duration::from_secs(5),
            max_resource_size: 64,
        }
    }

    async fn spawn_site() -> String {
        let app = Router::new()
            .route("/docs/app.json", get(|| async { r#"{"app":{"name":"Docs"}}"# }))
            .route("/docs/big.html", get(|| async { "x".repeat(128) }))
            .route(
                "/docs/broken.json",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/docs")
    }

    #[test]
    fn resolve_appends_to_base_directory() {
        let fetcher = HttpFetcher::new("https://example.com/portal", &options()).unwrap();
        assert_eq!(
            fetcher.resolve("./json/about.json").unwrap().as_str(),
            "https://example.com/portal/json/about.json"
        );
    }

    #[test]
    fn resolve_rejects_traversal() {
        let fetcher = HttpFetcher::new("https://example.com/portal/", &options()).unwrap();
        assert!(fetcher.resolve("../admin").is_err());
    }

    #[test]
    fn invalid_base_is_rejected() {
        assert!(matches!(
            HttpFetcher::new("not a url", &options()),
            Err(FetchError::InvalidPath(_))
        ));
    }

    #[tokio::test]
    async fn fetches_success_body() {
        let base = spawn_site().await;
        let fetcher = HttpFetcher::new(&base, &options()).unwrap();
        let body = fetcher.fetch_text("app.json").await.unwrap();
        assert!(body.contains("Docs"));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let base = spawn_site().await;
        let fetcher = HttpFetcher::new(&base, &options()).unwrap();
        assert_eq!(
            fetcher.fetch_text("broken.json").await.unwrap_err(),
            FetchError::Status(500)
        );
        assert_eq!(
            fetcher.fetch_text("missing.json").await.unwrap_err(),
            FetchError::Status(404)
        );
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let base = spawn_site().await;
        let fetcher = HttpFetcher::new(&base, &options()).unwrap();
        assert_eq!(
            fetcher.fetch_text("big.html").await.unwrap_err(),
            FetchError::TooLarge { limit: 64 }
        );
    }
}
