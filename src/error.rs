//! Error types for `docportal`
//!
//! The portal itself never fails hard: configuration, asset and content
//! failures all degrade to fallback content. The errors here describe what
//! went wrong inside each layer so the degraded paths can log precisely,
//! and give the CLI a stable exit code table.

use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `docportal` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (unreadable or malformed manifest)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Fetch error (network failure, bad status)
    pub const FETCH_ERROR: i32 = 4;

    /// Render error (a tab could not be rendered)
    pub const RENDER_ERROR: i32 = 5;

    /// Usage error (invalid arguments, unknown tab)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `docportal` operations.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Manifest loading error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Resource fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Tab rendering error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// HTTP server error
    #[error(transparent)]
    Serve(#[from] ServeError),

    /// Invalid command-line usage
    #[error("{0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PortalError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Fetch(_) => ExitCode::FETCH_ERROR,
            Self::Render(_) => ExitCode::RENDER_ERROR,
            Self::Serve(_) => ExitCode::ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Failures while loading the navigation manifest.
///
/// Every variant is recovered by substituting the fallback configuration;
/// the variant only decides what gets logged.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The manifest could not be fetched
    #[error("could not fetch manifest '{resource}': {source}")]
    Unreachable {
        /// Manifest resource name
        resource: String,
        /// Underlying fetch failure
        #[source]
        source: FetchError,
    },

    /// The manifest was fetched but is not a valid configuration
    #[error("malformed manifest '{resource}': {message}")]
    Malformed {
        /// Manifest resource name
        resource: String,
        /// Parser message
        message: String,
    },

    /// Two tabs share the same id
    #[error("duplicate tab id '{id}' in manifest")]
    DuplicateTab {
        /// The repeated id
        id: String,
    },
}

// ============================================================================
// Fetch Errors
// ============================================================================

/// Resource fetch errors shared by every [`Fetcher`](crate::fetch::Fetcher).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Server or filesystem answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Connection, read, or filesystem failure
    #[error("network error: {0}")]
    Network(String),

    /// The request did not finish within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Body exceeds the configured size limit
    #[error("resource exceeds {limit} byte limit")]
    TooLarge {
        /// Configured limit in bytes
        limit: usize,
    },

    /// Resource path escapes the site root or is otherwise unusable
    #[error("invalid resource path '{0}'")]
    InvalidPath(String),
}

// ============================================================================
// Render Errors
// ============================================================================

/// Unexpected failures while rendering a tab.
///
/// Adapter fetch failures are not render errors; they degrade to placeholder
/// content. A render error puts the tab into the error state and shows the
/// generic error fragment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// A content source is configured but names no file
    #[error("tab '{tab}' declares {kind} content without a file")]
    MissingFile {
        /// Tab id
        tab: String,
        /// Declared source tag
        kind: &'static str,
    },
}

// ============================================================================
// Serve Errors
// ============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Listener could not be bound
    #[error("bind failed on {addr}: {message}")]
    Bind {
        /// Requested address
        addr: String,
        /// OS error message
        message: String,
    },

    /// Bind address could not be parsed
    #[error("invalid bind address '{0}'")]
    InvalidAddress(String),

    /// Server loop terminated with an error
    #[error("server error: {0}")]
    Server(String),

    /// Metrics exporter could not be installed
    #[error("metrics exporter: {0}")]
    Metrics(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let config = PortalError::Config(ConfigError::DuplicateTab { id: "a".into() });
        assert_eq!(config.exit_code(), ExitCode::CONFIG_ERROR);

        let fetch = PortalError::Fetch(FetchError::Timeout);
        assert_eq!(fetch.exit_code(), ExitCode::FETCH_ERROR);

        let usage = PortalError::Usage("unknown tab".into());
        assert_eq!(usage.exit_code(), ExitCode::USAGE_ERROR);

        let io = PortalError::Io(std::io::Error::other("boom"));
        assert_eq!(io.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn status_error_message_matches_browser_wording() {
        assert_eq!(FetchError::Status(404).to_string(), "HTTP error! status: 404");
    }

    #[test]
    fn render_error_names_tab() {
        let err = RenderError::MissingFile {
            tab: "about".into(),
            kind: "json",
        };
        assert_eq!(
            err.to_string(),
            "tab 'about' declares json content without a file"
        );
    }
}
