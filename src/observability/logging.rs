//! Logging setup.
//!
//! Everything goes to stderr through `tracing-subscriber`, so stdout stays
//! clean for rendered HTML. `DOCPORTAL_LOG_LEVEL` overrides `-v` with a full
//! `EnvFilter` directive.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_LEVEL_ENV: &str = "DOCPORTAL_LOG_LEVEL";

/// HTTP stack targets kept at `warn` below `-vvv`.
const QUIET_TARGETS: [&str; 3] = ["hyper", "h2", "reqwest"];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Json,
}

/// Level for a `-v` count; saturates at `trace`.
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directive used when `DOCPORTAL_LOG_LEVEL` is unset.
///
/// `-v` and `-vv` raise this crate's level but keep the HTTP stack quiet;
/// `-vvv` traces everything.
#[must_use]
pub fn default_directive(verbosity: u8) -> String {
    let level = verbosity_to_directive(verbosity);
    if !matches!(verbosity, 1 | 2) {
        return level.to_string();
    }
    QUIET_TARGETS
        .iter()
        .fold(level.to_string(), |acc, target| format!("{acc},{target}=warn"))
}

fn wants_ansi(color: ColorChoice, stderr_is_terminal: bool, no_color: bool) -> bool {
    match color {
        ColorChoice::Auto => stderr_is_terminal && !no_color,
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let with_target = verbosity >= 2;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(with_target)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Human => builder
            .with_ansi(wants_ansi(
                color,
                std::io::stderr().is_terminal(),
                std::env::var_os("NO_COLOR").is_some(),
            ))
            .try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if installed.is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
}
