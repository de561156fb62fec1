//! CLI argument definitions.
//!
//! All Clap derive structs for `docportal` command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Tab-based documentation portal: render or serve a manifest-driven site.
#[derive(Parser, Debug)]
#[command(name = "docportal", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "DOCPORTAL_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one tab and print its content.
    Render(RenderArgs),

    /// List the navigation tabs of a site.
    Nav(NavArgs),

    /// Convert a Markdown file with the portal's minimal transform.
    Markdown(MarkdownArgs),

    /// Serve a portal session over HTTP.
    Serve(ServeArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Where a site lives.
#[derive(Args, Debug, Clone)]
pub struct SiteArgs {
    /// Site root: a directory or an `http(s)://` base URL.
    #[arg(short, long, env = "DOCPORTAL_SITE")]
    pub site: String,

    /// Manifest resource, relative to the site root.
    #[arg(long, env = "DOCPORTAL_MANIFEST")]
    pub manifest: Option<String>,

    /// Per-resource fetch timeout (e.g. `500ms`, `10s`).
    #[arg(long, value_parser = humantime::parse_duration)]
    pub fetch_timeout: Option<Duration>,
}

/// Arguments for `render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Tab id to render.
    pub tab: String,

    #[command(flatten)]
    pub site: SiteArgs,

    /// Print the full shell document instead of the content region.
    #[arg(long)]
    pub shell: bool,
}

/// Arguments for `nav`.
#[derive(Args, Debug)]
pub struct NavArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `markdown`.
#[derive(Args, Debug)]
pub struct MarkdownArgs {
    /// Markdown file to convert.
    pub file: PathBuf,
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Bind address, `[host]:port` or a bare port.
    #[arg(short, long, default_value = "127.0.0.1:8080", env = "DOCPORTAL_BIND")]
    pub bind: String,

    /// Expose Prometheus metrics on 127.0.0.1:<PORT>.
    #[arg(long, env = "DOCPORTAL_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}
