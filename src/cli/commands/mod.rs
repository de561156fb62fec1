//! CLI command dispatch and handlers.

pub mod markdown;
pub mod nav;
pub mod render;
pub mod serve;
pub mod version;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands, SiteArgs};
use crate::config::PortalOptions;
use crate::controller::PortalController;
use crate::error::PortalError;
use crate::fetch;

/// Dispatches a parsed CLI invocation.
///
/// `cancel` fires on the first Ctrl+C / SIGTERM; only long-running
/// commands observe it.
///
/// # Errors
///
/// Returns an error if the dispatched command fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), PortalError> {
    match cli.command {
        Commands::Render(args) => render::run(&args).await,
        Commands::Nav(args) => nav::run(&args).await,
        Commands::Markdown(args) => markdown::run(&args).await,
        Commands::Serve(args) => serve::run(&args, cancel).await,
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Options for a site, with the CLI's overrides applied.
fn options_for(site: &SiteArgs) -> PortalOptions {
    let mut options = PortalOptions::default();
    if let Some(manifest) = &site.manifest {
        options.manifest.clone_from(manifest);
    }
    if let Some(timeout) = site.fetch_timeout {
        options.fetch_timeout = timeout;
    }
    options
}

/// Opens a site and loads its manifest. No tab is shown yet.
async fn open_portal(site: &SiteArgs) -> Result<Arc<PortalController>, PortalError> {
    let options = options_for(site);
    let fetcher = fetch::from_site(&site.site, &options)?;
    tracing::info!(site = %fetcher.describe(), "opening portal");
    Ok(PortalController::load(fetcher, &options).await)
}
