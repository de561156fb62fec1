//! `docportal serve`: serve a portal session over HTTP.

use tokio_util::sync::CancellationToken;

use crate::cli::args::ServeArgs;
use crate::error::PortalError;
use crate::observability::init_metrics;
use crate::server;

/// Opens the site, then serves until `cancel` fires.
///
/// # Errors
///
/// Returns an error for an invalid bind address, a metrics exporter that
/// cannot start, an unopenable site or a server failure.
pub async fn run(args: &ServeArgs, cancel: CancellationToken) -> Result<(), PortalError> {
    let addr = server::parse_bind_addr(&args.bind)?;

    if let Some(port) = args.metrics_port {
        init_metrics(Some(port))?;
        tracing::info!(port, "metrics exporter listening");
    }

    let portal = super::open_portal(&args.site).await?;
    portal.show_initial(None).await;
    server::serve(portal, addr, cancel).await?;
    Ok(())
}
