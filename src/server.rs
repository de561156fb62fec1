//! HTTP front-end for a portal session.
//!
//! One [`PortalController`] is shared by every request, so the server
//! behaves like a single browser tab driven over HTTP:
//!
//! | Route                   | Effect                                        |
//! |-------------------------|-----------------------------------------------|
//! | `GET /`                 | full shell for the current tab                |
//! | `GET /tabs/{id}`        | switch (history tracked), content region HTML |
//! | `GET /config`           | current configuration as JSON                 |
//! | `POST /cache/clear`     | clear the content cache                       |
//! | `POST /refresh`         | re-render the current tab                     |
//! | `POST /history/back`    | history navigation                            |
//! | `POST /history/forward` | history navigation                            |

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::controller::{PortalController, SwitchOutcome, SwitchReport};
use crate::error::ServeError;

/// Parses a bind address, accepting `:port` and bare `port` shorthands.
///
/// # Errors
///
/// Returns [`ServeError::InvalidAddress`] if the result is not a socket
/// address.
pub fn parse_bind_addr(input: &str) -> Result<SocketAddr, ServeError> {
    let addr = if input.starts_with(':') {
        format!("0.0.0.0{input}")
    } else if input.parse::<u16>().is_ok() {
        format!("0.0.0.0:{input}")
    } else {
        input.to_string()
    };
    addr.parse::<SocketAddr>()
        .map_err(|e| ServeError::InvalidAddress(format!("{input}: {e}")))
}

/// Builds the router over a shared controller.
pub fn build_router(portal: Arc<PortalController>) -> Router {
    Router::new()
        .route("/", get(handle_shell))
        .route("/tabs/{id}", get(handle_tab))
        .route("/config", get(handle_config))
        .route("/cache/clear", post(handle_clear_cache))
        .route("/refresh", post(handle_refresh))
        .route("/history/back", post(handle_back))
        .route("/history/forward", post(handle_forward))
        .with_state(portal)
}

/// Serves until `cancel` fires.
///
/// # Errors
///
/// Returns [`ServeError::Bind`] if the listener cannot be bound and
/// [`ServeError::Server`] if the server loop fails.
pub async fn serve(
    portal: Arc<PortalController>,
    addr: SocketAddr,
    cancel: CancellationToken,
) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr).await.map_err(|e| ServeError::Bind {
        addr: addr.to_string(),
        message: e.to_string(),
    })?;
    let local = listener
        .local_addr()
        .map_err(|e| ServeError::Server(e.to_string()))?;
    info!(addr = %local, "portal listening");

    axum::serve(listener, build_router(portal))
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await
        .map_err(|e| ServeError::Server(e.to_string()))?;

    info!("portal stopped");
    Ok(())
}

async fn handle_shell(State(portal): State<Arc<PortalController>>) -> Html<String> {
    Html(portal.page().render_document())
}

async fn handle_tab(
    State(portal): State<Arc<PortalController>>,
    Path(id): Path<String>,
) -> Response {
    let report = portal.show_tab(&id, true).await;
    content_response(Some(report))
}

async fn handle_config(State(portal): State<Arc<PortalController>>) -> Response {
    Json(portal.config()).into_response()
}

async fn handle_clear_cache(State(portal): State<Arc<PortalController>>) -> StatusCode {
    portal.clear_cache();
    StatusCode::NO_CONTENT
}

async fn handle_refresh(State(portal): State<Arc<PortalController>>) -> Response {
    content_response(portal.refresh().await)
}

async fn handle_back(State(portal): State<Arc<PortalController>>) -> Response {
    content_response(portal.back().await)
}

async fn handle_forward(State(portal): State<Arc<PortalController>>) -> Response {
    content_response(portal.forward().await)
}

/// Maps a switch report to a response carrying the content it wrote.
///
/// `None` means there was nothing to do. A superseded switch wrote nothing
/// and answers 409.
fn content_response(report: Option<SwitchReport>) -> Response {
    let Some(SwitchReport { outcome, content }) = report else {
        return StatusCode::NO_CONTENT.into_response();
    };
    match outcome {
        SwitchOutcome::UnknownTab => (StatusCode::NOT_FOUND, "unknown tab").into_response(),
        SwitchOutcome::Superseded => {
            (StatusCode::CONFLICT, "superseded by a newer switch").into_response()
        }
        SwitchOutcome::Failed(e) => {
            warn!(error = %e, "tab rendered with error fragment");
            Html(content.unwrap_or_default()).into_response()
        }
        SwitchOutcome::Rendered { .. } => Html(content.unwrap_or_default()).into_response(),
    }
}
