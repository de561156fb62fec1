//! `docportal`: render or serve a tab-based documentation portal.

use clap::Parser;
use tokio_util::sync::CancellationToken;

use docportal::cli::args::Cli;
use docportal::cli::commands;
use docportal::error::ExitCode;
use docportal::observability::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    let cancel = CancellationToken::new();
    tokio::spawn(handle_signals(cancel.clone()));

    match commands::dispatch(cli, cancel).await {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

/// First Ctrl+C / SIGTERM cancels; a second one exits immediately.
async fn handle_signals(cancel: CancellationToken) {
    let mut sigterm =
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(e) => {
                tracing::warn!(error = %e, "could not register SIGTERM handler");
                None
            }
        };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        () = recv_sigterm(sigterm.as_mut()) => {}
    }

    eprintln!("\nShutting down gracefully... (press Ctrl+C again to force)");
    cancel.cancel();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => std::process::exit(ExitCode::INTERRUPTED),
        () = recv_sigterm(sigterm.as_mut()) => std::process::exit(ExitCode::TERMINATED),
    }
}

async fn recv_sigterm(signal: Option<&mut tokio::signal::unix::Signal>) {
    match signal {
        Some(signal) => {
            signal.recv().await;
        }
        None => std::future::pending().await,
    }
}
