use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use jobq_core::LifecycleEngine;
use jobq_core::app::ReaperLoop;
use tokio_util::sync::CancellationToken;

use jobq_server::config::ServerConfig;
use jobq_server::state::AppState;
use jobq_server::{routes, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("invalid configuration")?;
    telemetry::init(config.log_format);
    tracing::info!(
        addr = %config.bind_addr(),
        enqueue_timeout_ms = config.lease.enqueue_timeout.as_millis() as u64,
        dequeue_timeout_ms = config.lease.dequeue_timeout.as_millis() as u64,
        "Loaded server configuration"
    );

    // --- Engine ---
    let engine = Arc::new(LifecycleEngine::new(config.lease));

    // --- Lease reaper (optional) ---
    let reaper_cancel = CancellationToken::new();
    let reaper_handle = config.reaper_interval.map(|interval| {
        tokio::spawn(ReaperLoop::new(engine.clone(), interval).run(reaper_cancel.clone()))
    });

    // --- Router ---
    let addr = config.bind_addr();
    let app = routes::app(AppState::new(engine, config));

    // --- Start server ---
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    tracing::info!(%addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // --- Post-shutdown cleanup ---
    reaper_cancel.cancel();
    if let Some(handle) = reaper_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
