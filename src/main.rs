//! Event Scheduler - Binary Entry Point
//!
//! This is the main entry point for the schedule-server binary.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use event_scheduler::api::{create_router, AppState};
use event_scheduler::config::Config;
use event_scheduler::event_store::EventStore;
use event_scheduler::telemetry::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level, config.log_format)?;

    let data_file = config.resolved_data_file();
    let store = EventStore::open(&data_file, config.timezone)
        .with_context(|| format!("failed to open event store at {}", data_file.display()))?;
    info!(
        path = %data_file.display(),
        events = store.len(),
        timezone = %config.timezone,
        "event store ready"
    );

    let static_dir = config.static_dir.is_dir().then_some(config.static_dir.as_path());
    if static_dir.is_none() {
        warn!(dir = %config.static_dir.display(), "static directory not found, serving API only");
    }

    let state = Arc::new(AppState::new(Arc::new(store)));
    let app = create_router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!("listening on http://{}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
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
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
