//! Aloha server binary.
//!
//! - Config from `$ALOHA_CONFIG` (default `aloha.yaml`, built-in defaults if absent)
//! - `/readyz` flips to 200 after `server.ready_delay_ms`
//! - Ctrl-C marks the server not ready and drains connections

use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing_subscriber::{fmt, EnvFilter};

use aloha_core::error::{AlohaError, Result};
use aloha_server::{app_state::AppState, config, router};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "aloha-server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing::info!("Starting Aloha!!!");

    let path = std::env::var(config::CONFIG_ENV)
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_or_default(&path)?;
    let listen = cfg.server.listen_addr()?;

    // Registration conflicts surface here, before anything is bound.
    let state = AppState::new(cfg)?;
    let ready_delay = Duration::from_millis(state.cfg().server.ready_delay_ms);
    let ready_timer = state.spawn_ready_after(ready_delay);
    let app = router::build_router(state.clone());

    let listener = TcpListener::bind(listen)
        .await
        .map_err(|e| AlohaError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "aloha-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state, ready_timer))
        .await
        .map_err(|e| AlohaError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal(state: AppState, ready_timer: JoinHandle<()>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
    ready_timer.abort();
    state.set_ready(false);
    tracing::info!("shutdown signal received, draining");
}
