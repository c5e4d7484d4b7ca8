//! Shared application state for the Aloha server.
//!
//! Owns the metric registry, the HTTP series registered into it, and the
//! readiness flag. Construction fails (instead of panicking) when the series
//! cannot be registered, so `main` can refuse to start.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use aloha_core::error::Result;
use aloha_core::metrics::Registry;

use crate::config::ServerConfig;
use crate::obs::HttpMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    http: HttpMetrics,
}

struct AppStateInner {
    cfg: ServerConfig,
    registry: Arc<Registry>,
    ready: AtomicBool,
}

impl AppState {
    /// Build state around a fresh registry.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        Self::with_registry(cfg, Arc::new(Registry::new()))
    }

    /// Build state around an existing registry. Fails if the HTTP series are
    /// already registered in it.
    pub fn with_registry(cfg: ServerConfig, registry: Arc<Registry>) -> Result<Self> {
        let http = HttpMetrics::register(&registry, &cfg.metrics.subsystem)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                ready: AtomicBool::new(false),
            }),
            http,
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn http_metrics(&self) -> HttpMetrics {
        self.http.clone()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.ready.load(Ordering::Relaxed)
    }

    pub fn set_ready(&self, ready: bool) {
        self.inner.ready.store(ready, Ordering::Relaxed);
    }

    /// Flip readiness on after `delay`. Returns the timer task.
    pub fn spawn_ready_after(&self, delay: Duration) -> tokio::task::JoinHandle<()> {
        let state = self.clone();
        tracing::info!(delay_ms = delay.as_millis() as u64, "readyz not ready");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.set_ready(true);
            tracing::info!("readyz ready");
        })
    }
}
