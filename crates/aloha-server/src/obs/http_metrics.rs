//! The two HTTP series: request latency and request count.

use std::sync::Arc;
use std::time::Duration;

use aloha_core::error::Result;
use aloha_core::metrics::{CounterVec, HistogramVec, Opts, Registry, DEFAULT_BUCKETS};

/// Handles to the registered HTTP series. Cheap to clone; shared by every
/// request task.
#[derive(Clone)]
pub struct HttpMetrics {
    duration: Arc<HistogramVec>,
    requests: Arc<CounterVec>,
}

impl HttpMetrics {
    /// Register both series in `registry`. Errors if either name is taken,
    /// so calling this twice against one registry fails.
    pub fn register(registry: &Registry, subsystem: &str) -> Result<Self> {
        let duration = registry.register_histogram(
            Opts::new("request_duration_seconds", "Seconds spent serving HTTP requests.")
                .subsystem(subsystem),
            &["method", "path", "status"],
            &DEFAULT_BUCKETS,
        )?;
        let requests = registry.register_counter(
            Opts::new("requests_total", "The total number of HTTP requests.").subsystem(subsystem),
            &["status"],
        )?;

        Ok(Self { duration, requests })
    }

    /// Record one finished request.
    pub fn record(&self, method: &str, path: &str, status: &str, took: Duration) {
        if let Err(e) = self.duration.observe(&[method, path, status], took.as_secs_f64()) {
            tracing::warn!(error = %e, "http duration not recorded");
        }
        if let Err(e) = self.requests.inc(&[status]) {
            tracing::warn!(error = %e, "http request count not recorded");
        }
    }

    pub fn duration(&self) -> &HistogramVec {
        &self.duration
    }

    pub fn requests(&self) -> &CounterVec {
        &self.requests
    }
}
