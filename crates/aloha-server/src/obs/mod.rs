//! HTTP request instrumentation.
//!
//! `track_http` wraps a router and records, for each request, one latency
//! observation and one count increment into the series owned by `HttpMetrics`.
//! The registry itself lives in `aloha_core::metrics` and is rendered by the
//! `/metrics` handler.

pub mod capture;
pub mod http_metrics;
pub mod middleware;

pub use capture::StatusCapture;
pub use http_metrics::HttpMetrics;
pub use middleware::track_http;
