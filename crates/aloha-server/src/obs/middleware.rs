//! Request timing middleware.
//!
//! Install with `axum::middleware::from_fn_with_state(metrics, track_http)`.
//! A handler that panics, or a request future dropped before completion,
//! records nothing.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use aloha_core::label::path_label;

use super::{HttpMetrics, StatusCapture};

pub async fn track_http(State(metrics): State<HttpMetrics>, req: Request, next: Next) -> Response {
    let begin = Instant::now();
    let method = req.method().clone();
    let uri = req.uri();
    let path = path_label(uri.path_and_query().map_or(uri.path(), |pq| pq.as_str()));

    let mut capture = StatusCapture::new();
    let response = capture.record(next.run(req).await);

    let took = begin.elapsed();
    metrics.record(method.as_str(), &path, capture.status_label(), took);
    tracing::debug!(%method, %path, status = capture.status_label(), ?took, "request served");

    response
}
