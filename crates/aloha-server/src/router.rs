//! Axum router wiring.
//!
//! Application routes (and the fallback) are wrapped by the metrics
//! middleware; operational routes are merged in afterwards so they stay
//! out of the HTTP series.

use axum::{
    middleware,
    routing::{any, get},
    Router,
};

use crate::{app_state::AppState, handlers, obs, ops};

pub fn build_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/", any(handlers::root))
        .route("/version", any(handlers::version))
        .route("/bad", any(handlers::bad_request))
        .route("/forbidden", any(handlers::forbidden))
        .fallback(handlers::root)
        .layer(middleware::from_fn_with_state(state.http_metrics(), obs::track_http));

    let ops_routes = Router::new()
        .route("/healthz", any(ops::healthz))
        .route("/readyz", any(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state);

    app.merge(ops_routes)
}
