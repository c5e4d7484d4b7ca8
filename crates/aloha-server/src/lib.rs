//! Aloha server library entry.
//!
//! Wires config, application state, the request metrics middleware, and the
//! HTTP endpoints into an axum router. Consumed by the binary (`main.rs`) and
//! by integration tests.

pub mod app_state;
pub mod config;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod router;
