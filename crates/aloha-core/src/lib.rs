//! Aloha core: metric registry, label normalization, and the shared error type.
//!
//! This crate carries no transport or runtime dependencies. The server crate
//! wires it into axum; tests and tooling can use it directly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible path
//! surfaces as `AlohaError`/`Result`, including misuse of the registry API.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod label;
pub mod metrics;

/// Shared result type.
pub use error::{AlohaError, Result};
