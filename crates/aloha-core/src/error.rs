//! Shared error type across Aloha crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, AlohaError>;

/// Unified error type used by core and server.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlohaError {
    /// A series with the same fully-qualified name already exists.
    #[error("metric series already registered: {0}")]
    AlreadyRegistered(String),
    /// Series or label names that the exposition format cannot carry.
    #[error("invalid metric series: {0}")]
    InvalidSeries(String),
    /// Label values did not line up with the registered label names.
    #[error("series {series} expects {expected} label values, got {got}")]
    LabelCardinality {
        series: String,
        expected: usize,
        got: usize,
    },
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}
