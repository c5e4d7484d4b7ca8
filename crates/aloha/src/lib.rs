//! Top-level facade crate for Aloha.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use aloha_core::*;
}

pub mod server {
    pub use aloha_server::*;
}
