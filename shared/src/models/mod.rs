//! Data models
//!
//! Shared between the roster client and the remote store (via API).
//! All IDs are `i64`.

pub mod employee;

// Re-exports
pub use employee::*;
