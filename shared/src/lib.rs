//! Shared types for the roster workspace
//!
//! Wire models exchanged with the remote employee store, plus small
//! utilities used on the client side.

pub mod models;
pub mod request;
pub mod util;

// Re-exports
pub use models::{Employee, EmployeeId};
pub use request::BulkActionRequest;
