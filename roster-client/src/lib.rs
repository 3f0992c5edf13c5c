//! Roster Client - employee roster editing against a remote store
//!
//! Provides the HTTP client for the employee store API and the
//! rendering-free roster core: record store, mutation tracking,
//! debounced autosave and the sync gateway.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod roster;

pub use api::{EmployeeApi, EmployeeStore};
pub use config::{ClientConfig, RosterConfig, SaveMode};
pub use error::{ClientError, ClientResult, RosterError, RosterResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use roster::{
    AutosaveScheduler, Bucket, EmployeeField, EmployeeRow, Pagination, RosterEvent,
    RosterSession, RosterState, SchedulerState, SyncGateway,
};

// Re-export shared types for convenience
pub use shared::{BulkActionRequest, Employee, EmployeeId};
