//! Roster core
//!
//! Rendering-free state for the employee table:
//!
//! ```text
//! RosterSession
//!   ├── RosterState    (current rows, baseline, pending creates/deletes)
//!   │     └── tracker  (edit / add / remove, marks rows dirty)
//!   ├── AutosaveScheduler (single debounce countdown → flush)
//!   ├── SyncGateway    (changeset → POST bulk-action → reload)
//!   └── broadcast::Sender<RosterEvent> (re-render notifications)
//! ```

mod event;
mod gateway;
mod pagination;
mod scheduler;
mod session;
mod store;
#[cfg(test)]
pub(crate) mod testing;
mod tracker;

pub use event::RosterEvent;
pub use gateway::SyncGateway;
pub use pagination::Pagination;
pub use scheduler::{AutosaveScheduler, SchedulerState};
pub use session::RosterSession;
pub use store::{Bucket, EmployeeField, EmployeeRow, RosterState};
