//! Session notifications for rendering collaborators

/// Something the table should re-render for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// Fresh list from the store applied
    Loaded { rows: usize },
    /// A local edit, add or remove
    Changed,
    /// Bulk write accepted by the store
    Saved {
        created: usize,
        updated: usize,
        deleted: usize,
    },
    /// List retrieval failed; previous rows kept
    FetchFailed { message: String },
    /// Bulk write failed; pending changes kept for the next attempt
    SaveFailed { message: String },
    PageChanged { page: usize, page_size: usize },
}
