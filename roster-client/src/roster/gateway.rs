//! Sync gateway
//!
//! Sends everything dirty in one bulk write, then reloads everything.
//! No per-record result correlation is needed from the store.

use super::store::RosterState;
use crate::{EmployeeStore, RosterError, RosterResult};
use shared::BulkActionRequest;
use tokio::sync::RwLock;

impl RosterState {
    /// The bulk write a flush would send right now.
    ///
    /// Updates are the changed rows of `current`, projected to the wire
    /// record; creates go out with their client-generated ids.
    pub fn changeset(&self) -> BulkActionRequest {
        BulkActionRequest {
            list_create: self.pending_creates.clone(),
            list_update: self
                .current
                .iter()
                .filter(|row| row.is_changed)
                .map(|row| row.employee.clone())
                .collect(),
            list_delete: self.pending_deletes.clone(),
        }
    }

    /// Drop the creates and deletes a successful save carried.
    ///
    /// Anything queued while the request was in flight stays pending.
    pub(crate) fn acknowledge(&mut self, sent: &BulkActionRequest) {
        self.pending_creates
            .retain(|e| !sent.list_create.iter().any(|s| s.id == e.id));
        self.pending_deletes
            .retain(|id| !sent.list_delete.contains(id));
    }
}

/// Bridges roster state and the remote store
#[derive(Debug)]
pub struct SyncGateway<S> {
    store: S,
}

impl<S: EmployeeStore> SyncGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch the full roster and load it. Returns the row count.
    ///
    /// On failure the state keeps whatever it had.
    pub async fn fetch(&self, state: &RwLock<RosterState>) -> RosterResult<usize> {
        let records = self.store.list().await.map_err(RosterError::Fetch)?;
        let rows = records.len();
        state.write().await.load(records);
        tracing::info!(rows, "Roster fetched");
        Ok(rows)
    }

    /// Send the pending changeset. Returns what was sent.
    ///
    /// On failure nothing local changes, so the next attempt sends the
    /// same changeset again.
    pub async fn save(&self, state: &RwLock<RosterState>) -> RosterResult<BulkActionRequest> {
        let request = state.read().await.changeset();
        self.store
            .bulk_action(&request)
            .await
            .map_err(RosterError::Save)?;
        state.write().await.acknowledge(&request);
        tracing::info!(
            created = request.list_create.len(),
            updated = request.list_update.len(),
            deleted = request.list_delete.len(),
            "Roster saved"
        );
        Ok(request)
    }

    /// Save, then resynchronize from the store
    pub async fn flush(&self, state: &RwLock<RosterState>) -> RosterResult<BulkActionRequest> {
        let sent = self.save(state).await?;
        self.fetch(state).await?;
        Ok(sent)
    }
}
