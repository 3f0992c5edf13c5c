//! Roster session - one table view from mount to teardown
//!
//! Owns the roster state, the optional autosave scheduler and the event
//! channel. Every successful mutation re-arms the scheduler and emits
//! [`RosterEvent::Changed`]; failures are logged and handed back, the
//! session stays usable.

use super::event::RosterEvent;
use super::gateway::SyncGateway;
use super::pagination::Pagination;
use super::scheduler::{AutosaveScheduler, SchedulerState};
use super::store::{Bucket, EmployeeField, EmployeeRow, RosterState};
use crate::{EmployeeStore, RosterConfig, RosterError, RosterResult, SaveMode};
use shared::{Employee, EmployeeId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, RwLockReadGuard, broadcast};

/// Broadcast channel capacity, enough for a burst of edits between renders
const EVENT_CAPACITY: usize = 64;

/// Table session for the manual or autosave view
pub struct RosterSession<S> {
    state: Arc<RwLock<RosterState>>,
    gateway: Arc<SyncGateway<S>>,
    scheduler: Option<AutosaveScheduler>,
    pagination: Pagination,
    events: broadcast::Sender<RosterEvent>,
}

impl<S: EmployeeStore + 'static> RosterSession<S> {
    /// Create a session with an empty roster. Nothing is fetched yet.
    pub fn new(store: S, config: &RosterConfig) -> RosterResult<Self> {
        let pagination = Pagination::new(config.page_size)?;
        let state = Arc::new(RwLock::new(RosterState::new()));
        let gateway = Arc::new(SyncGateway::new(store));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let scheduler = match config.save_mode {
            SaveMode::Manual => None,
            SaveMode::Autosave => {
                let state = state.clone();
                let gateway = gateway.clone();
                let events = events.clone();
                Some(AutosaveScheduler::new(config.quiet_period, move || {
                    let state = state.clone();
                    let gateway = gateway.clone();
                    let events = events.clone();
                    async move {
                        let _ = flush_and_notify(&gateway, &state, &events).await;
                    }
                }))
            }
        };

        Ok(Self {
            state,
            gateway,
            scheduler,
            pagination,
            events,
        })
    }

    /// Create the session and load the roster.
    ///
    /// A failed first fetch leaves the table empty.
    pub async fn open(store: S, config: &RosterConfig) -> RosterResult<Self> {
        let session = Self::new(store, config)?;
        let _ = session.reload().await;
        Ok(session)
    }

    /// Subscribe to re-render notifications
    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.events.subscribe()
    }

    pub fn save_mode(&self) -> SaveMode {
        if self.scheduler.is_some() {
            SaveMode::Autosave
        } else {
            SaveMode::Manual
        }
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler
            .as_ref()
            .map_or(SchedulerState::Idle, AutosaveScheduler::state)
    }

    /// Autosave quiet period, `None` for a manual session
    pub fn quiet_period(&self) -> Option<Duration> {
        self.scheduler.as_ref().map(AutosaveScheduler::quiet_period)
    }

    /// Read access to the whole roster state
    pub async fn read(&self) -> RwLockReadGuard<'_, RosterState> {
        self.state.read().await
    }

    // ========== Rendering ==========

    /// Rows of the visible page
    pub async fn page_rows(&self) -> Vec<EmployeeRow> {
        self.state
            .read()
            .await
            .windowed(self.pagination.page, self.pagination.page_size)
            .to_vec()
    }

    /// Locally added rows, shown below the page
    pub async fn new_rows(&self) -> Vec<Employee> {
        self.state.read().await.pending_creates().to_vec()
    }

    pub async fn total_rows(&self) -> usize {
        self.state.read().await.len(Bucket::Current)
    }

    pub async fn page_count(&self) -> usize {
        self.pagination.page_count(self.total_rows().await)
    }

    // ========== Pagination ==========

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
        self.notify_page();
    }

    /// Change rows per page; returns to the first page
    pub fn set_page_size(&mut self, page_size: usize) -> RosterResult<()> {
        if let Err(e) = self.pagination.set_page_size(page_size) {
            tracing::warn!(error = %e, "Page size rejected");
            return Err(e);
        }
        self.notify_page();
        Ok(())
    }

    fn notify_page(&self) {
        let _ = self.events.send(RosterEvent::PageChanged {
            page: self.pagination.page,
            page_size: self.pagination.page_size,
        });
    }

    // ========== Mutations ==========

    /// Edit a field of a visible row.
    ///
    /// For [`Bucket::Current`] `index` is the row's position on the visible
    /// page; for [`Bucket::PendingCreates`] it is the position among the
    /// new rows.
    pub async fn edit_field(
        &mut self,
        bucket: Bucket,
        index: usize,
        field: EmployeeField,
        value: impl Into<String>,
    ) -> RosterResult<EmployeeId> {
        let result = {
            let mut state = self.state.write().await;
            self.locate(&state, bucket, index).and_then(|id| {
                state
                    .edit_field_by_id(bucket, id, field, value)
                    .map(|()| id)
            })
        };
        self.after_mutation(result, "edit")
    }

    /// Add a blank row to the new rows
    pub async fn add_record(&mut self) -> EmployeeId {
        let id = self.state.write().await.add_record();
        self.mutated();
        id
    }

    /// Remove a visible row, addressed like [`edit_field`](Self::edit_field)
    pub async fn remove_record(&mut self, bucket: Bucket, index: usize) -> RosterResult<EmployeeId> {
        let result = {
            let mut state = self.state.write().await;
            self.locate(&state, bucket, index)
                .and_then(|id| state.remove_record_by_id(bucket, id).map(|()| id))
        };
        self.after_mutation(result, "remove")
    }

    // ========== Sync ==========

    /// Fetch the roster again, keeping pending changes
    pub async fn reload(&self) -> RosterResult<usize> {
        fetch_and_notify(&self.gateway, &self.state, &self.events).await
    }

    /// Flush now, as the Save button does. Any armed countdown is dropped.
    pub async fn save_now(&mut self) -> RosterResult<()> {
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.cancel();
        }
        flush_and_notify(&self.gateway, &self.state, &self.events).await
    }

    /// Tear the view down. A pending countdown is cancelled, unsaved
    /// changes are not flushed.
    pub fn close(mut self) {
        let dropped = self.scheduler.as_mut().is_some_and(AutosaveScheduler::cancel);
        tracing::debug!(dropped_countdown = dropped, "Roster session closed");
    }

    fn locate(&self, state: &RosterState, bucket: Bucket, index: usize) -> RosterResult<EmployeeId> {
        match bucket {
            Bucket::Current => {
                let window = state.windowed(self.pagination.page, self.pagination.page_size);
                window
                    .get(index)
                    .map(EmployeeRow::id)
                    .ok_or(RosterError::IndexOutOfRange {
                        bucket,
                        index,
                        len: window.len(),
                    })
            }
            Bucket::PendingCreates => state.id_at(bucket, index),
        }
    }

    fn after_mutation(
        &mut self,
        result: RosterResult<EmployeeId>,
        action: &'static str,
    ) -> RosterResult<EmployeeId> {
        match result {
            Ok(id) => {
                self.mutated();
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(action, error = %e, "Roster mutation ignored");
                Err(e)
            }
        }
    }

    fn mutated(&mut self) {
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.arm();
        }
        let _ = self.events.send(RosterEvent::Changed);
    }
}

impl<S> std::fmt::Debug for RosterSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterSession")
            .field("pagination", &self.pagination)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

async fn fetch_and_notify<S: EmployeeStore>(
    gateway: &SyncGateway<S>,
    state: &RwLock<RosterState>,
    events: &broadcast::Sender<RosterEvent>,
) -> RosterResult<usize> {
    match gateway.fetch(state).await {
        Ok(rows) => {
            let _ = events.send(RosterEvent::Loaded { rows });
            Ok(rows)
        }
        Err(e) => {
            tracing::error!(error = %e, "Error fetching employee data");
            let _ = events.send(RosterEvent::FetchFailed {
                message: e.to_string(),
            });
            Err(e)
        }
    }
}

async fn flush_and_notify<S: EmployeeStore>(
    gateway: &SyncGateway<S>,
    state: &RwLock<RosterState>,
    events: &broadcast::Sender<RosterEvent>,
) -> RosterResult<()> {
    match gateway.save(state).await {
        Ok(sent) => {
            let _ = events.send(RosterEvent::Saved {
                created: sent.list_create.len(),
                updated: sent.list_update.len(),
                deleted: sent.list_delete.len(),
            });
        }
        Err(e) => {
            tracing::error!(error = %e, "Error saving employee changes");
            let _ = events.send(RosterEvent::SaveFailed {
                message: e.to_string(),
            });
            return Err(e);
        }
    }
    fetch_and_notify(gateway, state, events).await.map(|_| ())
}
