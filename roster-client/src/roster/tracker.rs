//! Mutation tracker
//!
//! The only place user edits turn into roster mutations. Index-addressed
//! entry points resolve the row to its id first; the mutation itself is
//! applied by id so a shifting window never hits the wrong record.

use super::store::{Bucket, EmployeeField, RosterState};
use crate::{RosterError, RosterResult};
use shared::{Employee, EmployeeId};

impl RosterState {
    /// Set a field on the row at `index` of `bucket`.
    ///
    /// Rows in `current` are flagged `is_changed`; the flag stays set
    /// until the next load.
    pub fn edit_field(
        &mut self,
        bucket: Bucket,
        index: usize,
        field: EmployeeField,
        value: impl Into<String>,
    ) -> RosterResult<EmployeeId> {
        let id = self.id_at(bucket, index)?;
        self.edit_field_by_id(bucket, id, field, value)?;
        Ok(id)
    }

    pub fn edit_field_by_id(
        &mut self,
        bucket: Bucket,
        id: EmployeeId,
        field: EmployeeField,
        value: impl Into<String>,
    ) -> RosterResult<()> {
        let position = self
            .position(bucket, id)
            .ok_or(RosterError::UnknownRecord { bucket, id })?;
        match bucket {
            Bucket::Current => {
                let row = &mut self.current[position];
                field.set(&mut row.employee, value);
                row.is_changed = true;
            }
            Bucket::PendingCreates => {
                field.set(&mut self.pending_creates[position], value);
            }
        }
        tracing::debug!(%bucket, %id, %field, "Field edited");
        Ok(())
    }

    /// Append a blank record with a locally generated id to `pending_creates`
    pub fn add_record(&mut self) -> EmployeeId {
        let id = self.ids.next_id();
        self.pending_creates.push(Employee::blank(id));
        tracing::debug!(%id, pending = self.pending_creates.len(), "Record added");
        id
    }

    /// Remove the row at `index` of `bucket`.
    ///
    /// Pending creates are discarded outright. Current rows are dropped
    /// and their id queued for deletion, along with any unsaved edits.
    pub fn remove_record(&mut self, bucket: Bucket, index: usize) -> RosterResult<EmployeeId> {
        let id = self.id_at(bucket, index)?;
        self.remove_record_by_id(bucket, id)?;
        Ok(id)
    }

    pub fn remove_record_by_id(&mut self, bucket: Bucket, id: EmployeeId) -> RosterResult<()> {
        let position = self
            .position(bucket, id)
            .ok_or(RosterError::UnknownRecord { bucket, id })?;
        match bucket {
            Bucket::Current => {
                self.current.remove(position);
                if !self.pending_deletes.contains(&id) {
                    self.pending_deletes.push(id);
                }
            }
            Bucket::PendingCreates => {
                self.pending_creates.remove(position);
            }
        }
        tracing::debug!(%bucket, %id, "Record removed");
        Ok(())
    }
}
