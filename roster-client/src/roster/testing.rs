//! In-memory employee store for tests

use crate::{ClientError, ClientResult, EmployeeStore};
use async_trait::async_trait;
use shared::{BulkActionRequest, Employee, EmployeeId};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    records: Mutex<Vec<Employee>>,
    requests: Mutex<Vec<BulkActionRequest>>,
    next_id: Mutex<i64>,
    fail_list: AtomicBool,
    fail_save: AtomicBool,
}

impl MemoryStore {
    pub(crate) fn with(records: Vec<Employee>) -> Self {
        let next_id = records.iter().map(|e| e.id.0).max().unwrap_or(0) + 1;
        Self {
            records: Mutex::new(records),
            next_id: Mutex::new(next_id),
            ..Default::default()
        }
    }

    pub(crate) fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn requests(&self) -> Vec<BulkActionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn records(&self) -> Vec<Employee> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("list unavailable".into()));
        }
        Ok(self.records())
    }

    async fn bulk_action(&self, request: &BulkActionRequest) -> ClientResult<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("bulk-action unavailable".into()));
        }
        self.requests.lock().unwrap().push(request.clone());

        let mut records = self.records.lock().unwrap();
        records.retain(|e| !request.list_delete.contains(&e.id));
        for update in &request.list_update {
            if let Some(record) = records.iter_mut().find(|e| e.id == update.id) {
                *record = update.clone();
            }
        }
        let mut next_id = self.next_id.lock().unwrap();
        for create in &request.list_create {
            records.push(Employee {
                id: EmployeeId(*next_id),
                ..create.clone()
            });
            *next_id += 1;
        }
        Ok(())
    }
}
