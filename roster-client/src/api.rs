//! Employee store API
//!
//! `EmployeeStore` is the seam between the roster core and the remote
//! store; `EmployeeApi` implements it over any [`HttpClient`].

use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use shared::{BulkActionRequest, Employee};
use std::sync::Arc;

const LIST_PATH: &str = "list";
const BULK_ACTION_PATH: &str = "bulk-action";

/// Remote employee store
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Full roster, in store order
    async fn list(&self) -> ClientResult<Vec<Employee>>;

    /// Apply creates, updates and deletes in one request
    async fn bulk_action(&self, request: &BulkActionRequest) -> ClientResult<()>;
}

#[async_trait]
impl<T: EmployeeStore + ?Sized> EmployeeStore for Arc<T> {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        (**self).list().await
    }

    async fn bulk_action(&self, request: &BulkActionRequest) -> ClientResult<()> {
        (**self).bulk_action(request).await
    }
}

/// Typed employee API over an HTTP client
#[derive(Debug, Clone)]
pub struct EmployeeApi<C> {
    http: C,
}

impl<C: HttpClient> EmployeeApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }
}

#[async_trait]
impl<C: HttpClient> EmployeeStore for EmployeeApi<C> {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        self.http.get(LIST_PATH).await
    }

    async fn bulk_action(&self, request: &BulkActionRequest) -> ClientResult<()> {
        self.http.post_discard(BULK_ACTION_PATH, request).await
    }
}
