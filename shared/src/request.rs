//! Request types for the shared crate

use crate::models::{Employee, EmployeeId};
use serde::{Deserialize, Serialize};

/// Bulk-write payload for `POST {base}/bulk-action`
///
/// Carries every pending create, update and delete in one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionRequest {
    /// Locally added records, sent with their client-generated ids
    pub list_create: Vec<Employee>,
    /// Edited records projected to `{id, firstName, lastName, branch}`
    pub list_update: Vec<Employee>,
    /// Ids of records removed locally
    pub list_delete: Vec<EmployeeId>,
}

impl BulkActionRequest {
    /// Whether the request carries no changes at all
    pub fn is_empty(&self) -> bool {
        self.list_create.is_empty() && self.list_update.is_empty() && self.list_delete.is_empty()
    }

    /// Total number of operations in the request
    pub fn len(&self) -> usize {
        self.list_create.len() + self.list_update.len() + self.list_delete.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_action_wire_shape() {
        let request = BulkActionRequest {
            list_create: vec![],
            list_update: vec![Employee::new(1, "Z", "B", "X")],
            list_delete: vec![EmployeeId(1)],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "listCreate": [],
                "listUpdate": [{"id": 1, "firstName": "Z", "lastName": "B", "branch": "X"}],
                "listDelete": [1]
            })
        );
        assert_eq!(request.len(), 2);
        assert!(!request.is_empty());
        assert!(BulkActionRequest::default().is_empty());
    }
}
