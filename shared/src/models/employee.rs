//! Employee Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Employee identifier
///
/// Assigned by the remote store for persisted records. Records created
/// locally carry a client-generated id until the next successful sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EmployeeId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Employee record as exchanged with the store
///
/// Used for the `GET /list` response and for both `listCreate` and
/// `listUpdate` entries of a bulk action. Free-text fields, no validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub branch: String,
}

impl Employee {
    /// Create an employee with empty fields
    pub fn blank(id: EmployeeId) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            branch: String::new(),
        }
    }

    pub fn new(
        id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            id: EmployeeId(id),
            first_name: first_name.into(),
            last_name: last_name.into(),
            branch: branch.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_uses_camel_case_keys() {
        let employee = Employee::new(1, "A", "B", "X");
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "firstName": "A", "lastName": "B", "branch": "X"})
        );
    }

    #[test]
    fn test_employee_missing_fields_default_to_empty() {
        let employee: Employee = serde_json::from_str(r#"{"id": 7, "firstName": "Ann"}"#).unwrap();
        assert_eq!(employee.id, EmployeeId(7));
        assert_eq!(employee.first_name, "Ann");
        assert!(employee.last_name.is_empty());
        assert!(employee.branch.is_empty());
    }
}
