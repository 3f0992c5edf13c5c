//! Client error types

use crate::roster::Bucket;
use shared::EmployeeId;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Roster error type
#[derive(Debug, Error)]
pub enum RosterError {
    /// Edit or delete addressed a row that does not exist
    #[error("{bucket} row {index} out of range (len {len})")]
    IndexOutOfRange {
        bucket: Bucket,
        index: usize,
        len: usize,
    },

    /// No row with this id in the bucket
    #[error("{bucket} has no record {id}")]
    UnknownRecord { bucket: Bucket, id: EmployeeId },

    /// Page size not offered by the table
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    /// Field name not one of firstName / lastName / branch
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// List retrieval failed
    #[error("Fetch failed: {0}")]
    Fetch(#[source] ClientError),

    /// Bulk write failed
    #[error("Save failed: {0}")]
    Save(#[source] ClientError),
}

/// Result type for roster operations
pub type RosterResult<T> = Result<T, RosterError>;
