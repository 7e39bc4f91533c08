//! Core error types for the Stonk journal.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, r2d2) are converted to these types by the storage layer.

use thiserror::Error;

use crate::records::FailedKey;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the journal.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Deleted {} of {} keys; failed: {}", .deleted.len(), .deleted.len() + .failed.len(), format_failed(.failed))]
    PartialDelete {
        deleted: Vec<String>,
        failed: Vec<FailedKey>,
    },

    #[error("Application is not initialized yet")]
    NotInitialized,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Import failed: {0}")]
    Import(String),
}

/// Storage-agnostic error type for key-value store operations.
///
/// Uses `String` for all error details so the storage layer can convert its
/// own error types (Diesel, r2d2, serde_json) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The store could not be opened or its lock could not be taken.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The requested key does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A value could not be encoded, or stored bytes did not decode.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// A store query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Space reclamation failed for a reason other than having nothing to do.
    #[error("Compaction failed: {0}")]
    CompactionFailed(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True when the error is a missing-record error from the store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::NotFound(_)))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Database(DatabaseError::Serialization(err.to_string()))
    }
}

fn format_failed(failed: &[FailedKey]) -> String {
    failed
        .iter()
        .map(|f| format!("{} ({})", f.key, f.error))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_delete_message_lists_failed_keys() {
        let err = Error::PartialDelete {
            deleted: vec!["trade:a_1".to_string()],
            failed: vec![FailedKey {
                key: "trade:a_2".to_string(),
                error: "disk full".to_string(),
            }],
        };
        assert_eq!(
            err.to_string(),
            "Deleted 1 of 2 keys; failed: trade:a_2 (disk full)"
        );
    }

    #[test]
    fn not_found_is_detected() {
        let err: Error = DatabaseError::NotFound("risk:x".to_string()).into();
        assert!(err.is_not_found());
        let err: Error = DatabaseError::QueryFailed("boom".to_string()).into();
        assert!(!err.is_not_found());
    }
}
