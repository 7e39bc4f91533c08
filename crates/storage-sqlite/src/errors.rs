//! Storage-specific error types for SQLite operations.
//!
//! Diesel, r2d2 and serde_json errors are wrapped here and converted to the
//! database-agnostic errors of `stonk_core` at the crate boundary.

use diesel::result::Error as DieselError;
use stonk_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These errors are internal to the storage layer and are converted to
/// `stonk_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// SQLite reports lock contention as a plain error message.
fn is_lock_error(message: &str) -> bool {
    message.contains("database is locked") || message.contains("database is busy")
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::StoreUnavailable(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::StoreUnavailable(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(_, info))
                if is_lock_error(info.message()) =>
            {
                Error::Database(DatabaseError::StoreUnavailable(info.message().to_string()))
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::SerializationError(e) => {
                Error::Database(DatabaseError::Serialization(e.to_string()))
            }
            StorageError::Unavailable(e) => Error::Database(DatabaseError::StoreUnavailable(e)),
            StorageError::Io(e) => Error::Io(e),
        }
    }
}

/// Extension trait for converting Diesel and r2d2 results to core results.
pub trait IntoCore<T> {
    fn into_core(self) -> stonk_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> stonk_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> stonk_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
