//! Error types for the storage core.
//!
//! Storage-specific failures (Diesel, r2d2) are mapped onto this taxonomy at
//! the crate boundary so callers never match on backend error types.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the storage core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Secret hashing failed: {0}")]
    Secret(String),
}

/// Errors surfaced by the durable store.
///
/// `QueryFailed` and `ConnectionFailed` are the transient, retryable class;
/// `UniqueViolation` and `ForeignKeyViolation` are terminal for the current
/// operation and must not be retried on the same inputs.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True when the error is a unique-constraint violation, regardless of
    /// which index raised it.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::UniqueViolation(_)))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::NotFound(_)))
    }
}

impl From<DieselError> for Error {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => {
                Error::Database(DatabaseError::NotFound("record not found".to_string()))
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Error::Database(DatabaseError::UniqueViolation(info.message().to_string()))
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Error::Database(DatabaseError::ForeignKeyViolation(
                    info.message().to_string(),
                ))
            }
            DieselError::RollbackTransaction | DieselError::BrokenTransactionManager => {
                Error::Database(DatabaseError::TransactionFailed(err.to_string()))
            }
            other => Error::Database(DatabaseError::QueryFailed(other.to_string())),
        }
    }
}

impl From<diesel::ConnectionError> for Error {
    fn from(err: diesel::ConnectionError) -> Self {
        Error::Database(DatabaseError::ConnectionFailed(err.to_string()))
    }
}

impl From<r2d2::Error> for Error {
    fn from(err: r2d2::Error) -> Self {
        Error::Database(DatabaseError::ConnectionFailed(err.to_string()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Database(DatabaseError::ConnectionFailed(err.to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}
