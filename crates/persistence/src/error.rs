//! # Persistence Errors
//!
//! Error types for the persistence layer. sqlx constraint failures are
//! classified so the service layer can tell a duplicate email from a disk
//! failure.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === Database errors ===
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    // === Constraint errors ===
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    // === Conversion errors ===
    #[error("Invalid enum value: {field} = {value}")]
    InvalidEnumValue { field: String, value: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Result type alias for PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message().to_string();
            match db_err.kind() {
                ErrorKind::UniqueViolation => return Self::UniqueViolation(message),
                ErrorKind::ForeignKeyViolation => return Self::ForeignKeyViolation(message),
                ErrorKind::CheckViolation => return Self::CheckViolation(message),
                _ => {}
            }
        }
        Self::Database(err)
    }
}

impl From<ticketdesk_core::CoreError> for PersistenceError {
    fn from(err: ticketdesk_core::CoreError) -> Self {
        Self::InvalidAmount(err.to_string())
    }
}

impl PersistenceError {
    /// Create InvalidEnumValue error
    pub fn invalid_enum(field: &str, value: &str) -> Self {
        Self::InvalidEnumValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether a UNIQUE constraint rejected the write
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }
}
