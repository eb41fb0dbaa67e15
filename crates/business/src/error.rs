//! Business layer errors
//!
//! One taxonomy for every service call. Validation failures are raised before
//! any storage call; persistence failures are wrapped verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use ticketdesk_core::CoreError;
use ticketdesk_persistence::PersistenceError;

/// Business operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    // === Input errors ===
    #[error("Validation failed: {0}")]
    Validation(#[from] CoreError),

    // === State errors ===
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },

    // === Wrapped errors ===
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for business operations
pub type BusinessResult<T> = Result<T, BusinessError>;

impl From<sqlx::Error> for BusinessError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.into())
    }
}

impl BusinessError {
    /// Create not found error
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Create insufficient stock error
    pub fn insufficient_stock(requested: i64, available: i64) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    /// Create conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Classification used by presentation layers
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

/// Error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    InsufficientStock,
    Persistence,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InsufficientStock => "insufficient_stock",
            ErrorKind::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_error() {
        let err = BusinessError::insufficient_stock(11, 10);
        assert_eq!(err.kind(), ErrorKind::InsufficientStock);
        assert!(err.to_string().contains("requested 11"));
        assert!(err.to_string().contains("available 10"));
    }

    #[test]
    fn test_validation_from_core() {
        let err: BusinessError = CoreError::not_positive("quantity", 0).into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("quantity"));
    }

    #[test]
    fn test_persistence_from_sqlx() {
        let err: BusinessError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind(), ErrorKind::Persistence);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
    }
}
