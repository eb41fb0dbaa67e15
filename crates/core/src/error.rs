//! # Error Module
//!
//! Domain validation errors for TicketDesk, built with thiserror.

use rust_decimal::Decimal;
use thiserror::Error;

/// Core domain errors.
///
/// Raised while validating input records, before anything reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // === Field errors ===
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    // === Money errors ===
    #[error("Price cannot be negative: {0}")]
    NegativePrice(Decimal),

    #[error("Amount has more than two decimal places: {0}")]
    TooPrecise(Decimal),

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(Decimal),

    // === Enum errors ===
    #[error("Invalid category: {0} (expected concert, conference or show)")]
    InvalidCategory(String),
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Shorthand for a non-positive numeric field
    pub fn not_positive(field: &'static str, value: i64) -> Self {
        Self::NotPositive { field, value }
    }
}
