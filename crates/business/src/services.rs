//! Service context and result types
//!
//! Shared plumbing for the service layer: database access, receipts returned
//! by the sales workflow, and the uniform reply envelope.

use crate::error::{BusinessError, BusinessResult, ErrorKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool, Transaction};
use ticketdesk_persistence::Database;

/// Context for business operations - contains database access
#[derive(Debug, Clone)]
pub struct ServiceContext {
    db: Database,
}

impl ServiceContext {
    /// Create new service context from database
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    /// Get database pool
    pub fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }

    /// Open a transaction for one operation
    pub async fn begin(&self) -> BusinessResult<Transaction<'static, Sqlite>> {
        Ok(self.db.begin().await?)
    }
}

/// Outcome of a successful sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub sale_id: i64,
    pub total_amount: Decimal,
    pub quantity: i64,
    /// Stock left on the ticket type after the sale
    pub remaining_stock: i64,
}

/// Outcome of a cancelled sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationReceipt {
    pub sale_id: i64,
    pub ticket_type_id: i64,
    pub restored_quantity: i64,
    /// Stock on the ticket type after the restock
    pub available_quantity: i64,
}

/// Error payload of a [`ServiceReply`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Serialisable `{ success, data, error }` envelope for presentation layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceReply<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReplyError>,
}

impl<T> ServiceReply<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(err: &BusinessError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ReplyError {
                kind: err.kind(),
                message: err.to_string(),
            }),
        }
    }
}

impl<T> From<BusinessResult<T>> for ServiceReply<T> {
    fn from(result: BusinessResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::failure(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reply_ok() {
        let receipt = SaleReceipt {
            sale_id: 1,
            total_amount: dec!(60.00),
            quantity: 3,
            remaining_stock: 7,
        };
        let reply = ServiceReply::from(Ok::<_, BusinessError>(receipt));
        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["total_amount"], "60.00");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_reply_failure() {
        let err = BusinessError::not_found("Sale", 9);
        let reply: ServiceReply<SaleReceipt> = Err(err).into();
        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["kind"], "not_found");
        assert_eq!(json["error"]["message"], "Sale not found: 9");
        assert!(json.get("data").is_none());
    }
}
