//! # Sale Module
//!
//! A sale records N units of one ticket type bought by one buyer. The total
//! is frozen at the price in force when the sale was made.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A persisted sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub buyer_id: i64,
    pub ticket_type_id: i64,
    /// Units sold, always > 0
    pub quantity: i64,
    /// price_at_sale * quantity
    pub total_amount: Decimal,
    pub sold_at: DateTime<Utc>,
}

impl Sale {
    /// Unit price paid, derived from the frozen total
    pub fn unit_price(&self) -> Decimal {
        if self.quantity == 0 {
            return Decimal::ZERO;
        }
        (self.total_amount / Decimal::from(self.quantity)).round_dp(2)
    }
}

/// A sale about to be written. Built by the sales workflow only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub buyer_id: i64,
    pub ticket_type_id: i64,
    pub quantity: i64,
    pub total_amount: Decimal,
    pub sold_at: DateTime<Utc>,
}

/// A sale joined with its buyer, ticket type and event, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDetail {
    pub sale_id: i64,
    pub sold_at: DateTime<Utc>,
    pub quantity: i64,
    pub total_amount: Decimal,
    pub buyer_id: i64,
    /// "Last First"
    pub buyer_name: String,
    pub buyer_email: String,
    pub ticket_type_id: i64,
    pub ticket_label: String,
    /// Current unit price of the ticket type (may differ from the price paid)
    pub unit_price: Decimal,
    pub event_id: i64,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub category: crate::Category,
}

impl fmt::Display for SaleDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} x {} for {} by {} ({:.2})",
            self.sale_id,
            self.quantity,
            self.ticket_label,
            self.event_name,
            self.buyer_name,
            self.total_amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unit_price() {
        let sale = Sale {
            id: 1,
            buyer_id: 1,
            ticket_type_id: 1,
            quantity: 3,
            total_amount: dec!(60.00),
            sold_at: Utc::now(),
        };
        assert_eq!(sale.unit_price(), dec!(20.00));
    }
}
