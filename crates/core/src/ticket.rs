//! # Ticket Type Module
//!
//! A ticket type is a priced tier of admission for one event. Its
//! `available_quantity` is the stock ledger and the only field that changes
//! after creation.

use crate::buyer::required;
use crate::error::{CoreError, CoreResult};
use crate::money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A priced ticket tier with its remaining stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    pub id: i64,
    /// Owning event
    pub event_id: i64,
    /// Tier label ("VIP", "Early Bird", ...)
    pub label: String,
    /// Unit price, two decimals, never negative
    pub price: Decimal,
    /// Remaining unsold units, never negative
    pub available_quantity: i64,
}

impl TicketType {
    /// Whether `quantity` units can be sold from current stock
    pub fn can_supply(&self, quantity: i64) -> bool {
        self.available_quantity >= quantity
    }

    /// Total for `quantity` units at the current price.
    ///
    /// Fails with `AmountOutOfRange` when the product overflows or does not
    /// fit in storable cents.
    pub fn total_for(&self, quantity: i64) -> CoreResult<Decimal> {
        let total = self
            .price
            .checked_mul(Decimal::from(quantity))
            .ok_or(CoreError::AmountOutOfRange(self.price))?;
        money::to_cents(total)?;
        Ok(total)
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({} left)",
            self.label,
            money::format_amount(self.price),
            self.available_quantity
        )
    }
}

/// Input for creating a ticket type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicketType {
    pub event_id: i64,
    pub label: String,
    pub price: Decimal,
    /// Initial stock
    pub quantity: i64,
}

impl NewTicketType {
    pub fn new(event_id: i64, label: &str, price: Decimal, quantity: i64) -> Self {
        Self {
            event_id,
            label: label.to_string(),
            price,
            quantity,
        }
    }

    /// Validate: label required, price >= 0 with at most two decimals,
    /// initial quantity > 0.
    pub fn validated(self) -> CoreResult<Self> {
        let label = required("label", &self.label)?;
        if self.price < Decimal::ZERO {
            return Err(CoreError::NegativePrice(self.price));
        }
        money::to_cents(self.price)?;
        if self.quantity <= 0 {
            return Err(CoreError::not_positive("quantity", self.quantity));
        }
        Ok(Self { label, ..self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_for() {
        let ticket = TicketType {
            id: 1,
            event_id: 1,
            label: "Standard".to_string(),
            price: dec!(20.00),
            available_quantity: 10,
        };
        assert_eq!(ticket.total_for(3).unwrap(), dec!(60.00));
        assert!(ticket.can_supply(10));
        assert!(!ticket.can_supply(11));
    }

    #[test]
    fn test_total_for_out_of_range() {
        let ticket = TicketType {
            id: 1,
            event_id: 1,
            label: "Gala".to_string(),
            price: dec!(90000000000000000.00),
            available_quantity: 1_000_000_000_000,
        };
        let err = ticket.total_for(1_000_000_000_000).unwrap_err();
        assert_eq!(err, CoreError::AmountOutOfRange(dec!(90000000000000000.00)));

        let ticket = TicketType {
            price: dec!(1000000.00),
            ..ticket
        };
        let err = ticket.total_for(10_000_000_000_000).unwrap_err();
        assert!(matches!(err, CoreError::AmountOutOfRange(_)));
    }

    #[test]
    fn test_validation() {
        assert!(NewTicketType::new(1, "Free", dec!(0), 5).validated().is_ok());

        let err = NewTicketType::new(1, "VIP", dec!(-1), 5).validated().unwrap_err();
        assert_eq!(err, CoreError::NegativePrice(dec!(-1)));

        let err = NewTicketType::new(1, "VIP", dec!(10.999), 5).validated().unwrap_err();
        assert_eq!(err, CoreError::TooPrecise(dec!(10.999)));

        let err = NewTicketType::new(1, "VIP", dec!(10), 0).validated().unwrap_err();
        assert_eq!(err, CoreError::not_positive("quantity", 0));

        let err = NewTicketType::new(1, "", dec!(10), 1).validated().unwrap_err();
        assert_eq!(err, CoreError::MissingField("label"));
    }
}
