//! # Statistics Module
//!
//! Read-only aggregate records produced by the statistics queries and the
//! reporting indicators derived from them.

use crate::event::Category;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default size of the top-buyers ranking
pub const DEFAULT_TOP_BUYERS: i64 = 5;

/// Overall revenue figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub total_revenue: Decimal,
    pub total_quantity: i64,
    /// Revenue per ticket sold, 0 when nothing was sold
    pub average_basket: Decimal,
}

/// Revenue and tickets sold for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRevenue {
    pub event_id: i64,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub category: Category,
    pub revenue: Decimal,
    pub tickets_sold: i64,
}

/// Share of an event's capacity that has been sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFillRate {
    pub event_id: i64,
    pub event_name: String,
    pub capacity: i64,
    pub tickets_sold: i64,
    /// Percentage, two decimals
    pub fill_rate: f64,
}

impl EventFillRate {
    /// More tickets sold than the event can hold
    pub fn is_overfilled(&self) -> bool {
        self.tickets_sold > self.capacity
    }
}

/// One entry of the best-selling ticket type ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTypeRanking {
    pub ticket_type_id: i64,
    pub label: String,
    pub event_name: String,
    pub quantity_sold: i64,
    pub revenue: Decimal,
}

/// One entry of the top-buyers ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopBuyer {
    pub buyer_id: i64,
    /// "Last First"
    pub buyer_name: String,
    pub email: String,
    pub purchase_count: i64,
    pub tickets_bought: i64,
    pub total_spent: Decimal,
}

/// Sales grouped by event category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: Category,
    pub event_count: i64,
    pub tickets_sold: i64,
    pub revenue: Decimal,
}

/// Sales for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    pub day: NaiveDate,
    pub sale_count: i64,
    pub tickets_sold: i64,
    pub revenue: Decimal,
}

/// Snapshot of derived indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedIndicators {
    pub total_revenue: Decimal,
    pub total_quantity: i64,
    pub average_ticket_price: Decimal,
    pub average_revenue_per_event: Decimal,
    /// Mean of per-event fill rates, two decimals
    pub average_fill_rate: f64,
    /// Event with the highest revenue; ties go to the lowest event id
    pub top_event_id: Option<i64>,
    pub top_event: Option<String>,
    pub computed_at: DateTime<Utc>,
}

/// Round a percentage to two decimals
pub fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overfilled() {
        let mut rate = EventFillRate {
            event_id: 1,
            event_name: "Rock Night".to_string(),
            capacity: 100,
            tickets_sold: 100,
            fill_rate: 100.0,
        };
        assert!(!rate.is_overfilled());
        rate.tickets_sold = 101;
        assert!(rate.is_overfilled());
    }

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(33.3333), 33.33);
        assert_eq!(round_percent(0.0), 0.0);
    }
}
