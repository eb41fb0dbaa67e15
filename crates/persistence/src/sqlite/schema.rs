//! Database schema definitions
//!
//! Row types for sqlx mapping from SQLite tables and aggregate queries.
//! The schema itself lives in `schema.sql`. Money columns hold integer cents.

use crate::error::{PersistenceError, PersistenceResult};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ticketdesk_core::money::from_cents;
use ticketdesk_core::{
    Buyer, Category, CategorySales, DailySales, Event, EventFillRate, EventRevenue, Sale,
    SaleDetail, TicketType, TicketTypeRanking, TopBuyer,
};

/// Declarative schema script, embedded at compile time
pub const SCHEMA_SQL: &str = include_str!("../../schema.sql");

/// Tables created by [`SCHEMA_SQL`]
pub const TABLES: [&str; 4] = ["buyers", "events", "ticket_types", "sales"];

/// Row type for table `buyers`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct BuyerRow {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// Row type for table `events`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct EventRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub venue: String,
    pub capacity: i64,
    pub category: String,
}

/// Row type for table `ticket_types`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TicketTypeRow {
    pub id: i64,
    pub event_id: i64,
    pub label: String,
    pub price_cents: i64,
    pub available_quantity: i64,
}

/// Row type for table `sales`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct SaleRow {
    pub id: i64,
    pub buyer_id: i64,
    pub ticket_type_id: i64,
    pub quantity: i64,
    pub total_cents: i64,
    pub sold_at: DateTime<Utc>,
}

/// Sale joined with buyer, ticket type and event
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct SaleDetailRow {
    pub sale_id: i64,
    pub sold_at: DateTime<Utc>,
    pub quantity: i64,
    pub total_cents: i64,
    pub buyer_id: i64,
    pub buyer_name: String,
    pub buyer_email: String,
    pub ticket_type_id: i64,
    pub ticket_label: String,
    pub unit_price_cents: i64,
    pub event_id: i64,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub category: String,
}

// === Aggregate rows ===

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRevenueRow {
    pub event_id: i64,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub category: String,
    pub revenue_cents: i64,
    pub tickets_sold: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventFillRateRow {
    pub event_id: i64,
    pub event_name: String,
    pub capacity: i64,
    pub tickets_sold: i64,
    pub fill_rate: f64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TicketTypeRankingRow {
    pub ticket_type_id: i64,
    pub label: String,
    pub event_name: String,
    pub quantity_sold: i64,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopBuyerRow {
    pub buyer_id: i64,
    pub buyer_name: String,
    pub email: String,
    pub purchase_count: i64,
    pub tickets_bought: i64,
    pub total_spent_cents: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategorySalesRow {
    pub category: String,
    pub event_count: i64,
    pub tickets_sold: i64,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailySalesRow {
    pub day: NaiveDate,
    pub sale_count: i64,
    pub tickets_sold: i64,
    pub revenue_cents: i64,
}

// === Conversion implementations ===

fn parse_category(value: &str) -> PersistenceResult<Category> {
    value
        .parse()
        .map_err(|_| PersistenceError::invalid_enum("category", value))
}

impl From<BuyerRow> for Buyer {
    fn from(row: BuyerRow) -> Self {
        Self {
            id: row.id,
            last_name: row.last_name,
            first_name: row.first_name,
            email: row.email,
            phone: row.phone,
            registered_at: row.registered_at,
        }
    }
}

impl TryFrom<EventRow> for Event {
    type Error = PersistenceError;

    fn try_from(row: EventRow) -> PersistenceResult<Self> {
        Ok(Self {
            category: parse_category(&row.category)?,
            id: row.id,
            name: row.name,
            description: row.description,
            date: row.event_date,
            start_time: row.start_time,
            venue: row.venue,
            capacity: row.capacity,
        })
    }
}

impl From<TicketTypeRow> for TicketType {
    fn from(row: TicketTypeRow) -> Self {
        Self {
            id: row.id,
            event_id: row.event_id,
            label: row.label,
            price: from_cents(row.price_cents),
            available_quantity: row.available_quantity,
        }
    }
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Self {
            id: row.id,
            buyer_id: row.buyer_id,
            ticket_type_id: row.ticket_type_id,
            quantity: row.quantity,
            total_amount: from_cents(row.total_cents),
            sold_at: row.sold_at,
        }
    }
}

impl TryFrom<SaleDetailRow> for SaleDetail {
    type Error = PersistenceError;

    fn try_from(row: SaleDetailRow) -> PersistenceResult<Self> {
        Ok(Self {
            category: parse_category(&row.category)?,
            sale_id: row.sale_id,
            sold_at: row.sold_at,
            quantity: row.quantity,
            total_amount: from_cents(row.total_cents),
            buyer_id: row.buyer_id,
            buyer_name: row.buyer_name,
            buyer_email: row.buyer_email,
            ticket_type_id: row.ticket_type_id,
            ticket_label: row.ticket_label,
            unit_price: from_cents(row.unit_price_cents),
            event_id: row.event_id,
            event_name: row.event_name,
            event_date: row.event_date,
        })
    }
}

impl TryFrom<EventRevenueRow> for EventRevenue {
    type Error = PersistenceError;

    fn try_from(row: EventRevenueRow) -> PersistenceResult<Self> {
        Ok(Self {
            category: parse_category(&row.category)?,
            event_id: row.event_id,
            event_name: row.event_name,
            event_date: row.event_date,
            revenue: from_cents(row.revenue_cents),
            tickets_sold: row.tickets_sold,
        })
    }
}

impl From<EventFillRateRow> for EventFillRate {
    fn from(row: EventFillRateRow) -> Self {
        Self {
            event_id: row.event_id,
            event_name: row.event_name,
            capacity: row.capacity,
            tickets_sold: row.tickets_sold,
            fill_rate: row.fill_rate,
        }
    }
}

impl From<TicketTypeRankingRow> for TicketTypeRanking {
    fn from(row: TicketTypeRankingRow) -> Self {
        Self {
            ticket_type_id: row.ticket_type_id,
            label: row.label,
            event_name: row.event_name,
            quantity_sold: row.quantity_sold,
            revenue: from_cents(row.revenue_cents),
        }
    }
}

impl From<TopBuyerRow> for TopBuyer {
    fn from(row: TopBuyerRow) -> Self {
        Self {
            buyer_id: row.buyer_id,
            buyer_name: row.buyer_name,
            email: row.email,
            purchase_count: row.purchase_count,
            tickets_bought: row.tickets_bought,
            total_spent: from_cents(row.total_spent_cents),
        }
    }
}

impl TryFrom<CategorySalesRow> for CategorySales {
    type Error = PersistenceError;

    fn try_from(row: CategorySalesRow) -> PersistenceResult<Self> {
        Ok(Self {
            category: parse_category(&row.category)?,
            event_count: row.event_count,
            tickets_sold: row.tickets_sold,
            revenue: from_cents(row.revenue_cents),
        })
    }
}

impl From<DailySalesRow> for DailySales {
    fn from(row: DailySalesRow) -> Self {
        Self {
            day: row.day,
            sale_count: row.sale_count,
            tickets_sold: row.tickets_sold,
            revenue: from_cents(row.revenue_cents),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ticket_type_row_conversion() {
        let ticket: TicketType = TicketTypeRow {
            id: 3,
            event_id: 1,
            label: "VIP".to_string(),
            price_cents: 5000,
            available_quantity: 40,
        }
        .into();
        assert_eq!(ticket.price, dec!(50.00));
        assert_eq!(ticket.available_quantity, 40);
    }

    #[test]
    fn test_event_row_rejects_unknown_category() {
        let row = EventRow {
            id: 1,
            name: "Opera Night".to_string(),
            description: None,
            event_date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            start_time: None,
            venue: "Opera House".to_string(),
            capacity: 50,
            category: "opera".to_string(),
        };
        let err = Event::try_from(row).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidEnumValue { .. }));
    }

    #[test]
    fn test_schema_script_covers_all_tables() {
        for table in TABLES {
            assert!(SCHEMA_SQL.contains(&format!("CREATE TABLE {table}")));
            assert!(SCHEMA_SQL.contains(&format!("DROP TABLE IF EXISTS {table}")));
        }
    }
}
