//! Statistics repository
//!
//! Read-only aggregates over the sales / ticket_types / events / buyers join
//! graph. Every sum is wrapped in COALESCE so empty tables yield zeros.

use crate::error::PersistenceResult;
use crate::sqlite::schema::*;
use rust_decimal::Decimal;
use sqlx::{Executor, Sqlite};
use ticketdesk_core::money::from_cents;
use ticketdesk_core::{
    CategorySales, DailySales, EventFillRate, EventRevenue, TicketTypeRanking, TopBuyer,
};

/// Repository for aggregate queries
pub struct StatsRepo;

impl StatsRepo {
    /// Sum of all sale totals
    pub async fn total_revenue<'e, E>(executor: E) -> PersistenceResult<Decimal>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let cents: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(total_cents), 0) FROM sales")
            .fetch_one(executor)
            .await?;
        Ok(from_cents(cents))
    }

    /// Sum of all quantities sold
    pub async fn total_quantity_sold<'e, E>(executor: E) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(quantity), 0) FROM sales")
            .fetch_one(executor)
            .await?;
        Ok(total)
    }

    /// Revenue and tickets sold per event, zero-sale events included.
    ///
    /// Ordered by revenue descending, then event id ascending.
    pub async fn revenue_by_event<'e, E>(executor: E) -> PersistenceResult<Vec<EventRevenue>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, EventRevenueRow>(
            r#"
            SELECT
                e.id AS event_id,
                e.name AS event_name,
                e.event_date,
                e.category,
                COALESCE(SUM(s.total_cents), 0) AS revenue_cents,
                COALESCE(SUM(s.quantity), 0) AS tickets_sold
            FROM events e
            LEFT JOIN ticket_types t ON t.event_id = e.id
            LEFT JOIN sales s ON s.ticket_type_id = t.id
            GROUP BY e.id, e.name, e.event_date, e.category
            ORDER BY revenue_cents DESC, e.id ASC
            "#,
        )
        .fetch_all(executor)
        .await?;
        rows.into_iter().map(EventRevenue::try_from).collect()
    }

    /// Percentage of capacity sold per event, rounded to two decimals.
    ///
    /// Ordered by fill rate descending, then event id ascending.
    pub async fn fill_rate_by_event<'e, E>(executor: E) -> PersistenceResult<Vec<EventFillRate>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, EventFillRateRow>(
            r#"
            SELECT
                e.id AS event_id,
                e.name AS event_name,
                e.capacity,
                COALESCE(SUM(s.quantity), 0) AS tickets_sold,
                ROUND(COALESCE(SUM(s.quantity), 0) * 100.0 / e.capacity, 2) AS fill_rate
            FROM events e
            LEFT JOIN ticket_types t ON t.event_id = e.id
            LEFT JOIN sales s ON s.ticket_type_id = t.id
            GROUP BY e.id, e.name, e.capacity
            ORDER BY fill_rate DESC, e.id ASC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(EventFillRate::from).collect())
    }

    /// Ticket types that sold at least once, by quantity sold
    pub async fn best_selling_ticket_types<'e, E>(
        executor: E,
    ) -> PersistenceResult<Vec<TicketTypeRanking>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, TicketTypeRankingRow>(
            r#"
            SELECT
                t.id AS ticket_type_id,
                t.label,
                e.name AS event_name,
                SUM(s.quantity) AS quantity_sold,
                SUM(s.total_cents) AS revenue_cents
            FROM ticket_types t
            JOIN sales s ON s.ticket_type_id = t.id
            JOIN events e ON t.event_id = e.id
            GROUP BY t.id, t.label, e.name
            ORDER BY quantity_sold DESC, t.id ASC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(TicketTypeRanking::from).collect())
    }

    /// Buyers ranked by total spent, at most `limit` rows
    pub async fn top_buyers<'e, E>(executor: E, limit: i64) -> PersistenceResult<Vec<TopBuyer>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, TopBuyerRow>(
            r#"
            SELECT
                b.id AS buyer_id,
                b.last_name || ' ' || b.first_name AS buyer_name,
                b.email,
                COUNT(s.id) AS purchase_count,
                SUM(s.quantity) AS tickets_bought,
                SUM(s.total_cents) AS total_spent_cents
            FROM buyers b
            JOIN sales s ON s.buyer_id = b.id
            GROUP BY b.id, b.last_name, b.first_name, b.email
            ORDER BY total_spent_cents DESC, b.id ASC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(TopBuyer::from).collect())
    }

    /// Event count, tickets sold and revenue per category
    pub async fn sales_by_category<'e, E>(executor: E) -> PersistenceResult<Vec<CategorySales>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, CategorySalesRow>(
            r#"
            SELECT
                e.category,
                COUNT(DISTINCT e.id) AS event_count,
                COALESCE(SUM(s.quantity), 0) AS tickets_sold,
                COALESCE(SUM(s.total_cents), 0) AS revenue_cents
            FROM events e
            LEFT JOIN ticket_types t ON t.event_id = e.id
            LEFT JOIN sales s ON s.ticket_type_id = t.id
            GROUP BY e.category
            ORDER BY revenue_cents DESC, e.category ASC
            "#,
        )
        .fetch_all(executor)
        .await?;
        rows.into_iter().map(CategorySales::try_from).collect()
    }

    /// Sales per calendar day (UTC), oldest first
    pub async fn daily_sales<'e, E>(executor: E) -> PersistenceResult<Vec<DailySales>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, DailySalesRow>(
            r#"
            SELECT
                DATE(sold_at) AS day,
                COUNT(*) AS sale_count,
                SUM(quantity) AS tickets_sold,
                SUM(total_cents) AS revenue_cents
            FROM sales
            GROUP BY DATE(sold_at)
            ORDER BY day
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(DailySales::from).collect())
    }
}
