//! Repository implementations for SQLite
//!
//! One repository per entity. Every function takes any SQLite executor, so
//! the same call works against the pool or inside an open transaction
//! (`&mut *tx`). Parameters are always bound, never formatted into SQL.

use crate::error::PersistenceResult;
use crate::sqlite::schema::*;
use chrono::{NaiveDate, Utc};
use sqlx::{Executor, Sqlite};
use ticketdesk_core::money::to_cents;
use ticketdesk_core::{
    Buyer, Category, Event, NewBuyer, NewEvent, NewSale, NewTicketType, Sale, SaleDetail,
    TicketType,
};

// ============================================================================
// Buyer Repository
// ============================================================================

/// Repository for the buyers table
pub struct BuyerRepo;

impl BuyerRepo {
    /// Insert a buyer, returning its id
    pub async fn insert<'e, E>(executor: E, buyer: &NewBuyer) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "INSERT INTO buyers (last_name, first_name, email, phone, registered_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&buyer.last_name)
        .bind(&buyer.first_name)
        .bind(&buyer.email)
        .bind(&buyer.phone)
        .bind(Utc::now())
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Get buyer by ID
    pub async fn get_by_id<'e, E>(executor: E, id: i64) -> PersistenceResult<Option<Buyer>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, BuyerRow>("SELECT * FROM buyers WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(Buyer::from))
    }

    /// Get buyer by (normalised) email
    pub async fn get_by_email<'e, E>(executor: E, email: &str) -> PersistenceResult<Option<Buyer>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, BuyerRow>("SELECT * FROM buyers WHERE email = ?")
            .bind(email)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(Buyer::from))
    }

    /// All buyers, ordered by name
    pub async fn list<'e, E>(executor: E) -> PersistenceResult<Vec<Buyer>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, BuyerRow>(
            "SELECT * FROM buyers ORDER BY last_name, first_name, id",
        )
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(Buyer::from).collect())
    }

    /// Count buyers
    pub async fn count<'e, E>(executor: E) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM buyers")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }
}

// ============================================================================
// Event Repository
// ============================================================================

/// Repository for the events table
pub struct EventRepo;

impl EventRepo {
    /// Insert an event, returning its id
    pub async fn insert<'e, E>(executor: E, event: &NewEvent) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO events (name, description, event_date, start_time, venue, capacity, category)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.date)
        .bind(event.start_time)
        .bind(&event.venue)
        .bind(event.capacity)
        .bind(event.category.as_str())
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Get event by ID
    pub async fn get_by_id<'e, E>(executor: E, id: i64) -> PersistenceResult<Option<Event>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, EventRow>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .map(Event::try_from)
            .transpose()
    }

    /// All events, ordered by date
    pub async fn list<'e, E>(executor: E) -> PersistenceResult<Vec<Event>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT * FROM events ORDER BY event_date, start_time, id",
        )
        .fetch_all(executor)
        .await?;
        rows.into_iter().map(Event::try_from).collect()
    }

    /// Events of one category, ordered by date
    pub async fn list_by_category<'e, E>(
        executor: E,
        category: Category,
    ) -> PersistenceResult<Vec<Event>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT * FROM events WHERE category = ? ORDER BY event_date, start_time, id",
        )
        .bind(category.as_str())
        .fetch_all(executor)
        .await?;
        rows.into_iter().map(Event::try_from).collect()
    }

    /// Events on or after `from`, ordered by date
    pub async fn list_upcoming<'e, E>(executor: E, from: NaiveDate) -> PersistenceResult<Vec<Event>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT * FROM events WHERE event_date >= ? ORDER BY event_date, start_time, id",
        )
        .bind(from)
        .fetch_all(executor)
        .await?;
        rows.into_iter().map(Event::try_from).collect()
    }

    /// Count events
    pub async fn count<'e, E>(executor: E) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }
}

// ============================================================================
// Ticket Type Repository
// ============================================================================

/// Repository for the ticket_types table
pub struct TicketTypeRepo;

impl TicketTypeRepo {
    /// Insert a ticket type with its initial stock, returning its id
    pub async fn insert<'e, E>(executor: E, ticket: &NewTicketType) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let price_cents = to_cents(ticket.price)?;
        let result = sqlx::query(
            "INSERT INTO ticket_types (event_id, label, price_cents, available_quantity) VALUES (?, ?, ?, ?)",
        )
        .bind(ticket.event_id)
        .bind(&ticket.label)
        .bind(price_cents)
        .bind(ticket.quantity)
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Get ticket type by ID
    pub async fn get_by_id<'e, E>(executor: E, id: i64) -> PersistenceResult<Option<TicketType>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, TicketTypeRow>("SELECT * FROM ticket_types WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(TicketType::from))
    }

    /// Ticket types of one event, cheapest first
    pub async fn list_by_event<'e, E>(executor: E, event_id: i64) -> PersistenceResult<Vec<TicketType>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, TicketTypeRow>(
            "SELECT * FROM ticket_types WHERE event_id = ? ORDER BY price_cents, id",
        )
        .bind(event_id)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(TicketType::from).collect())
    }

    /// All ticket types, grouped by event then cheapest first
    pub async fn list<'e, E>(executor: E) -> PersistenceResult<Vec<TicketType>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, TicketTypeRow>(
            "SELECT * FROM ticket_types ORDER BY event_id, price_cents, id",
        )
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(TicketType::from).collect())
    }

    /// Take `quantity` units out of stock.
    ///
    /// Returns `false` and changes nothing if the ticket type does not exist
    /// or holds fewer than `quantity` units.
    pub async fn decrement_stock<'e, E>(executor: E, id: i64, quantity: i64) -> PersistenceResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE ticket_types
            SET available_quantity = available_quantity - ?
            WHERE id = ? AND available_quantity >= ?
            "#,
        )
        .bind(quantity)
        .bind(id)
        .bind(quantity)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Put `quantity` units back into stock. Returns `false` if the ticket
    /// type does not exist.
    pub async fn restock<'e, E>(executor: E, id: i64, quantity: i64) -> PersistenceResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE ticket_types SET available_quantity = available_quantity + ? WHERE id = ?",
        )
        .bind(quantity)
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Count ticket types
    pub async fn count<'e, E>(executor: E) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM ticket_types")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }
}

// ============================================================================
// Sale Repository
// ============================================================================

const SALE_DETAIL_SELECT: &str = r#"
    SELECT
        s.id AS sale_id,
        s.sold_at,
        s.quantity,
        s.total_cents,
        b.id AS buyer_id,
        b.last_name || ' ' || b.first_name AS buyer_name,
        b.email AS buyer_email,
        t.id AS ticket_type_id,
        t.label AS ticket_label,
        t.price_cents AS unit_price_cents,
        e.id AS event_id,
        e.name AS event_name,
        e.event_date,
        e.category
    FROM sales s
    JOIN buyers b ON s.buyer_id = b.id
    JOIN ticket_types t ON s.ticket_type_id = t.id
    JOIN events e ON t.event_id = e.id
"#;

const SALE_DETAIL_ORDER: &str = "ORDER BY s.sold_at DESC, s.id DESC";

/// Repository for the sales table
pub struct SaleRepo;

impl SaleRepo {
    /// Insert a sale, returning its id
    pub async fn insert<'e, E>(executor: E, sale: &NewSale) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let total_cents = to_cents(sale.total_amount)?;
        let result = sqlx::query(
            r#"
            INSERT INTO sales (buyer_id, ticket_type_id, quantity, total_cents, sold_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(sale.buyer_id)
        .bind(sale.ticket_type_id)
        .bind(sale.quantity)
        .bind(total_cents)
        .bind(sale.sold_at)
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Get sale by ID
    pub async fn get_by_id<'e, E>(executor: E, id: i64) -> PersistenceResult<Option<Sale>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, SaleRow>("SELECT * FROM sales WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(Sale::from))
    }

    /// Delete a sale. Returns `false` if it did not exist.
    pub async fn delete<'e, E>(executor: E, id: i64) -> PersistenceResult<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM sales WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// All sales with buyer, ticket and event details, newest first
    pub async fn list_details<'e, E>(executor: E) -> PersistenceResult<Vec<SaleDetail>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("{SALE_DETAIL_SELECT} {SALE_DETAIL_ORDER}");
        let rows = sqlx::query_as::<_, SaleDetailRow>(&sql)
            .fetch_all(executor)
            .await?;
        rows.into_iter().map(SaleDetail::try_from).collect()
    }

    /// Sales made by one buyer, newest first
    pub async fn list_by_buyer<'e, E>(executor: E, buyer_id: i64) -> PersistenceResult<Vec<SaleDetail>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("{SALE_DETAIL_SELECT} WHERE s.buyer_id = ? {SALE_DETAIL_ORDER}");
        let rows = sqlx::query_as::<_, SaleDetailRow>(&sql)
            .bind(buyer_id)
            .fetch_all(executor)
            .await?;
        rows.into_iter().map(SaleDetail::try_from).collect()
    }

    /// Sales for one event across all its ticket types, newest first
    pub async fn list_by_event<'e, E>(executor: E, event_id: i64) -> PersistenceResult<Vec<SaleDetail>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("{SALE_DETAIL_SELECT} WHERE t.event_id = ? {SALE_DETAIL_ORDER}");
        let rows = sqlx::query_as::<_, SaleDetailRow>(&sql)
            .bind(event_id)
            .fetch_all(executor)
            .await?;
        rows.into_iter().map(SaleDetail::try_from).collect()
    }

    /// Count sales
    pub async fn count<'e, E>(executor: E) -> PersistenceResult<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use rust_decimal_macros::dec;

    async fn fixture() -> (Database, i64, i64, i64) {
        let db = Database::in_memory().await.unwrap();
        let buyer_id = BuyerRepo::insert(db.pool(), &NewBuyer::new("Dupont", "Marie", "marie@x.com"))
            .await
            .unwrap();
        let event = NewEvent::new(
            "Rock Night",
            NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
            "Town Hall",
            100,
            Category::Concert,
        );
        let event_id = EventRepo::insert(db.pool(), &event).await.unwrap();
        let ticket_id = TicketTypeRepo::insert(
            db.pool(),
            &NewTicketType::new(event_id, "Standard", dec!(20.00), 10),
        )
        .await
        .unwrap();
        (db, buyer_id, event_id, ticket_id)
    }

    #[tokio::test]
    async fn test_buyer_round_trip() {
        let (db, buyer_id, _, _) = fixture().await;

        let buyer = BuyerRepo::get_by_id(db.pool(), buyer_id).await.unwrap().unwrap();
        assert_eq!(buyer.email, "marie@x.com");

        let by_email = BuyerRepo::get_by_email(db.pool(), "marie@x.com").await.unwrap();
        assert_eq!(by_email.map(|b| b.id), Some(buyer_id));

        assert!(BuyerRepo::get_by_id(db.pool(), 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let (db, _, _, _) = fixture().await;
        let err = BuyerRepo::insert(db.pool(), &NewBuyer::new("Other", "Person", "marie@x.com"))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
        assert_eq!(BuyerRepo::count(db.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_buyers_listed_by_name() {
        let (db, _, _, _) = fixture().await;
        BuyerRepo::insert(db.pool(), &NewBuyer::new("Bernard", "Sophie", "sophie@x.com"))
            .await
            .unwrap();

        let names: Vec<_> = BuyerRepo::list(db.pool())
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.last_name)
            .collect();
        assert_eq!(names, vec!["Bernard", "Dupont"]);
    }

    #[tokio::test]
    async fn test_event_filters() {
        let (db, _, event_id, _) = fixture().await;
        let later = NewEvent::new(
            "Tech Summit",
            NaiveDate::from_ymd_opt(2027, 1, 10).unwrap(),
            "Congress Centre",
            200,
            Category::Conference,
        );
        let later_id = EventRepo::insert(db.pool(), &later).await.unwrap();

        let concerts = EventRepo::list_by_category(db.pool(), Category::Concert).await.unwrap();
        assert_eq!(concerts.len(), 1);
        assert_eq!(concerts[0].id, event_id);

        let all: Vec<_> = EventRepo::list(db.pool())
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(all, vec![event_id, later_id]);

        let upcoming = EventRepo::list_upcoming(db.pool(), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap())
            .await
            .unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, later_id);
    }

    #[tokio::test]
    async fn test_ticket_types_ordered_by_price() {
        let (db, _, event_id, standard_id) = fixture().await;
        let vip_id = TicketTypeRepo::insert(db.pool(), &NewTicketType::new(event_id, "VIP", dec!(50), 5))
            .await
            .unwrap();
        let early_id = TicketTypeRepo::insert(
            db.pool(),
            &NewTicketType::new(event_id, "Early Bird", dec!(15.50), 5),
        )
        .await
        .unwrap();

        let ids: Vec<_> = TicketTypeRepo::list_by_event(db.pool(), event_id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![early_id, standard_id, vip_id]);
    }

    #[tokio::test]
    async fn test_decrement_stock_never_goes_negative() {
        let (db, _, _, ticket_id) = fixture().await;

        assert!(TicketTypeRepo::decrement_stock(db.pool(), ticket_id, 4).await.unwrap());
        assert!(!TicketTypeRepo::decrement_stock(db.pool(), ticket_id, 7).await.unwrap());

        let ticket = TicketTypeRepo::get_by_id(db.pool(), ticket_id).await.unwrap().unwrap();
        assert_eq!(ticket.available_quantity, 6);

        assert!(TicketTypeRepo::restock(db.pool(), ticket_id, 4).await.unwrap());
        assert!(!TicketTypeRepo::restock(db.pool(), 999, 1).await.unwrap());
        let ticket = TicketTypeRepo::get_by_id(db.pool(), ticket_id).await.unwrap().unwrap();
        assert_eq!(ticket.available_quantity, 10);
    }

    #[tokio::test]
    async fn test_sale_insert_detail_and_delete() {
        let (db, buyer_id, event_id, ticket_id) = fixture().await;
        let sale = NewSale {
            buyer_id,
            ticket_type_id: ticket_id,
            quantity: 3,
            total_amount: dec!(60.00),
            sold_at: Utc::now(),
        };
        let sale_id = SaleRepo::insert(db.pool(), &sale).await.unwrap();

        let stored = SaleRepo::get_by_id(db.pool(), sale_id).await.unwrap().unwrap();
        assert_eq!(stored.total_amount, dec!(60.00));
        assert_eq!(stored.quantity, 3);

        let details = SaleRepo::list_by_event(db.pool(), event_id).await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].buyer_name, "Dupont Marie");
        assert_eq!(details[0].event_name, "Rock Night");
        assert_eq!(details[0].category, Category::Concert);

        assert_eq!(SaleRepo::list_by_buyer(db.pool(), buyer_id).await.unwrap().len(), 1);
        assert!(SaleRepo::list_by_buyer(db.pool(), 999).await.unwrap().is_empty());

        assert!(SaleRepo::delete(db.pool(), sale_id).await.unwrap());
        assert!(!SaleRepo::delete(db.pool(), sale_id).await.unwrap());
        assert_eq!(SaleRepo::count(db.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sale_for_unknown_buyer_violates_foreign_key() {
        let (db, _, _, ticket_id) = fixture().await;
        let sale = NewSale {
            buyer_id: 999,
            ticket_type_id: ticket_id,
            quantity: 1,
            total_amount: dec!(20.00),
            sold_at: Utc::now(),
        };
        let err = SaleRepo::insert(db.pool(), &sale).await.unwrap_err();
        assert!(matches!(err, crate::PersistenceError::ForeignKeyViolation(_)));
    }
}
