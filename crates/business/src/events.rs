//! Event operations - events and their ticket types
//!
//! EventService creates events, attaches priced ticket tiers to them and
//! answers catalogue queries.

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use chrono::NaiveDate;
use ticketdesk_core::{Category, Event, NewEvent, NewTicketType, TicketType};
use ticketdesk_persistence::{EventRepo, TicketTypeRepo};
use tracing::info;

/// Event Service - handles events and ticket types
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Create an event after validating name, venue and capacity
    pub async fn create_event(&self, event: NewEvent) -> BusinessResult<Event> {
        let event = event.validated()?;
        let id = EventRepo::insert(self.ctx.pool(), &event).await?;
        info!(
            event_id = id,
            name = %event.name,
            category = %event.category,
            capacity = event.capacity,
            "event created"
        );
        self.get_event(id).await
    }

    /// All events, by date
    pub async fn list_events(&self) -> BusinessResult<Vec<Event>> {
        Ok(EventRepo::list(self.ctx.pool()).await?)
    }

    pub async fn list_by_category(&self, category: Category) -> BusinessResult<Vec<Event>> {
        Ok(EventRepo::list_by_category(self.ctx.pool(), category).await?)
    }

    /// Events dated `today` or later
    pub async fn list_upcoming(&self, today: NaiveDate) -> BusinessResult<Vec<Event>> {
        Ok(EventRepo::list_upcoming(self.ctx.pool(), today).await?)
    }

    pub async fn get_event(&self, id: i64) -> BusinessResult<Event> {
        EventRepo::get_by_id(self.ctx.pool(), id)
            .await?
            .ok_or_else(|| BusinessError::not_found("Event", id))
    }

    // ========================================================================
    // Ticket types
    // ========================================================================

    /// Attach a ticket tier to an existing event
    pub async fn add_ticket_type(&self, ticket: NewTicketType) -> BusinessResult<TicketType> {
        let ticket = ticket.validated()?;
        let event = self.get_event(ticket.event_id).await?;

        let pool = self.ctx.pool();
        let id = TicketTypeRepo::insert(pool, &ticket).await?;
        info!(
            ticket_type_id = id,
            event_id = event.id,
            label = %ticket.label,
            price = %ticket.price,
            quantity = ticket.quantity,
            "ticket type added"
        );

        self.get_ticket_type(id).await
    }

    /// Ticket types of one event, cheapest first
    pub async fn list_ticket_types(&self, event_id: i64) -> BusinessResult<Vec<TicketType>> {
        self.get_event(event_id).await?;
        Ok(TicketTypeRepo::list_by_event(self.ctx.pool(), event_id).await?)
    }

    /// Every ticket type across all events
    pub async fn all_ticket_types(&self) -> BusinessResult<Vec<TicketType>> {
        Ok(TicketTypeRepo::list(self.ctx.pool()).await?)
    }

    pub async fn get_ticket_type(&self, id: i64) -> BusinessResult<TicketType> {
        TicketTypeRepo::get_by_id(self.ctx.pool(), id)
            .await?
            .ok_or_else(|| BusinessError::not_found("TicketType", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rust_decimal_macros::dec;
    use ticketdesk_persistence::Database;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> ServiceContext {
        let db = Database::in_memory().await.unwrap();
        ServiceContext::new(&db)
    }

    #[tokio::test]
    async fn test_create_and_filter_events() {
        let ctx = setup().await;
        let service = EventService::new(&ctx);

        let past = service
            .create_event(NewEvent::new("Jazz", date(2026, 1, 5), "Square", 300, Category::Concert))
            .await
            .unwrap();
        let future = service
            .create_event(
                NewEvent::new("Tech Summit", date(2026, 12, 1), "Centre", 200, Category::Conference)
                    .with_description("AI and the future of work"),
            )
            .await
            .unwrap();

        assert_eq!(future.description.as_deref(), Some("AI and the future of work"));
        assert_eq!(service.list_events().await.unwrap().len(), 2);

        let upcoming = service.list_upcoming(date(2026, 6, 1)).await.unwrap();
        assert_eq!(upcoming, vec![future.clone()]);

        let concerts = service.list_by_category(Category::Concert).await.unwrap();
        assert_eq!(concerts, vec![past]);
        assert!(service.list_by_category(Category::Show).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_event_rejected() {
        let ctx = setup().await;
        let service = EventService::new(&ctx);

        let err = service
            .create_event(NewEvent::new("Empty", date(2026, 12, 1), "Hall", 0, Category::Show))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(service.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ticket_type_requires_event() {
        let ctx = setup().await;
        let service = EventService::new(&ctx);

        let err = service
            .add_ticket_type(NewTicketType::new(99, "Standard", dec!(20), 10))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = service.list_ticket_types(99).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_ticket_type_validation() {
        let ctx = setup().await;
        let service = EventService::new(&ctx);
        let event = service
            .create_event(NewEvent::new("Circus", date(2026, 12, 1), "Tent", 400, Category::Show))
            .await
            .unwrap();

        for bad in [
            NewTicketType::new(event.id, "Free", dec!(-1), 10),
            NewTicketType::new(event.id, "Odd", dec!(10.005), 10),
            NewTicketType::new(event.id, "None", dec!(10), 0),
        ] {
            let err = service.add_ticket_type(bad).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }

        let free = service
            .add_ticket_type(NewTicketType::new(event.id, "Invitation", dec!(0), 5))
            .await
            .unwrap();
        let premium = service
            .add_ticket_type(NewTicketType::new(event.id, "Premium", dec!(45), 80))
            .await
            .unwrap();
        assert_eq!(premium.price, dec!(45.00));
        assert_eq!(premium.available_quantity, 80);

        let tiers = service.list_ticket_types(event.id).await.unwrap();
        assert_eq!(tiers, vec![free, premium]);
    }
}
