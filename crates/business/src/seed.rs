//! Demo data
//!
//! Populates an empty store with buyers, events, ticket tiers and random
//! sales. Sales go through [`SalesService`] so stock stays consistent.

use crate::buyers::BuyerService;
use crate::error::{BusinessError, BusinessResult};
use crate::events::EventService;
use crate::sales::SalesService;
use crate::services::ServiceContext;
use chrono::{Duration, NaiveDate, NaiveTime};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use ticketdesk_core::{Category, NewBuyer, NewEvent, NewTicketType};
use tracing::{debug, info};

/// Default number of random sales
pub const DEFAULT_SALES: usize = 50;

const BUYERS: [(&str, &str, &str, &str); 10] = [
    ("Dupont", "Marie", "marie.dupont@email.com", "0612345678"),
    ("Martin", "Jean", "jean.martin@email.com", "0698765432"),
    ("Bernard", "Sophie", "sophie.bernard@email.com", "0645678901"),
    ("Petit", "Lucas", "lucas.petit@email.com", "0654321098"),
    ("Durand", "Emma", "emma.durand@email.com", "0623456789"),
    ("Leroy", "Thomas", "thomas.leroy@email.com", "0687654321"),
    ("Moreau", "Chloe", "chloe.moreau@email.com", "0634567890"),
    ("Simon", "Hugo", "hugo.simon@email.com", "0676543210"),
    ("Laurent", "Lea", "lea.laurent@email.com", "0656789012"),
    ("Roux", "Nathan", "nathan.roux@email.com", "0665432109"),
];

struct EventSeed {
    name: &'static str,
    description: &'static str,
    days_ahead: i64,
    start: (u32, u32),
    venue: &'static str,
    capacity: i64,
    category: Category,
}

const EVENTS: [EventSeed; 8] = [
    EventSeed {
        name: "Rock Night",
        description: "Rock evening with local bands",
        days_ahead: 30,
        start: (20, 0),
        venue: "Town Hall",
        capacity: 500,
        category: Category::Concert,
    },
    EventSeed {
        name: "Jazz in Town",
        description: "Acoustic jazz festival",
        days_ahead: 45,
        start: (19, 30),
        venue: "Market Square",
        capacity: 300,
        category: Category::Concert,
    },
    EventSeed {
        name: "Electro Party",
        description: "Electro night with international DJs",
        days_ahead: 60,
        start: (22, 0),
        venue: "Hangar 42",
        capacity: 800,
        category: Category::Concert,
    },
    EventSeed {
        name: "Tech Summit",
        description: "AI and the future of work",
        days_ahead: 15,
        start: (9, 0),
        venue: "Convention Centre",
        capacity: 200,
        category: Category::Conference,
    },
    EventSeed {
        name: "Sustainable Development",
        description: "Forum on ecology and innovation",
        days_ahead: 25,
        start: (10, 0),
        venue: "Environment House",
        capacity: 150,
        category: Category::Conference,
    },
    EventSeed {
        name: "Modern Circus",
        description: "Contemporary circus performance",
        days_ahead: 20,
        start: (15, 0),
        venue: "Big Top",
        capacity: 400,
        category: Category::Show,
    },
    EventSeed {
        name: "Musical Night",
        description: "Local production of a classic musical",
        days_ahead: 35,
        start: (20, 30),
        venue: "Municipal Theatre",
        capacity: 350,
        category: Category::Show,
    },
    EventSeed {
        name: "Stand-up Special",
        description: "Local comedian on stage",
        days_ahead: 10,
        start: (21, 0),
        venue: "Cafe Theatre",
        capacity: 100,
        category: Category::Show,
    },
];

/// Ticket tiers per category: label, price in cents, percent of capacity
fn tiers(category: Category) -> [(&'static str, i64, i64); 3] {
    match category {
        Category::Concert => [("Standard", 2500, 60), ("VIP", 5000, 20), ("Early Bird", 2000, 20)],
        Category::Conference => [
            ("Single Entry", 1500, 50),
            ("Day Pass", 3500, 30),
            ("VIP Pass", 7500, 20),
        ],
        Category::Show => [
            ("Open Seating", 1800, 50),
            ("Category 1", 3000, 30),
            ("Premium", 4500, 20),
        ],
    }
}

/// What a seeding run created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub buyers: usize,
    pub events: usize,
    pub ticket_types: usize,
    pub sales: usize,
    /// Random sales refused for lack of stock
    pub skipped_sales: usize,
}

/// Seed an empty store.
///
/// Events are dated relative to `today`. `sales` random purchases of one to
/// four tickets are attempted; those exceeding remaining stock are skipped.
pub async fn seed<R: Rng>(
    ctx: &ServiceContext,
    today: NaiveDate,
    sales: usize,
    rng: &mut R,
) -> BusinessResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    let buyer_service = BuyerService::new(ctx);
    let mut buyer_ids = Vec::with_capacity(BUYERS.len());
    for (last_name, first_name, email, phone) in BUYERS {
        let buyer = buyer_service
            .register(NewBuyer::new(last_name, first_name, email).with_phone(phone))
            .await?;
        buyer_ids.push(buyer.id);
    }
    summary.buyers = buyer_ids.len();

    let event_service = EventService::new(ctx);
    let mut ticket_ids = Vec::new();
    for seed in &EVENTS {
        let mut event = NewEvent::new(
            seed.name,
            today + Duration::days(seed.days_ahead),
            seed.venue,
            seed.capacity,
            seed.category,
        )
        .with_description(seed.description);
        if let Some(start) = NaiveTime::from_hms_opt(seed.start.0, seed.start.1, 0) {
            event = event.starting_at(start);
        }
        let event = event_service.create_event(event).await?;
        summary.events += 1;

        for (label, price_cents, percent) in tiers(seed.category) {
            let quantity = seed.capacity * percent / 100;
            let price = Decimal::new(price_cents, 2);
            let ticket = event_service
                .add_ticket_type(NewTicketType::new(event.id, label, price, quantity))
                .await?;
            ticket_ids.push(ticket.id);
        }
    }
    summary.ticket_types = ticket_ids.len();

    let sales_service = SalesService::new(ctx);
    for _ in 0..sales {
        let (Some(&buyer_id), Some(&ticket_id)) = (buyer_ids.choose(rng), ticket_ids.choose(rng))
        else {
            break;
        };
        let quantity = rng.gen_range(1..=4);
        match sales_service.execute_sale(buyer_id, ticket_id, quantity).await {
            Ok(_) => summary.sales += 1,
            Err(BusinessError::InsufficientStock { .. }) => {
                debug!(ticket_id, quantity, "seed sale skipped");
                summary.skipped_sales += 1;
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        buyers = summary.buyers,
        events = summary.events,
        ticket_types = summary.ticket_types,
        sales = summary.sales,
        skipped = summary.skipped_sales,
        "seed data inserted"
    );
    Ok(summary)
}
