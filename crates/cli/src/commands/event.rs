//! Event commands

use anyhow::Result;
use chrono::Local;
use std::path::Path;
use ticketdesk_business::{BusinessError, EventService, ServiceContext};
use ticketdesk_core::money::format_amount;
use ticketdesk_core::{Event, NewEvent};

use crate::db;
use crate::output::Output;
use crate::EventAction;

/// Handle event subcommands
pub async fn handle(db_path: &Path, action: EventAction, out: &Output) -> Result<()> {
    let db = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&db);
    let result = run(&ctx, action, out).await;
    db.close().await;
    result
}

async fn run(ctx: &ServiceContext, action: EventAction, out: &Output) -> Result<()> {
    let events = EventService::new(ctx);

    match action {
        EventAction::Create {
            name,
            date,
            venue,
            capacity,
            category,
            time,
            description,
        } => {
            let mut event = NewEvent::new(&name, date, &venue, capacity, category.to_core_type());
            if let Some(time) = time {
                event = event.starting_at(time);
            }
            if let Some(description) = description {
                event = event.with_description(&description);
            }
            out.emit(events.create_event(event).await, |e| {
                println!("✅ Created event #{}", e.id);
                print_event(e);
            })
        }

        EventAction::List { category } => {
            let list = match category {
                Some(c) => events.list_by_category(c.to_core_type()).await,
                None => events.list_events().await,
            };
            out.emit(list, |list| print_table(list))
        }

        EventAction::Upcoming { from } => {
            let from = from.unwrap_or_else(|| Local::now().date_naive());
            out.emit(events.list_upcoming(from).await, |list| print_table(list))
        }

        EventAction::Show { id } => {
            let detail = async {
                let event = events.get_event(id).await?;
                let tickets = events.list_ticket_types(id).await?;
                Ok::<_, BusinessError>((event, tickets))
            }
            .await;
            out.emit(detail, |(e, tickets)| {
                print_event(e);
                println!();
                if tickets.is_empty() {
                    println!("   No ticket types.");
                }
                for t in tickets {
                    println!(
                        "   #{:<4} {:<20} {:>9}  {} left",
                        t.id,
                        t.label,
                        format_amount(t.price),
                        t.available_quantity
                    );
                }
            })
        }
    }
}

fn print_event(e: &Event) {
    println!("🎭 {} [{}]", e.name, e.category);
    if let Some(description) = &e.description {
        println!("   {}", description);
    }
    let time = e
        .start_time
        .map(|t| t.format(" %H:%M").to_string())
        .unwrap_or_default();
    println!("   When:     {}{}", e.date, time);
    println!("   Where:    {}", e.venue);
    println!("   Capacity: {}", e.capacity);
}

fn print_table(list: &[Event]) {
    if list.is_empty() {
        println!("No events found.");
        return;
    }
    println!(
        "{:<5} {:<28} {:<11} {:<6} {:<24} {:>8} {:<10}",
        "ID", "Name", "Date", "Time", "Venue", "Capacity", "Category"
    );
    println!("{}", "-".repeat(98));
    for e in list {
        let time = e
            .start_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<5} {:<28} {:<11} {:<6} {:<24} {:>8} {:<10}",
            e.id,
            e.name,
            e.date.to_string(),
            time,
            e.venue,
            e.capacity,
            e.category.as_str()
        );
    }
    println!("\n{} event(s)", list.len());
}
