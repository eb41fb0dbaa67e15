//! Ticket type commands

use anyhow::Result;
use std::path::Path;
use ticketdesk_business::{EventService, ServiceContext};
use ticketdesk_core::money::format_amount;
use ticketdesk_core::{NewTicketType, TicketType};

use crate::db;
use crate::output::Output;
use crate::TicketAction;

/// Handle ticket-type subcommands
pub async fn handle(db_path: &Path, action: TicketAction, out: &Output) -> Result<()> {
    let db = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&db);
    let result = run(&ctx, action, out).await;
    db.close().await;
    result
}

async fn run(ctx: &ServiceContext, action: TicketAction, out: &Output) -> Result<()> {
    let events = EventService::new(ctx);

    match action {
        TicketAction::Add {
            event_id,
            label,
            price,
            quantity,
        } => {
            let ticket = NewTicketType::new(event_id, &label, price, quantity);
            out.emit(events.add_ticket_type(ticket).await, |t| {
                println!("✅ Added ticket type #{} to event #{}", t.id, t.event_id);
                println!("   Label: {}", t.label);
                println!("   Price: {}", format_amount(t.price));
                println!("   Stock: {}", t.available_quantity);
            })
        }

        TicketAction::List { event } => {
            let list = match event {
                Some(event_id) => events.list_ticket_types(event_id).await,
                None => events.all_ticket_types().await,
            };
            out.emit(list, |list| print_table(list))
        }
    }
}

fn print_table(list: &[TicketType]) {
    if list.is_empty() {
        println!("No ticket types found.");
        return;
    }
    println!(
        "{:<5} {:<7} {:<24} {:>10} {:>10}",
        "ID", "Event", "Label", "Price", "Available"
    );
    println!("{}", "-".repeat(60));
    for t in list {
        println!(
            "{:<5} {:<7} {:<24} {:>10} {:>10}",
            t.id,
            t.event_id,
            t.label,
            format_amount(t.price),
            t.available_quantity
        );
    }
}
