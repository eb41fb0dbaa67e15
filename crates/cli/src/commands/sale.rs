//! Sale commands: execute, cancel, list

use anyhow::Result;
use std::path::Path;
use ticketdesk_business::{SalesService, ServiceContext};
use ticketdesk_core::money::format_amount;
use ticketdesk_core::SaleDetail;

use crate::db;
use crate::output::Output;
use crate::SaleAction;

/// Handle sale subcommands
pub async fn handle(db_path: &Path, action: SaleAction, out: &Output) -> Result<()> {
    let db = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&db);
    let result = run(&ctx, action, out).await;
    db.close().await;
    result
}

async fn run(ctx: &ServiceContext, action: SaleAction, out: &Output) -> Result<()> {
    let sales = SalesService::new(ctx);

    match action {
        SaleAction::Execute {
            buyer_id,
            ticket_type_id,
            quantity,
        } => {
            let result = sales.execute_sale(buyer_id, ticket_type_id, quantity).await;
            out.emit(result, |r| {
                println!("✅ Sale #{} recorded", r.sale_id);
                println!("   Tickets:   {}", r.quantity);
                println!("   Total:     {}", format_amount(r.total_amount));
                println!("   Remaining: {}", r.remaining_stock);
            })
        }

        SaleAction::Cancel { sale_id } => out.emit(sales.cancel_sale(sale_id).await, |r| {
            println!("✅ Sale #{} cancelled", r.sale_id);
            println!("   Restocked: {} ticket(s)", r.restored_quantity);
            println!("   Available: {} (ticket type #{})", r.available_quantity, r.ticket_type_id);
        }),

        SaleAction::List { buyer, event } => {
            let list = match (buyer, event) {
                (Some(buyer_id), _) => sales.sales_for_buyer(buyer_id).await,
                (None, Some(event_id)) => sales.sales_for_event(event_id).await,
                (None, None) => sales.list_sales().await,
            };
            out.emit(list, |list| print_table(list))
        }
    }
}

fn print_table(list: &[SaleDetail]) {
    if list.is_empty() {
        println!("No sales recorded.");
        return;
    }
    println!(
        "{:<6} {:<17} {:<24} {:<22} {:<16} {:>4} {:>10}",
        "ID", "Sold At", "Buyer", "Event", "Ticket", "Qty", "Total"
    );
    println!("{}", "-".repeat(105));
    for s in list {
        println!(
            "{:<6} {:<17} {:<24} {:<22} {:<16} {:>4} {:>10}",
            s.sale_id,
            s.sold_at.format("%Y-%m-%d %H:%M").to_string(),
            s.buyer_name,
            s.event_name,
            s.ticket_label,
            s.quantity,
            format_amount(s.total_amount)
        );
    }
    println!("\n{} sale(s)", list.len());
}
