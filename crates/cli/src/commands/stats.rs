//! Statistics commands

use anyhow::Result;
use std::path::Path;
use ticketdesk_business::{ReportingService, ServiceContext};
use ticketdesk_core::money::format_amount;

use crate::db;
use crate::output::Output;
use crate::StatsAction;

/// Handle stats subcommands
pub async fn handle(db_path: &Path, action: StatsAction, out: &Output) -> Result<()> {
    let db = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&db);
    let result = run(&ctx, action, out).await;
    db.close().await;
    result
}

async fn run(ctx: &ServiceContext, action: StatsAction, out: &Output) -> Result<()> {
    let reporting = ReportingService::new(ctx);

    match action {
        StatsAction::Summary => out.emit(reporting.revenue_summary().await, |s| {
            println!("💰 Revenue Summary");
            println!("   Total revenue:  {}", format_amount(s.total_revenue));
            println!("   Tickets sold:   {}", s.total_quantity);
            println!("   Average basket: {}", format_amount(s.average_basket));
        }),

        StatsAction::Events => out.emit(reporting.revenue_by_event().await, |rows| {
            println!("{:<5} {:<28} {:<11} {:<11} {:>8} {:>12}", "ID", "Event", "Date", "Category", "Sold", "Revenue");
            println!("{}", "-".repeat(80));
            for r in rows {
                println!(
                    "{:<5} {:<28} {:<11} {:<11} {:>8} {:>12}",
                    r.event_id,
                    r.event_name,
                    r.event_date.to_string(),
                    r.category.as_str(),
                    r.tickets_sold,
                    format_amount(r.revenue)
                );
            }
        }),

        StatsAction::FillRates => out.emit(reporting.fill_rates().await, |rows| {
            println!("{:<5} {:<28} {:>9} {:>8} {:>9}", "ID", "Event", "Capacity", "Sold", "Fill %");
            println!("{}", "-".repeat(63));
            for r in rows {
                println!(
                    "{:<5} {:<28} {:>9} {:>8} {:>9.2}",
                    r.event_id, r.event_name, r.capacity, r.tickets_sold, r.fill_rate
                );
            }
        }),

        StatsAction::Tickets => out.emit(reporting.best_selling_ticket_types().await, |rows| {
            if rows.is_empty() {
                println!("No tickets sold yet.");
                return;
            }
            println!("{:<5} {:<20} {:<28} {:>8} {:>12}", "ID", "Ticket", "Event", "Sold", "Revenue");
            println!("{}", "-".repeat(77));
            for r in rows {
                println!(
                    "{:<5} {:<20} {:<28} {:>8} {:>12}",
                    r.ticket_type_id,
                    r.label,
                    r.event_name,
                    r.quantity_sold,
                    format_amount(r.revenue)
                );
            }
        }),

        StatsAction::Buyers { limit } => out.emit(reporting.top_buyers(limit).await, |rows| {
            if rows.is_empty() {
                println!("No purchases yet.");
                return;
            }
            println!("🏆 Top {} buyers", rows.len());
            for (rank, b) in rows.iter().enumerate() {
                println!(
                    "   {}. {:<24} {:<30} {:>3} purchase(s) {:>4} ticket(s) {:>10}",
                    rank + 1,
                    b.buyer_name,
                    b.email,
                    b.purchase_count,
                    b.tickets_bought,
                    format_amount(b.total_spent)
                );
            }
        }),

        StatsAction::Categories => out.emit(reporting.sales_by_category().await, |rows| {
            println!("{:<12} {:>7} {:>8} {:>12}", "Category", "Events", "Sold", "Revenue");
            println!("{}", "-".repeat(42));
            for r in rows {
                println!(
                    "{:<12} {:>7} {:>8} {:>12}",
                    r.category.as_str(),
                    r.event_count,
                    r.tickets_sold,
                    format_amount(r.revenue)
                );
            }
        }),

        StatsAction::Daily => out.emit(reporting.daily_sales().await, |rows| {
            if rows.is_empty() {
                println!("No sales recorded.");
                return;
            }
            println!("{:<11} {:>6} {:>8} {:>12}", "Day", "Sales", "Tickets", "Revenue");
            println!("{}", "-".repeat(40));
            for r in rows {
                println!(
                    "{:<11} {:>6} {:>8} {:>12}",
                    r.day.to_string(),
                    r.sale_count,
                    r.tickets_sold,
                    format_amount(r.revenue)
                );
            }
        }),

        StatsAction::Indicators => out.emit(reporting.compute_advanced_indicators().await, |i| {
            println!("📈 Indicators ({})", i.computed_at.format("%Y-%m-%d %H:%M:%S"));
            println!("   Total revenue:         {}", format_amount(i.total_revenue));
            println!("   Tickets sold:          {}", i.total_quantity);
            println!("   Average ticket price:  {}", format_amount(i.average_ticket_price));
            println!("   Avg revenue per event: {}", format_amount(i.average_revenue_per_event));
            println!("   Average fill rate:     {:.2}%", i.average_fill_rate);
            println!("   Top event:             {}", i.top_event.as_deref().unwrap_or("none"));
        }),

        StatsAction::Integrity => out.emit(reporting.overfilled_events().await, |rows| {
            if rows.is_empty() {
                println!("✅ No event is sold beyond capacity");
                return;
            }
            println!("⚠️  {} event(s) sold beyond capacity", rows.len());
            for r in rows {
                println!(
                    "   #{} {}: {} sold for {} seats ({:.2}%)",
                    r.event_id, r.event_name, r.tickets_sold, r.capacity, r.fill_rate
                );
            }
        }),
    }
}
