//! Buyer commands

use anyhow::Result;
use std::path::Path;
use ticketdesk_business::{BusinessError, BuyerService, SalesService, ServiceContext};
use ticketdesk_core::money::format_amount;
use ticketdesk_core::NewBuyer;

use crate::db;
use crate::output::Output;
use crate::BuyerAction;

/// Handle buyer subcommands
pub async fn handle(db_path: &Path, action: BuyerAction, out: &Output) -> Result<()> {
    let db = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&db);
    let result = run(&ctx, action, out).await;
    db.close().await;
    result
}

async fn run(ctx: &ServiceContext, action: BuyerAction, out: &Output) -> Result<()> {
    let buyers = BuyerService::new(ctx);

    match action {
        BuyerAction::Register {
            last_name,
            first_name,
            email,
            phone,
        } => {
            let mut buyer = NewBuyer::new(&last_name, &first_name, &email);
            if let Some(phone) = phone {
                buyer = buyer.with_phone(&phone);
            }
            out.emit(buyers.register(buyer).await, |b| {
                println!("✅ Registered buyer #{}", b.id);
                println!("   Name:  {}", b.full_name());
                println!("   Email: {}", b.email);
                if let Some(phone) = &b.phone {
                    println!("   Phone: {}", phone);
                }
            })
        }

        BuyerAction::List => out.emit(buyers.list().await, |list| {
            if list.is_empty() {
                println!("No buyers registered.");
                return;
            }
            println!("{:<5} {:<28} {:<32} {:<14}", "ID", "Name", "Email", "Phone");
            println!("{}", "-".repeat(82));
            for b in list {
                println!(
                    "{:<5} {:<28} {:<32} {:<14}",
                    b.id,
                    b.full_name(),
                    b.email,
                    b.phone.as_deref().unwrap_or("-")
                );
            }
            println!("\n{} buyer(s)", list.len());
        }),

        BuyerAction::Show { id } => {
            let profile = async {
                let buyer = buyers.get(id).await?;
                let purchases = SalesService::new(ctx).sales_for_buyer(id).await?;
                Ok::<_, BusinessError>((buyer, purchases))
            }
            .await;
            out.emit(profile, |(b, sales)| {
                println!("👤 {} (#{})", b.full_name(), b.id);
                println!("   Email:      {}", b.email);
                println!("   Phone:      {}", b.phone.as_deref().unwrap_or("-"));
                println!("   Registered: {}", b.registered_at.format("%Y-%m-%d %H:%M"));
                println!();
                if sales.is_empty() {
                    println!("   No purchases.");
                }
                for s in sales {
                    println!(
                        "   #{:<5} {}  {} x {} ({})  {}",
                        s.sale_id,
                        s.sold_at.format("%Y-%m-%d"),
                        s.quantity,
                        s.ticket_label,
                        s.event_name,
                        format_amount(s.total_amount)
                    );
                }
            })
        }
    }
}
