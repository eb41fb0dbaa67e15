//! Database initialization and status

use anyhow::{bail, Context, Result};
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use ticketdesk_business::{seed, ServiceContext};
use ticketdesk_persistence::{
    BuyerRepo, Database, DatabaseConfig, EventRepo, SaleRepo, StatsRepo, TicketTypeRepo,
};
use tracing::{debug, warn};

use crate::output::Output;

/// Open (creating if needed) the database file
fn open(db_path: &Path) -> Result<Database> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Database::connect(&DatabaseConfig::file(db_path)).context("Failed to configure database")
}

/// Apply the schema, refusing to wipe an existing one without `force`
async fn prepare(db: &Database, force: bool) -> Result<()> {
    if db.is_initialized().await? {
        if !force {
            bail!(
                "Database at {} is already initialized. Use --force to drop all data.",
                db.location()
            );
        }
        warn!(location = db.location(), "dropping existing data");
    }
    db.reset_schema().await.context("Failed to create schema")?;
    Ok(())
}

/// Initialize the database with schema
pub async fn init_database(db_path: &Path, force: bool) -> Result<()> {
    let db = open(db_path)?;
    println!("📦 Creating schema...");
    let result = prepare(&db, force).await;
    db.close().await;
    result?;
    println!("✅ Database initialized at {}", db_path.display());
    Ok(())
}

/// Reset the database and insert demo data
pub async fn seed_database(
    db_path: &Path,
    sales: usize,
    seed_value: Option<u64>,
    force: bool,
    out: &Output,
) -> Result<()> {
    let db = open(db_path)?;
    let result = async {
        prepare(&db, force).await?;
        let mut rng = match seed_value {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::from_entropy(),
        };
        let ctx = ServiceContext::new(&db);
        let today = Local::now().date_naive();
        debug!(%today, sales, "seeding");
        out.emit(seed(&ctx, today, sales, &mut rng).await, |summary| {
            println!("🌱 Demo data inserted");
            println!("   Buyers:       {}", summary.buyers);
            println!("   Events:       {}", summary.events);
            println!("   Ticket types: {}", summary.ticket_types);
            println!("   Sales:        {}", summary.sales);
            if summary.skipped_sales > 0 {
                println!("   Skipped:      {} (insufficient stock)", summary.skipped_sales);
            }
        })
    }
    .await;
    db.close().await;
    result
}

/// Show database status
pub async fn show_status(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("❌ Database not found at {}", db_path.display());
        println!("   Run 'ticketdesk init' to create the database");
        return Ok(());
    }

    let db = Database::connect(&DatabaseConfig::file(db_path).existing_only())?;
    if !db.is_initialized().await? {
        println!("⚠️  Database at {} has no schema", db_path.display());
        println!("   Run 'ticketdesk init' to create it");
        db.close().await;
        return Ok(());
    }

    let pool = db.pool();
    println!("📊 Database Status");
    println!("   Path: {}", db_path.display());
    println!();
    println!("   Buyers:       {}", BuyerRepo::count(pool).await?);
    println!("   Events:       {}", EventRepo::count(pool).await?);
    println!("   Ticket types: {}", TicketTypeRepo::count(pool).await?);
    println!("   Sales:        {}", SaleRepo::count(pool).await?);
    println!("   Revenue:      {:.2}", StatsRepo::total_revenue(pool).await?);

    db.close().await;
    Ok(())
}

/// Connect to an initialized database
pub async fn connect(db_path: &Path) -> Result<Database> {
    if !db_path.exists() {
        bail!(
            "Database not found at {}. Run 'ticketdesk init' first.",
            db_path.display()
        );
    }
    let db = Database::connect(&DatabaseConfig::file(db_path).existing_only())?;
    if !db.is_initialized().await.context("Failed to connect to database")? {
        db.close().await;
        bail!("Database at {} has no schema. Run 'ticketdesk init' first.", db_path.display());
    }
    Ok(db)
}
