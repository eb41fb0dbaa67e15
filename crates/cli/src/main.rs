//! TicketDesk CLI - local event ticket sales from the command line
//!
//! Usage:
//! ```bash
//! ticketdesk init
//! ticketdesk buyer register Dupont Marie marie.dupont@email.com --phone 0612345678
//! ticketdesk event create "Rock Night" 2026-11-20 "Town Hall" 500 --category concert --time 20:00
//! ticketdesk ticket-type add 1 Standard 25.00 300
//! ticketdesk sale execute 1 1 3
//! ticketdesk stats indicators --json
//! ticketdesk report --kind revenue --format markdown --output revenue.md
//! ```

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use ticketdesk_core::{Category, DEFAULT_TOP_BUYERS};
use tracing_subscriber::EnvFilter;

mod commands;
mod db;
mod output;

use commands::{buyer, event, report, sale, stats, ticket};
use output::Output;

/// TicketDesk - ticket sales for local events, backed by SQLite
#[derive(Parser)]
#[command(name = "ticketdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file path
    #[arg(long, env = "TICKETDESK_DB", default_value = "data/ticketdesk.db", global = true)]
    pub db: PathBuf,

    /// Print results as JSON replies
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database schema
    Init {
        /// Drop and recreate an existing schema (all data is lost)
        #[arg(long)]
        force: bool,
    },

    /// Reset the database and fill it with demo data
    Seed {
        /// Number of random sales to attempt
        #[arg(long, default_value_t = ticketdesk_business::DEFAULT_SALES)]
        sales: usize,
        /// RNG seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
        /// Overwrite an existing database
        #[arg(long)]
        force: bool,
    },

    /// Show database status
    Status,

    /// Buyer management
    Buyer {
        #[command(subcommand)]
        action: BuyerAction,
    },

    /// Event management
    Event {
        #[command(subcommand)]
        action: EventAction,
    },

    /// Ticket type management
    TicketType {
        #[command(subcommand)]
        action: TicketAction,
    },

    /// Sell and cancel tickets
    Sale {
        #[command(subcommand)]
        action: SaleAction,
    },

    /// Sales statistics
    Stats {
        #[command(subcommand)]
        action: StatsAction,
    },

    /// Export a report
    Report {
        /// Report content
        #[arg(long, default_value = "revenue")]
        kind: ReportKind,
        /// Report format
        #[arg(long, default_value = "markdown")]
        format: FormatArg,
        /// Output file path (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Ranking size for the top-buyers report
        #[arg(long, default_value_t = DEFAULT_TOP_BUYERS)]
        limit: i64,
    },
}

#[derive(Subcommand)]
pub enum BuyerAction {
    /// Register a new buyer
    Register {
        last_name: String,
        first_name: String,
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// List all buyers
    List,
    /// Show a buyer and their purchases
    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum EventAction {
    /// Create a new event
    Create {
        name: String,
        /// Event date (YYYY-MM-DD)
        date: NaiveDate,
        venue: String,
        /// Maximum capacity
        capacity: i64,
        #[arg(long, short)]
        category: CategoryArg,
        /// Start time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,
        #[arg(long, short)]
        description: Option<String>,
    },
    /// List events
    List {
        /// Filter by category
        #[arg(long, short)]
        category: Option<CategoryArg>,
    },
    /// List events from a date onwards (default today)
    Upcoming {
        #[arg(long)]
        from: Option<NaiveDate>,
    },
    /// Show an event with its ticket types
    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum TicketAction {
    /// Add a ticket type to an event
    Add {
        event_id: i64,
        label: String,
        price: Decimal,
        /// Initial stock
        quantity: i64,
    },
    /// List ticket types
    List {
        /// Only this event
        #[arg(long)]
        event: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum SaleAction {
    /// Sell tickets to a buyer
    Execute {
        buyer_id: i64,
        ticket_type_id: i64,
        quantity: i64,
    },
    /// Cancel a sale and restock its tickets
    Cancel { sale_id: i64 },
    /// List sales, newest first
    List {
        #[arg(long, conflicts_with = "event")]
        buyer: Option<i64>,
        #[arg(long)]
        event: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum StatsAction {
    /// Total revenue, tickets sold and average basket
    Summary,
    /// Revenue per event
    Events,
    /// Fill rate per event
    FillRates,
    /// Best-selling ticket types
    Tickets,
    /// Top buyers by total spent
    Buyers {
        #[arg(long, default_value_t = DEFAULT_TOP_BUYERS)]
        limit: i64,
    },
    /// Sales per category
    Categories,
    /// Sales per day
    Daily,
    /// Derived indicators
    Indicators,
    /// Events sold beyond capacity
    Integrity,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Concert,
    Conference,
    Show,
}

impl CategoryArg {
    pub fn to_core_type(&self) -> Category {
        match self {
            CategoryArg::Concert => Category::Concert,
            CategoryArg::Conference => Category::Conference,
            CategoryArg::Show => Category::Show,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
    Markdown,
}

impl FormatArg {
    pub fn to_report_format(&self) -> ticketdesk_reports::ReportFormat {
        match self {
            FormatArg::Csv => ticketdesk_reports::ReportFormat::Csv,
            FormatArg::Json => ticketdesk_reports::ReportFormat::Json,
            FormatArg::Markdown => ticketdesk_reports::ReportFormat::Markdown,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportKind {
    Revenue,
    FillRates,
    TopBuyers,
    Categories,
    Sales,
}

fn parse_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let out = Output::new(cli.json);

    match cli.command {
        Commands::Init { force } => {
            db::init_database(&cli.db, force).await?;
        }

        Commands::Seed { sales, seed, force } => {
            db::seed_database(&cli.db, sales, seed, force, &out).await?;
        }

        Commands::Status => {
            db::show_status(&cli.db).await?;
        }

        Commands::Buyer { action } => {
            buyer::handle(&cli.db, action, &out).await?;
        }

        Commands::Event { action } => {
            event::handle(&cli.db, action, &out).await?;
        }

        Commands::TicketType { action } => {
            ticket::handle(&cli.db, action, &out).await?;
        }

        Commands::Sale { action } => {
            sale::handle(&cli.db, action, &out).await?;
        }

        Commands::Stats { action } => {
            stats::handle(&cli.db, action, &out).await?;
        }

        Commands::Report {
            kind,
            format,
            output,
            limit,
        } => {
            report::generate(&cli.db, kind, format, output, limit).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sale_execute() {
        let cli = Cli::try_parse_from(["ticketdesk", "--db", "t.db", "sale", "execute", "1", "2", "3"])
            .unwrap();
        assert_eq!(cli.db, PathBuf::from("t.db"));
        match cli.command {
            Commands::Sale {
                action:
                    SaleAction::Execute {
                        buyer_id,
                        ticket_type_id,
                        quantity,
                    },
            } => assert_eq!((buyer_id, ticket_type_id, quantity), (1, 2, 3)),
            _ => panic!("expected sale execute"),
        }
    }

    #[test]
    fn test_parse_event_create() {
        let cli = Cli::try_parse_from([
            "ticketdesk",
            "event",
            "create",
            "Rock Night",
            "2026-11-20",
            "Town Hall",
            "500",
            "--category",
            "concert",
            "--time",
            "20:30",
        ])
        .unwrap();
        match cli.command {
            Commands::Event {
                action: EventAction::Create { date, time, category, .. },
            } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 11, 20).unwrap());
                assert_eq!(time, NaiveTime::from_hms_opt(20, 30, 0));
                assert_eq!(category.to_core_type(), Category::Concert);
            }
            _ => panic!("expected event create"),
        }
    }

    #[test]
    fn test_stats_buyers_default_limit() {
        let cli = Cli::try_parse_from(["ticketdesk", "stats", "buyers", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Stats {
                action: StatsAction::Buyers { limit },
            } => assert_eq!(limit, DEFAULT_TOP_BUYERS),
            _ => panic!("expected stats buyers"),
        }
    }

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(parse_time("09:00").unwrap(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert!(parse_time("9h").is_err());
    }
}
