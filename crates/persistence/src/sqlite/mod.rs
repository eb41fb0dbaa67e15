//! SQLite persistence module
//!
//! Repository pattern for SQLite database access.

pub mod repos;
pub mod schema;
pub mod stats;

pub use repos::{BuyerRepo, EventRepo, SaleRepo, TicketTypeRepo};
pub use schema::{SCHEMA_SQL, TABLES};
pub use stats::StatsRepo;
