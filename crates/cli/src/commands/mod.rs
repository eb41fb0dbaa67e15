//! Subcommand handlers. Each opens the database, calls the service layer and
//! closes the connection before returning.

pub mod buyer;
pub mod event;
pub mod report;
pub mod sale;
pub mod stats;
pub mod ticket;
