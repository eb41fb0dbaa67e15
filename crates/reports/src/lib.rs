//! # TicketDesk Reports
//!
//! Report generation - CSV, JSON, Markdown exports of sales statistics.
//!
//! ## Exporters
//!
//! - [`CsvExporter`] - CSV format with proper escaping
//! - [`JsonExporter`] - JSON format (pretty or compact)
//! - [`MarkdownExporter`] - Markdown tables with an optional summary
//!
//! ## Reports
//!
//! - [`EventRevenueReport`] - revenue and tickets sold per event
//! - [`FillRateReport`] - share of capacity sold per event
//! - [`TopBuyersReport`] - best customers by total spent
//! - [`CategoryReport`] - sales per event category
//! - [`SalesLedgerReport`] - every sale with its details
//!
//! ## Example
//!
//! ```rust,ignore
//! use ticketdesk_reports::{EventRevenueReport, ReportExporter, ReportFormat};
//!
//! let report = EventRevenueReport::new(reporting.revenue_by_event().await?);
//! let output = ReportFormat::Markdown.exporter().export(&report);
//! ```

pub mod exporters;
pub mod statistics;

pub use exporters::{
    CsvExporter, JsonExporter, MarkdownExporter, ReportData, ReportExporter, ReportFormat,
};
pub use statistics::{
    CategoryReport, EventRevenueReport, FillRateReport, SalesLedgerReport, TopBuyersReport,
};
