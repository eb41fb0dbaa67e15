//! # TicketDesk Business
//!
//! Business logic layer: the sales workflow, reporting, buyer and event
//! management, and demo data.
//!
//! ```rust,ignore
//! use ticketdesk_business::{SalesService, ServiceContext};
//!
//! let ctx = ServiceContext::new(&db);
//! let receipt = SalesService::new(&ctx).execute_sale(buyer_id, ticket_id, 3).await?;
//! ```

pub mod buyers;
pub mod error;
pub mod events;
pub mod reporting;
pub mod sales;
pub mod seed;
pub mod services;

pub use buyers::BuyerService;
pub use error::{BusinessError, BusinessResult, ErrorKind};
pub use events::EventService;
pub use reporting::ReportingService;
pub use sales::SalesService;
pub use seed::{seed, SeedSummary, DEFAULT_SALES};
pub use services::{CancellationReceipt, ReplyError, SaleReceipt, ServiceContext, ServiceReply};
