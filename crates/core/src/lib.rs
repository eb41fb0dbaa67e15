//! # TicketDesk Core
//!
//! Domain records for local event ticketing: buyers, events, ticket types,
//! sales and the statistics derived from them. No I/O lives here.

pub mod buyer;
pub mod error;
pub mod event;
pub mod money;
pub mod sale;
pub mod stats;
pub mod ticket;

pub use buyer::{Buyer, NewBuyer};
pub use error::{CoreError, CoreResult};
pub use event::{Category, Event, NewEvent};
pub use sale::{NewSale, Sale, SaleDetail};
pub use stats::{
    AdvancedIndicators, CategorySales, DailySales, EventFillRate, EventRevenue, RevenueSummary,
    TicketTypeRanking, TopBuyer, DEFAULT_TOP_BUYERS,
};
pub use ticket::{NewTicketType, TicketType};
