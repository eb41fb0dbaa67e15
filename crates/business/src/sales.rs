//! Sales operations - execute and cancel
//!
//! SalesService owns the stock-consistency workflow. A sale inserts its row
//! and decrements stock in one transaction; a cancellation restocks and
//! deletes in one transaction. A rejected operation leaves no trace.

use crate::error::{BusinessError, BusinessResult};
use crate::services::{CancellationReceipt, SaleReceipt, ServiceContext};
use chrono::Utc;
use sqlx::{Sqlite, Transaction};
use ticketdesk_core::{CoreError, NewSale, SaleDetail};
use ticketdesk_persistence::{BuyerRepo, EventRepo, SaleRepo, TicketTypeRepo};
use tracing::{info, warn};

/// Sales Service - handles ticket sales and cancellations
pub struct SalesService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SalesService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sell `quantity` units of a ticket type to a buyer.
    ///
    /// The total is frozen at `price × quantity` when the sale is recorded.
    pub async fn execute_sale(
        &self,
        buyer_id: i64,
        ticket_type_id: i64,
        quantity: i64,
    ) -> BusinessResult<SaleReceipt> {
        if quantity <= 0 {
            warn!(buyer_id, ticket_type_id, quantity, "sale rejected: quantity must be positive");
            return Err(CoreError::not_positive("quantity", quantity).into());
        }

        let mut tx = self.ctx.begin().await?;

        let buyer = BuyerRepo::get_by_id(&mut *tx, buyer_id).await?;
        let Some(buyer) = buyer else {
            return reject(tx, BusinessError::not_found("Buyer", buyer_id)).await;
        };
        let ticket = TicketTypeRepo::get_by_id(&mut *tx, ticket_type_id).await?;
        let Some(ticket) = ticket else {
            return reject(tx, BusinessError::not_found("TicketType", ticket_type_id)).await;
        };

        if !ticket.can_supply(quantity) {
            warn!(
                buyer_id,
                ticket_type_id,
                requested = quantity,
                available = ticket.available_quantity,
                "sale rejected: insufficient stock"
            );
            let err = BusinessError::insufficient_stock(quantity, ticket.available_quantity);
            return reject(tx, err).await;
        }

        let total_amount = match ticket.total_for(quantity) {
            Ok(total) => total,
            Err(err) => {
                warn!(
                    ticket_type_id,
                    quantity,
                    price = %ticket.price,
                    "sale rejected: total out of range"
                );
                return reject(tx, err.into()).await;
            }
        };
        let sale = NewSale {
            buyer_id,
            ticket_type_id,
            quantity,
            total_amount,
            sold_at: Utc::now(),
        };
        let sale_id = SaleRepo::insert(&mut *tx, &sale).await?;

        if !TicketTypeRepo::decrement_stock(&mut *tx, ticket_type_id, quantity).await? {
            let err = BusinessError::insufficient_stock(quantity, ticket.available_quantity);
            return reject(tx, err).await;
        }

        tx.commit().await?;

        let remaining_stock = ticket.available_quantity - quantity;
        info!(
            sale_id,
            buyer = %buyer.email,
            ticket = %ticket.label,
            quantity,
            total = %total_amount,
            remaining_stock,
            "sale executed"
        );

        Ok(SaleReceipt {
            sale_id,
            total_amount,
            quantity,
            remaining_stock,
        })
    }

    /// Cancel a sale, returning its units to stock.
    ///
    /// The recorded total is discarded with the sale; only the quantity is
    /// restored. Cancelling twice fails with `NotFound`.
    pub async fn cancel_sale(&self, sale_id: i64) -> BusinessResult<CancellationReceipt> {
        let mut tx = self.ctx.begin().await?;

        let sale = SaleRepo::get_by_id(&mut *tx, sale_id).await?;
        let Some(sale) = sale else {
            warn!(sale_id, "cancellation rejected: unknown sale");
            return reject(tx, BusinessError::not_found("Sale", sale_id)).await;
        };

        if !TicketTypeRepo::restock(&mut *tx, sale.ticket_type_id, sale.quantity).await? {
            let err = BusinessError::not_found("TicketType", sale.ticket_type_id);
            return reject(tx, err).await;
        }
        SaleRepo::delete(&mut *tx, sale_id).await?;

        let ticket = TicketTypeRepo::get_by_id(&mut *tx, sale.ticket_type_id).await?;
        let Some(ticket) = ticket else {
            let err = BusinessError::not_found("TicketType", sale.ticket_type_id);
            return reject(tx, err).await;
        };
        let available_quantity = ticket.available_quantity;

        tx.commit().await?;
        info!(
            sale_id,
            ticket_type_id = sale.ticket_type_id,
            restored = sale.quantity,
            available_quantity,
            "sale cancelled"
        );

        Ok(CancellationReceipt {
            sale_id,
            ticket_type_id: sale.ticket_type_id,
            restored_quantity: sale.quantity,
            available_quantity,
        })
    }

    /// Every sale with buyer, ticket and event details, newest first
    pub async fn list_sales(&self) -> BusinessResult<Vec<SaleDetail>> {
        Ok(SaleRepo::list_details(self.ctx.pool()).await?)
    }

    /// Purchase history of one buyer
    pub async fn sales_for_buyer(&self, buyer_id: i64) -> BusinessResult<Vec<SaleDetail>> {
        let pool = self.ctx.pool();
        if BuyerRepo::get_by_id(pool, buyer_id).await?.is_none() {
            return Err(BusinessError::not_found("Buyer", buyer_id));
        }
        Ok(SaleRepo::list_by_buyer(pool, buyer_id).await?)
    }

    /// Sales across all ticket types of one event
    pub async fn sales_for_event(&self, event_id: i64) -> BusinessResult<Vec<SaleDetail>> {
        let pool = self.ctx.pool();
        if EventRepo::get_by_id(pool, event_id).await?.is_none() {
            return Err(BusinessError::not_found("Event", event_id));
        }
        Ok(SaleRepo::list_by_event(pool, event_id).await?)
    }
}

/// Roll back and surface the rejection
async fn reject<T>(tx: Transaction<'static, Sqlite>, err: BusinessError) -> BusinessResult<T> {
    tx.rollback().await?;
    Err(err)
}
