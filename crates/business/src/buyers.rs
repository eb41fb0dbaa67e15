//! Buyer operations - register, list, lookup
//!
//! BuyerService validates and normalises buyer records before they reach
//! storage and guards email uniqueness.

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use ticketdesk_core::{Buyer, NewBuyer};
use ticketdesk_persistence::BuyerRepo;
use tracing::info;

/// Buyer Service - handles buyer registration and lookup
pub struct BuyerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BuyerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new buyer.
    ///
    /// Fails with `Validation` on missing names or a malformed email and with
    /// `Conflict` when the (normalised) email is already taken.
    pub async fn register(&self, buyer: NewBuyer) -> BusinessResult<Buyer> {
        let buyer = buyer.validated()?;
        let pool = self.ctx.pool();

        if BuyerRepo::get_by_email(pool, &buyer.email).await?.is_some() {
            return Err(email_taken(&buyer.email));
        }

        let id = match BuyerRepo::insert(pool, &buyer).await {
            Ok(id) => id,
            Err(err) if err.is_unique_violation() => return Err(email_taken(&buyer.email)),
            Err(err) => return Err(err.into()),
        };
        info!(buyer_id = id, email = %buyer.email, "buyer registered");

        self.get(id).await
    }

    /// All buyers, ordered by name
    pub async fn list(&self) -> BusinessResult<Vec<Buyer>> {
        Ok(BuyerRepo::list(self.ctx.pool()).await?)
    }

    /// Buyer by id
    pub async fn get(&self, id: i64) -> BusinessResult<Buyer> {
        BuyerRepo::get_by_id(self.ctx.pool(), id)
            .await?
            .ok_or_else(|| BusinessError::not_found("Buyer", id))
    }

    /// Number of registered buyers
    pub async fn count(&self) -> BusinessResult<i64> {
        Ok(BuyerRepo::count(self.ctx.pool()).await?)
    }
}

fn email_taken(email: &str) -> BusinessError {
    BusinessError::conflict(format!("email already registered: {email}"))
}
