//! Reporting operations - statistics and derived indicators
//!
//! ReportingService is read-only. Most methods pass statistics straight
//! through; `compute_advanced_indicators` combines several of them.

use crate::error::BusinessResult;
use crate::services::ServiceContext;
use chrono::Utc;
use rust_decimal::Decimal;
use ticketdesk_core::money::ratio;
use ticketdesk_core::stats::round_percent;
use ticketdesk_core::{
    AdvancedIndicators, CategorySales, CoreError, DailySales, EventFillRate, EventRevenue, RevenueSummary,
    TicketTypeRanking, TopBuyer,
};
use ticketdesk_persistence::StatsRepo;

/// Reporting Service - aggregate statistics
pub struct ReportingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Total revenue, tickets sold and average basket
    pub async fn revenue_summary(&self) -> BusinessResult<RevenueSummary> {
        let pool = self.ctx.pool();
        let total_revenue = StatsRepo::total_revenue(pool).await?;
        let total_quantity = StatsRepo::total_quantity_sold(pool).await?;

        Ok(RevenueSummary {
            total_revenue,
            total_quantity,
            average_basket: ratio(total_revenue, Decimal::from(total_quantity)),
        })
    }

    pub async fn revenue_by_event(&self) -> BusinessResult<Vec<EventRevenue>> {
        Ok(StatsRepo::revenue_by_event(self.ctx.pool()).await?)
    }

    pub async fn fill_rates(&self) -> BusinessResult<Vec<EventFillRate>> {
        Ok(StatsRepo::fill_rate_by_event(self.ctx.pool()).await?)
    }

    pub async fn best_selling_ticket_types(&self) -> BusinessResult<Vec<TicketTypeRanking>> {
        Ok(StatsRepo::best_selling_ticket_types(self.ctx.pool()).await?)
    }

    /// Top `limit` buyers by total spent. `limit` must be positive.
    pub async fn top_buyers(&self, limit: i64) -> BusinessResult<Vec<TopBuyer>> {
        if limit <= 0 {
            return Err(CoreError::not_positive("limit", limit).into());
        }
        Ok(StatsRepo::top_buyers(self.ctx.pool(), limit).await?)
    }

    pub async fn sales_by_category(&self) -> BusinessResult<Vec<CategorySales>> {
        Ok(StatsRepo::sales_by_category(self.ctx.pool()).await?)
    }

    pub async fn daily_sales(&self) -> BusinessResult<Vec<DailySales>> {
        Ok(StatsRepo::daily_sales(self.ctx.pool()).await?)
    }

    /// Events that sold more tickets than their capacity.
    ///
    /// Always empty when every sale went through the sales workflow and
    /// ticket stock was sized within capacity.
    pub async fn overfilled_events(&self) -> BusinessResult<Vec<EventFillRate>> {
        let rates = self.fill_rates().await?;
        Ok(rates.into_iter().filter(EventFillRate::is_overfilled).collect())
    }

    /// Snapshot of derived indicators. Performs no writes.
    pub async fn compute_advanced_indicators(&self) -> BusinessResult<AdvancedIndicators> {
        let summary = self.revenue_summary().await?;
        let per_event = self.revenue_by_event().await?;
        let fill_rates = self.fill_rates().await?;

        let average_revenue_per_event = if per_event.is_empty() {
            Decimal::ZERO
        } else {
            let sum: Decimal = per_event.iter().map(|e| e.revenue).sum();
            ratio(sum, Decimal::from(per_event.len() as i64))
        };

        let average_fill_rate = if fill_rates.is_empty() {
            0.0
        } else {
            let sum: f64 = fill_rates.iter().map(|r| r.fill_rate).sum();
            round_percent(sum / fill_rates.len() as f64)
        };

        let top = top_event(&per_event);

        Ok(AdvancedIndicators {
            total_revenue: summary.total_revenue,
            total_quantity: summary.total_quantity,
            average_ticket_price: summary.average_basket,
            average_revenue_per_event,
            average_fill_rate,
            top_event_id: top.map(|e| e.event_id),
            top_event: top.map(|e| e.event_name.clone()),
            computed_at: Utc::now(),
        })
    }
}

/// Highest revenue; ties go to the lowest event id
fn top_event(per_event: &[EventRevenue]) -> Option<&EventRevenue> {
    per_event
        .iter()
        .max_by(|a, b| a.revenue.cmp(&b.revenue).then(b.event_id.cmp(&a.event_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use ticketdesk_core::Category;
    use ticketdesk_persistence::Database;

    fn revenue(event_id: i64, amount: Decimal) -> EventRevenue {
        EventRevenue {
            event_id,
            event_name: format!("Event {event_id}"),
            event_date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            category: Category::Concert,
            revenue: amount,
            tickets_sold: 0,
        }
    }

    #[test]
    fn test_top_event_tie_goes_to_lowest_id() {
        let rows = vec![revenue(3, dec!(50)), revenue(1, dec!(50)), revenue(2, dec!(10))];
        assert_eq!(top_event(&rows).map(|e| e.event_id), Some(1));
        assert!(top_event(&[]).is_none());
    }

    #[tokio::test]
    async fn test_empty_database_indicators() {
        let db = Database::in_memory().await.unwrap();
        let ctx = ServiceContext::new(&db);
        let service = ReportingService::new(&ctx);

        let summary = service.revenue_summary().await.unwrap();
        assert_eq!(summary.total_revenue, Decimal::ZERO);
        assert_eq!(summary.total_quantity, 0);
        assert_eq!(summary.average_basket, Decimal::ZERO);

        let indicators = service.compute_advanced_indicators().await.unwrap();
        assert_eq!(indicators.average_revenue_per_event, Decimal::ZERO);
        assert_eq!(indicators.average_fill_rate, 0.0);
        assert_eq!(indicators.top_event, None);
        assert!(service.overfilled_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_top_buyers_rejects_non_positive_limit() {
        let db = Database::in_memory().await.unwrap();
        let ctx = ServiceContext::new(&db);
        let service = ReportingService::new(&ctx);

        for limit in [0, -1] {
            let err = service.top_buyers(limit).await.unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
            assert!(matches!(
                err,
                crate::BusinessError::Validation(CoreError::NotPositive { field: "limit", .. })
            ));
        }
        assert!(service.top_buyers(1).await.unwrap().is_empty());
    }
}
