//! Sales statistics reports
//!
//! Each report wraps rows returned by the reporting service and renders them
//! through [`ReportData`].

use crate::exporters::ReportData;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use ticketdesk_core::money::{format_amount, ratio};
use ticketdesk_core::stats::round_percent;
use ticketdesk_core::{CategorySales, EventFillRate, EventRevenue, SaleDetail, TopBuyer};

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|h| h.to_string()).collect()
}

fn entry(key: &str, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

fn percent(value: f64) -> String {
    format!("{:.2}", value)
}

// ============================================================================
// Revenue by event
// ============================================================================

/// Revenue and tickets sold per event
#[derive(Debug, Clone)]
pub struct EventRevenueReport {
    pub title: String,
    pub events: Vec<EventRevenue>,
    pub generated_at: DateTime<Utc>,
}

impl EventRevenueReport {
    pub fn new(events: Vec<EventRevenue>) -> Self {
        Self {
            title: "Revenue by Event".to_string(),
            events,
            generated_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn total_revenue(&self) -> Decimal {
        self.events.iter().map(|e| e.revenue).sum()
    }
}

impl ReportData for EventRevenueReport {
    fn title(&self) -> &str {
        &self.title
    }

    fn headers(&self) -> Vec<String> {
        headers(&["Event ID", "Event", "Date", "Category", "Tickets Sold", "Revenue"])
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.events
            .iter()
            .map(|e| {
                vec![
                    e.event_id.to_string(),
                    e.event_name.clone(),
                    e.event_date.to_string(),
                    e.category.to_string(),
                    e.tickets_sold.to_string(),
                    format_amount(e.revenue),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        let tickets: i64 = self.events.iter().map(|e| e.tickets_sold).sum();
        vec![
            entry("Events", self.events.len()),
            entry("Tickets Sold", tickets),
            entry("Total Revenue", format_amount(self.total_revenue())),
            entry("Generated At", self.generated_at.to_rfc3339()),
        ]
    }
}

// ============================================================================
// Fill rates
// ============================================================================

/// Share of capacity sold per event
#[derive(Debug, Clone)]
pub struct FillRateReport {
    pub title: String,
    pub events: Vec<EventFillRate>,
    pub generated_at: DateTime<Utc>,
}

impl FillRateReport {
    pub fn new(events: Vec<EventFillRate>) -> Self {
        Self {
            title: "Fill Rate by Event".to_string(),
            events,
            generated_at: Utc::now(),
        }
    }

    pub fn average_fill_rate(&self) -> f64 {
        if self.events.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.events.iter().map(|e| e.fill_rate).sum();
        round_percent(sum / self.events.len() as f64)
    }
}

impl ReportData for FillRateReport {
    fn title(&self) -> &str {
        &self.title
    }

    fn headers(&self) -> Vec<String> {
        headers(&["Event ID", "Event", "Capacity", "Tickets Sold", "Fill Rate (%)"])
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.events
            .iter()
            .map(|e| {
                vec![
                    e.event_id.to_string(),
                    e.event_name.clone(),
                    e.capacity.to_string(),
                    e.tickets_sold.to_string(),
                    percent(e.fill_rate),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        let overfilled = self.events.iter().filter(|e| e.is_overfilled()).count();
        vec![
            entry("Events", self.events.len()),
            entry("Average Fill Rate (%)", percent(self.average_fill_rate())),
            entry("Overfilled Events", overfilled),
            entry("Generated At", self.generated_at.to_rfc3339()),
        ]
    }
}

// ============================================================================
// Top buyers
// ============================================================================

/// Buyers ranked by total spent
#[derive(Debug, Clone)]
pub struct TopBuyersReport {
    pub title: String,
    pub buyers: Vec<TopBuyer>,
    pub generated_at: DateTime<Utc>,
}

impl TopBuyersReport {
    pub fn new(buyers: Vec<TopBuyer>) -> Self {
        Self {
            title: format!("Top {} Buyers", buyers.len()),
            buyers,
            generated_at: Utc::now(),
        }
    }
}

impl ReportData for TopBuyersReport {
    fn title(&self) -> &str {
        &self.title
    }

    fn headers(&self) -> Vec<String> {
        headers(&["Rank", "Buyer", "Email", "Purchases", "Tickets", "Total Spent"])
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.buyers
            .iter()
            .enumerate()
            .map(|(i, b)| {
                vec![
                    (i + 1).to_string(),
                    b.buyer_name.clone(),
                    b.email.clone(),
                    b.purchase_count.to_string(),
                    b.tickets_bought.to_string(),
                    format_amount(b.total_spent),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        let spent: Decimal = self.buyers.iter().map(|b| b.total_spent).sum();
        vec![
            entry("Buyers", self.buyers.len()),
            entry("Combined Spend", format_amount(spent)),
            entry("Generated At", self.generated_at.to_rfc3339()),
        ]
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Sales per event category with revenue share
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub title: String,
    pub categories: Vec<CategorySales>,
    pub generated_at: DateTime<Utc>,
}

impl CategoryReport {
    pub fn new(categories: Vec<CategorySales>) -> Self {
        Self {
            title: "Sales by Category".to_string(),
            categories,
            generated_at: Utc::now(),
        }
    }

    fn total_revenue(&self) -> Decimal {
        self.categories.iter().map(|c| c.revenue).sum()
    }
}

impl ReportData for CategoryReport {
    fn title(&self) -> &str {
        &self.title
    }

    fn headers(&self) -> Vec<String> {
        headers(&["Category", "Events", "Tickets Sold", "Revenue", "Share (%)"])
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let total = self.total_revenue();
        self.categories
            .iter()
            .map(|c| {
                vec![
                    c.category.to_string(),
                    c.event_count.to_string(),
                    c.tickets_sold.to_string(),
                    format_amount(c.revenue),
                    format_amount(ratio(c.revenue * Decimal::ONE_HUNDRED, total)),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        vec![
            entry("Categories", self.categories.len()),
            entry("Total Revenue", format_amount(self.total_revenue())),
            entry("Generated At", self.generated_at.to_rfc3339()),
        ]
    }
}

// ============================================================================
// Sales ledger
// ============================================================================

/// Every recorded sale with buyer and event details
#[derive(Debug, Clone)]
pub struct SalesLedgerReport {
    pub title: String,
    pub sales: Vec<SaleDetail>,
    pub generated_at: DateTime<Utc>,
}

impl SalesLedgerReport {
    pub fn new(sales: Vec<SaleDetail>) -> Self {
        Self {
            title: "Sales Ledger".to_string(),
            sales,
            generated_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }
}

impl ReportData for SalesLedgerReport {
    fn title(&self) -> &str {
        &self.title
    }

    fn headers(&self) -> Vec<String> {
        headers(&[
            "Sale ID",
            "Sold At",
            "Buyer",
            "Email",
            "Event",
            "Ticket",
            "Unit Price",
            "Quantity",
            "Total",
        ])
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.sales
            .iter()
            .map(|s| {
                vec![
                    s.sale_id.to_string(),
                    s.sold_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    s.buyer_name.clone(),
                    s.buyer_email.clone(),
                    s.event_name.clone(),
                    s.ticket_label.clone(),
                    format_amount(s.unit_price),
                    s.quantity.to_string(),
                    format_amount(s.total_amount),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        let tickets: i64 = self.sales.iter().map(|s| s.quantity).sum();
        let revenue: Decimal = self.sales.iter().map(|s| s.total_amount).sum();
        vec![
            entry("Sales", self.sales.len()),
            entry("Tickets", tickets),
            entry("Revenue", format_amount(revenue)),
            entry("Generated At", self.generated_at.to_rfc3339()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporters::{CsvExporter, MarkdownExporter, ReportExporter};
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal_macros::dec;
    use ticketdesk_core::Category;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, 20).unwrap()
    }

    #[test]
    fn test_event_revenue_report() {
        let report = EventRevenueReport::new(vec![
            EventRevenue {
                event_id: 2,
                event_name: "Tech Summit".to_string(),
                event_date: day(),
                category: Category::Conference,
                revenue: dec!(175),
                tickets_sold: 5,
            },
            EventRevenue {
                event_id: 1,
                event_name: "Rock Night".to_string(),
                event_date: day(),
                category: Category::Concert,
                revenue: dec!(0),
                tickets_sold: 0,
            },
        ])
        .with_title("Q4 Revenue");

        let output = CsvExporter::new().export(&report);
        assert!(output.contains("2,Tech Summit,2026-11-20,conference,5,175.00"));
        assert!(output.contains("1,Rock Night,2026-11-20,concert,0,0.00"));
        assert_eq!(report.total_revenue(), dec!(175));
        assert!(report
            .summary()
            .contains(&("Total Revenue".to_string(), "175.00".to_string())));
    }

    #[test]
    fn test_fill_rate_report() {
        let report = FillRateReport::new(vec![
            EventFillRate {
                event_id: 1,
                event_name: "Stand-up".to_string(),
                capacity: 10,
                tickets_sold: 12,
                fill_rate: 120.0,
            },
            EventFillRate {
                event_id: 2,
                event_name: "Circus".to_string(),
                capacity: 400,
                tickets_sold: 10,
                fill_rate: 2.5,
            },
        ]);

        assert_eq!(report.average_fill_rate(), 61.25);
        let summary = report.summary();
        assert!(summary.contains(&("Overfilled Events".to_string(), "1".to_string())));
        assert_eq!(report.rows()[1][4], "2.50");
    }

    #[test]
    fn test_top_buyers_report() {
        let report = TopBuyersReport::new(vec![TopBuyer {
            buyer_id: 4,
            buyer_name: "Petit Lucas".to_string(),
            email: "lucas.petit@email.com".to_string(),
            purchase_count: 3,
            tickets_bought: 7,
            total_spent: dec!(215.5),
        }]);

        assert_eq!(report.title(), "Top 1 Buyers");
        let output = MarkdownExporter::new().export(&report);
        assert!(output.contains("| 1 | Petit Lucas | lucas.petit@email.com | 3 | 7 | 215.50 |"));
    }

    #[test]
    fn test_category_share() {
        let report = CategoryReport::new(vec![
            CategorySales {
                category: Category::Concert,
                event_count: 3,
                tickets_sold: 30,
                revenue: dec!(750),
            },
            CategorySales {
                category: Category::Show,
                event_count: 3,
                tickets_sold: 10,
                revenue: dec!(250),
            },
        ]);
        let rows = report.rows();
        assert_eq!(rows[0][4], "75.00");
        assert_eq!(rows[1][4], "25.00");

        let empty = CategoryReport::new(vec![CategorySales {
            category: Category::Conference,
            event_count: 1,
            tickets_sold: 0,
            revenue: Decimal::ZERO,
        }]);
        assert_eq!(empty.rows()[0][4], "0.00");
    }

    #[test]
    fn test_sales_ledger_report() {
        let report = SalesLedgerReport::new(vec![SaleDetail {
            sale_id: 9,
            sold_at: Utc.with_ymd_and_hms(2026, 10, 16, 14, 30, 0).unwrap(),
            quantity: 3,
            total_amount: dec!(60),
            buyer_id: 1,
            buyer_name: "Dupont Marie".to_string(),
            buyer_email: "a@x.com".to_string(),
            ticket_type_id: 1,
            ticket_label: "Standard".to_string(),
            unit_price: dec!(20),
            event_id: 1,
            event_name: "Rock Night".to_string(),
            event_date: day(),
            category: Category::Concert,
        }]);

        let output = CsvExporter::new().without_header().export(&report);
        assert_eq!(
            output,
            "9,2026-10-16 14:30:00,Dupont Marie,a@x.com,Rock Night,Standard,20.00,3,60.00\n"
        );
        assert!(report
            .summary()
            .contains(&("Revenue".to_string(), "60.00".to_string())));
    }
}
