//! Report export command

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use ticketdesk_business::{ReportingService, SalesService, ServiceContext};
use ticketdesk_reports::{
    CategoryReport, EventRevenueReport, FillRateReport, ReportData, SalesLedgerReport,
    TopBuyersReport,
};

use crate::db;
use crate::{FormatArg, ReportKind};

/// Render a report to stdout or a file
pub async fn generate(
    db_path: &Path,
    kind: ReportKind,
    format: FormatArg,
    output: Option<PathBuf>,
    limit: i64,
) -> Result<()> {
    let db = db::connect(db_path).await?;
    let ctx = ServiceContext::new(&db);
    let report = build(&ctx, kind, limit).await;
    db.close().await;
    let report = report?;

    let exporter = format.to_report_format().exporter();
    let rendered = exporter.export(report.as_ref());

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!(
                "✅ {} written to {} ({})",
                report.title(),
                path.display(),
                exporter.mime_type()
            );
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

async fn build(ctx: &ServiceContext, kind: ReportKind, limit: i64) -> Result<Box<dyn ReportData>> {
    let reporting = ReportingService::new(ctx);
    let report: Box<dyn ReportData> = match kind {
        ReportKind::Revenue => Box::new(EventRevenueReport::new(reporting.revenue_by_event().await?)),
        ReportKind::FillRates => Box::new(FillRateReport::new(reporting.fill_rates().await?)),
        ReportKind::TopBuyers => Box::new(TopBuyersReport::new(reporting.top_buyers(limit).await?)),
        ReportKind::Categories => Box::new(CategoryReport::new(reporting.sales_by_category().await?)),
        ReportKind::Sales => Box::new(SalesLedgerReport::new(
            SalesService::new(ctx).list_sales().await?,
        )),
    };
    Ok(report)
}
