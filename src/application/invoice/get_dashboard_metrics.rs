use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::invoice::{DashboardMetrics, DashboardPeriod, InvoiceError, InvoiceService};

#[derive(Debug, Default, Deserialize)]
pub struct GetDashboardMetricsCommand {
  /// `month`, `quarter` or `year`; defaults to `month`
  pub period: Option<String>,
  pub year: Option<i32>,
  pub month: Option<u32>,
}

pub struct GetDashboardMetricsUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetDashboardMetricsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: GetDashboardMetricsCommand,
  ) -> Result<DashboardMetrics, InvoiceError> {
    let period = DashboardPeriod::parse(
      command.period.as_deref().unwrap_or("month"),
      command.year.unwrap_or_else(|| Utc::now().year()),
      command.month,
    )?;

    self.invoice_service.dashboard_metrics(period).await
  }
}
