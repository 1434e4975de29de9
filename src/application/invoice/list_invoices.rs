use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceFilter, InvoiceService, InvoiceStatus};

#[derive(Debug, Default, Deserialize)]
pub struct ListInvoicesCommand {
  pub status_filter: Option<String>,
  pub client_filter: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceListItemDto {
  pub id: Uuid,
  pub invoice_number: String,
  pub client_id: Uuid,
  pub period_start: NaiveDate,
  pub period_end: NaiveDate,
  pub total_hours: Decimal,
  pub hourly_rate: Decimal,
  pub total_amount: Decimal,
  pub currency: String,
  pub status: String,
  pub language: String,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  pub paid_date: Option<NaiveDate>,
  pub has_document: bool,
  pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceListItemDto {
  fn from(i: Invoice) -> Self {
    Self {
      id: i.id,
      invoice_number: i.number.into_inner(),
      client_id: i.client_id,
      period_start: i.period.start(),
      period_end: i.period.end(),
      total_hours: i.total_hours,
      hourly_rate: i.hourly_rate,
      total_amount: i.total_amount.amount,
      currency: i.total_amount.currency.as_str().to_string(),
      status: i.status.as_str().to_string(),
      language: i.language.code().to_string(),
      issue_date: i.issue_date,
      due_date: i.due_date,
      paid_date: i.paid_date,
      has_document: i.document_path.is_some(),
      created_at: i.created_at,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceListItemDto>,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: ListInvoicesCommand,
  ) -> Result<ListInvoicesResponse, InvoiceError> {
    let status_filter = if let Some(status_str) = command.status_filter {
      Some(InvoiceStatus::from_str(&status_str)?)
    } else {
      None
    };

    let invoices = self
      .invoice_service
      .list_invoices(InvoiceFilter {
        status: status_filter,
        client_id: command.client_filter,
      })
      .await?;

    Ok(ListInvoicesResponse {
      invoices: invoices.into_iter().map(InvoiceListItemDto::from).collect(),
    })
  }
}
