use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::client::ClientDto;
use crate::domain::invoice::{InvoiceError, InvoiceLineItem, InvoiceService};

use super::list_invoices::InvoiceListItemDto;

#[derive(Debug, Deserialize)]
pub struct GetInvoiceDetailsCommand {
  pub invoice_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLineItemDto {
  pub id: Uuid,
  pub time_entry_id: Uuid,
  pub title: String,
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
  pub duration_seconds: i64,
  pub duration_hours: Decimal,
  pub amount: Decimal,
  pub line_order: i32,
}

impl From<InvoiceLineItem> for InvoiceLineItemDto {
  fn from(item: InvoiceLineItem) -> Self {
    let duration_hours = item.duration_hours();
    Self {
      id: item.id,
      time_entry_id: item.time_entry_id,
      title: item.title,
      start: item.start,
      end: item.end,
      duration_hours,
      duration_seconds: item.duration_seconds,
      amount: item.amount,
      line_order: item.sort_order,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct InvoiceDetailsResponse {
  #[serde(flatten)]
  pub invoice: InvoiceListItemDto,
  pub client: ClientDto,
  pub line_items: Vec<InvoiceLineItemDto>,
}

pub struct GetInvoiceDetailsUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceDetailsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: GetInvoiceDetailsCommand,
  ) -> Result<InvoiceDetailsResponse, InvoiceError> {
    let (invoice, line_items, client) = self
      .invoice_service
      .get_invoice_with_details(command.invoice_id)
      .await?;

    Ok(InvoiceDetailsResponse {
      invoice: invoice.into(),
      client: client.into(),
      line_items: line_items.into_iter().map(InvoiceLineItemDto::from).collect(),
    })
  }
}
