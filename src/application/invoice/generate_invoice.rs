use chrono::NaiveDate;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoiceService, Language};

use super::get_invoice_details::{
  GetInvoiceDetailsCommand, GetInvoiceDetailsUseCase, InvoiceDetailsResponse,
};

#[derive(Debug, Deserialize)]
pub struct GenerateInvoiceCommand {
  pub client_id: Uuid,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  pub language: Option<String>,
}

/// Aggregates, numbers, renders and persists an invoice in one go.
pub struct GenerateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
  get_details: GetInvoiceDetailsUseCase,
}

impl GenerateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self {
      get_details: GetInvoiceDetailsUseCase::new(invoice_service.clone()),
      invoice_service,
    }
  }

  pub async fn execute(
    &self,
    command: GenerateInvoiceCommand,
  ) -> Result<InvoiceDetailsResponse, InvoiceError> {
    let language = command
      .language
      .as_deref()
      .map(Language::from_str)
      .transpose()?
      .unwrap_or_default();

    let draft = self
      .invoice_service
      .generate_invoice(command.client_id, command.start_date, command.end_date, language)
      .await?;
    let (invoice, _) = self.invoice_service.issue_invoice(draft).await?;

    self
      .get_details
      .execute(GetInvoiceDetailsCommand {
        invoice_id: invoice.id,
      })
      .await
  }
}
