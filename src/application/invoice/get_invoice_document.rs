use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceError, InvoiceService};

#[derive(Debug, Deserialize)]
pub struct GetInvoiceDocumentCommand {
  pub invoice_id: Uuid,
}

#[derive(Debug)]
pub struct InvoiceDocumentResponse {
  pub file_name: String,
  pub content_type: &'static str,
  pub bytes: Vec<u8>,
}

pub struct GetInvoiceDocumentUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceDocumentUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: GetInvoiceDocumentCommand,
  ) -> Result<InvoiceDocumentResponse, InvoiceError> {
    let (invoice, format, bytes) = self
      .invoice_service
      .get_invoice_document(command.invoice_id)
      .await?;

    Ok(InvoiceDocumentResponse {
      file_name: format!("invoice-{}.{}", invoice.number, format.extension()),
      content_type: format.content_type(),
      bytes,
    })
  }
}
