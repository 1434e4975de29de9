use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Invoice, InvoiceDocument, InvoiceLineItem, RenderedDocument};
use super::errors::InvoiceError;
use super::value_objects::InvoiceStatus;

#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
  pub status: Option<InvoiceStatus>,
  pub client_id: Option<Uuid>,
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Stores the invoice and its line items atomically. A duplicate number
  /// fails with `NumberingConflict`.
  async fn create(
    &self,
    invoice: Invoice,
    line_items: Vec<InvoiceLineItem>,
  ) -> Result<(Invoice, Vec<InvoiceLineItem>), InvoiceError>;
  async fn update(&self, invoice: Invoice) -> Result<Invoice, InvoiceError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError>;
  /// Newest first.
  async fn find_all(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, InvoiceError>;
  async fn find_line_items(&self, invoice_id: Uuid) -> Result<Vec<InvoiceLineItem>, InvoiceError>;
  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError>;
}

/// Durable per-scope counter. Values are strictly increasing and never
/// handed out twice, even across processes.
#[async_trait]
pub trait InvoiceNumberSequence: Send + Sync {
  async fn next_value(&self, scope: &str) -> Result<i64, InvoiceError>;
}

#[async_trait]
pub trait DocumentRenderer: Send + Sync {
  async fn render(&self, document: InvoiceDocument<'_>) -> Result<RenderedDocument, InvoiceError>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
  /// Returns the location to keep on the invoice.
  async fn store(&self, name: &str, document: &RenderedDocument) -> Result<String, InvoiceError>;
  async fn load(&self, location: &str) -> Result<Vec<u8>, InvoiceError>;
  async fn remove(&self, location: &str) -> Result<(), InvoiceError>;
}
