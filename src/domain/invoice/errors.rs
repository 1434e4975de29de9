use super::value_objects::{InvoiceStatus, ValueObjectError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Client not found: {0}")]
  ClientNotFound(Uuid),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("Invalid date range: {0}")]
  InvalidRange(String),

  #[error("Invoice number conflict: {0}")]
  NumberingConflict(String),

  #[error("Invalid status transition from {from} to {to}")]
  InvalidStatusTransition {
    from: InvoiceStatus,
    to: InvoiceStatus,
  },

  #[error("A paid date is required when marking an invoice as paid")]
  PaidDateRequired,

  #[error("Document error: {0}")]
  Document(String),

  #[error("Storage error: {0}")]
  Storage(String),
}

impl From<sqlx::Error> for InvoiceError {
  fn from(error: sqlx::Error) -> Self {
    InvoiceError::Storage(error.to_string())
  }
}
