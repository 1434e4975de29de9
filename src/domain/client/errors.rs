use super::value_objects::ValueObjectError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Client not found: {0}")]
  NotFound(Uuid),

  #[error("Client name '{0}' already exists")]
  NameAlreadyExists(String),

  #[error("Cannot delete client with {0} associated time entries")]
  HasTimeEntries(i64),

  #[error("Cannot delete client that has been invoiced")]
  HasInvoices,

  #[error("Storage error: {0}")]
  Storage(String),
}

impl From<sqlx::Error> for ClientError {
  fn from(error: sqlx::Error) -> Self {
    ClientError::Storage(error.to_string())
  }
}
