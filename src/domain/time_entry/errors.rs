use super::value_objects::{TimeEntryStatus, ValueObjectError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TimeEntryError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Time entry not found: {0}")]
  NotFound(Uuid),

  #[error("Client not found: {0}")]
  ClientNotFound(Uuid),

  #[error("Invalid status transition from {from} to {to}")]
  InvalidStatusTransition {
    from: TimeEntryStatus,
    to: TimeEntryStatus,
  },

  #[error("Invalid date range: {0}")]
  InvalidRange(String),

  #[error("Storage error: {0}")]
  Storage(String),
}

impl From<sqlx::Error> for TimeEntryError {
  fn from(error: sqlx::Error) -> Self {
    TimeEntryError::Storage(error.to_string())
  }
}
