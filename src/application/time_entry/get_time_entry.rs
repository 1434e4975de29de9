use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::time_entry::{TimeEntry, TimeEntryError, TimeEntryService};

#[derive(Debug, Deserialize)]
pub struct GetTimeEntryCommand {
  pub entry_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeEntryDto {
  pub id: Uuid,
  pub client_id: Uuid,
  pub title: String,
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
  pub duration_minutes: i64,
  pub duration_hours: Decimal,
  pub status: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<TimeEntry> for TimeEntryDto {
  fn from(entry: TimeEntry) -> Self {
    Self {
      id: entry.id,
      client_id: entry.client_id,
      duration_minutes: entry.span.duration_minutes(),
      duration_hours: entry.duration_hours(),
      start: entry.start(),
      end: entry.end(),
      status: entry.status.as_str().to_string(),
      title: entry.title.into_inner(),
      created_at: entry.created_at,
      updated_at: entry.updated_at,
    }
  }
}

pub struct GetTimeEntryUseCase {
  time_entry_service: Arc<TimeEntryService>,
}

impl GetTimeEntryUseCase {
  pub fn new(time_entry_service: Arc<TimeEntryService>) -> Self {
    Self { time_entry_service }
  }

  pub async fn execute(&self, command: GetTimeEntryCommand) -> Result<TimeEntryDto, TimeEntryError> {
    let entry = self.time_entry_service.get_entry(command.entry_id).await?;
    Ok(entry.into())
  }
}
