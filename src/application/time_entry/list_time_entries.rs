use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::time_entry::{
  TimeEntryError, TimeEntryFilter, TimeEntryService, TimeEntryStatus,
};

use super::get_time_entry::TimeEntryDto;

#[derive(Debug, Default, Deserialize)]
pub struct ListTimeEntriesCommand {
  pub client_id: Option<Uuid>,
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
  pub status_filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TimeEntryListItemDto {
  #[serde(flatten)]
  pub entry: TimeEntryDto,
  pub client_name: String,
}

#[derive(Debug, Serialize)]
pub struct ListTimeEntriesResponse {
  pub entries: Vec<TimeEntryListItemDto>,
}

pub struct ListTimeEntriesUseCase {
  time_entry_service: Arc<TimeEntryService>,
}

impl ListTimeEntriesUseCase {
  pub fn new(time_entry_service: Arc<TimeEntryService>) -> Self {
    Self { time_entry_service }
  }

  pub async fn execute(
    &self,
    command: ListTimeEntriesCommand,
  ) -> Result<ListTimeEntriesResponse, TimeEntryError> {
    let status = if let Some(status_str) = command.status_filter {
      Some(TimeEntryStatus::from_str(&status_str)?)
    } else {
      None
    };

    let entries = self
      .time_entry_service
      .list_entries(TimeEntryFilter {
        client_id: command.client_id,
        start_date: command.start_date,
        end_date: command.end_date,
        status,
      })
      .await?;

    let entries = entries
      .into_iter()
      .map(|e| TimeEntryListItemDto {
        entry: e.entry.into(),
        client_name: e.client_name,
      })
      .collect();

    Ok(ListTimeEntriesResponse { entries })
  }
}
