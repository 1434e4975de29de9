use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::time_entry::{TimeEntryError, TimeEntryService, TimeEntryStatus};

use super::get_time_entry::TimeEntryDto;

#[derive(Debug, Deserialize)]
pub struct ChangeTimeEntryStatusCommand {
  pub entry_id: Uuid,
  pub new_status: String,
}

pub struct ChangeTimeEntryStatusUseCase {
  time_entry_service: Arc<TimeEntryService>,
}

impl ChangeTimeEntryStatusUseCase {
  pub fn new(time_entry_service: Arc<TimeEntryService>) -> Self {
    Self { time_entry_service }
  }

  pub async fn execute(
    &self,
    command: ChangeTimeEntryStatusCommand,
  ) -> Result<TimeEntryDto, TimeEntryError> {
    let new_status = TimeEntryStatus::from_str(&command.new_status)?;

    let entry = self
      .time_entry_service
      .change_status(command.entry_id, new_status)
      .await?;

    Ok(entry.into())
  }
}
