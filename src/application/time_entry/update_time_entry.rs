use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::time_entry::{EntryTitle, TimeEntryError, TimeEntryService};

use super::create_time_entry::EntryTiming;
use super::get_time_entry::TimeEntryDto;

#[derive(Debug, Deserialize)]
pub struct UpdateTimeEntryCommand {
  pub entry_id: Uuid,
  pub title: String,
  pub timing: EntryTiming,
}

pub struct UpdateTimeEntryUseCase {
  time_entry_service: Arc<TimeEntryService>,
}

impl UpdateTimeEntryUseCase {
  pub fn new(time_entry_service: Arc<TimeEntryService>) -> Self {
    Self { time_entry_service }
  }

  pub async fn execute(
    &self,
    command: UpdateTimeEntryCommand,
  ) -> Result<TimeEntryDto, TimeEntryError> {
    let title = EntryTitle::new(command.title)?;
    let span = command.timing.into_span()?;

    let entry = self
      .time_entry_service
      .update_entry(command.entry_id, title, span)
      .await?;

    Ok(entry.into())
  }
}
