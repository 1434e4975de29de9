use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::time_entry::{TimeEntryError, TimeEntryService};

#[derive(Debug, Deserialize)]
pub struct DeleteTimeEntryCommand {
  pub entry_id: Uuid,
}

pub struct DeleteTimeEntryUseCase {
  time_entry_service: Arc<TimeEntryService>,
}

impl DeleteTimeEntryUseCase {
  pub fn new(time_entry_service: Arc<TimeEntryService>) -> Self {
    Self { time_entry_service }
  }

  pub async fn execute(&self, command: DeleteTimeEntryCommand) -> Result<(), TimeEntryError> {
    self.time_entry_service.delete_entry(command.entry_id).await
  }
}
