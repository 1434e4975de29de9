use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::entities::{TimeEntry, TimeEntryWithClient};
use super::errors::TimeEntryError;
use super::value_objects::TimeEntryStatus;

/// Listing filter; dates are inclusive whole days
#[derive(Debug, Clone, Default)]
pub struct TimeEntryFilter {
  pub client_id: Option<Uuid>,
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
  pub status: Option<TimeEntryStatus>,
}

#[async_trait]
pub trait TimeEntryRepository: Send + Sync {
  async fn create(&self, entry: TimeEntry) -> Result<TimeEntry, TimeEntryError>;
  async fn update(&self, entry: TimeEntry) -> Result<TimeEntry, TimeEntryError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<TimeEntry>, TimeEntryError>;
  async fn find_with_clients(
    &self,
    filter: &TimeEntryFilter,
  ) -> Result<Vec<TimeEntryWithClient>, TimeEntryError>;
  /// Entries of one client starting in `[from, until)`, any status.
  async fn find_by_client_starting_between(
    &self,
    client_id: Uuid,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
  ) -> Result<Vec<TimeEntry>, TimeEntryError>;
  async fn delete(&self, id: Uuid) -> Result<(), TimeEntryError>;
}
