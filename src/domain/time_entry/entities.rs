use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::TimeEntryError;
use super::value_objects::{EntryTitle, TimeEntryStatus, TimeSpan};

// Time Entry - one logged session/class for a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
  pub id: Uuid,
  pub client_id: Uuid,
  pub title: EntryTitle,
  pub span: TimeSpan,
  pub status: TimeEntryStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl TimeEntry {
  pub fn new(client_id: Uuid, title: EntryTitle, span: TimeSpan, status: TimeEntryStatus) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      client_id,
      title,
      span,
      status,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn update(&mut self, title: EntryTitle, span: TimeSpan) {
    self.title = title;
    self.span = span;
    self.updated_at = Utc::now();
  }

  pub fn change_status(&mut self, new_status: TimeEntryStatus) -> Result<(), TimeEntryError> {
    if !self.status.can_transition_to(new_status) {
      return Err(TimeEntryError::InvalidStatusTransition {
        from: self.status,
        to: new_status,
      });
    }

    self.status = new_status;
    self.updated_at = Utc::now();
    Ok(())
  }

  pub fn is_billable(&self) -> bool {
    self.status.is_billable()
  }

  pub fn start(&self) -> DateTime<Utc> {
    self.span.start()
  }

  pub fn end(&self) -> DateTime<Utc> {
    self.span.end()
  }

  pub fn duration_seconds(&self) -> i64 {
    self.span.duration_seconds()
  }

  pub fn duration_hours(&self) -> Decimal {
    self.span.duration_hours()
  }
}

// List row: entry plus the client name and minutes shown in listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntryWithClient {
  pub entry: TimeEntry,
  pub client_name: String,
  pub duration_minutes: i64,
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn entry(status: TimeEntryStatus) -> TimeEntry {
    let span = TimeSpan::new(
      Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
      Utc.with_ymd_and_hms(2026, 3, 2, 10, 30, 0).unwrap(),
    )
    .unwrap();
    TimeEntry::new(
      Uuid::new_v4(),
      EntryTitle::new("Pilates".to_string()).unwrap(),
      span,
      status,
    )
  }

  #[test]
  fn test_complete_scheduled_entry() {
    let mut entry = entry(TimeEntryStatus::Scheduled);
    assert!(!entry.is_billable());
    entry.change_status(TimeEntryStatus::Completed).unwrap();
    assert!(entry.is_billable());
  }

  #[test]
  fn test_cancelled_entry_cannot_be_completed() {
    let mut entry = entry(TimeEntryStatus::Scheduled);
    entry.change_status(TimeEntryStatus::Cancelled).unwrap();

    let err = entry
      .change_status(TimeEntryStatus::Completed)
      .unwrap_err();
    assert!(matches!(
      err,
      TimeEntryError::InvalidStatusTransition {
        from: TimeEntryStatus::Cancelled,
        to: TimeEntryStatus::Completed
      }
    ));
    assert_eq!(entry.status, TimeEntryStatus::Cancelled);
  }

  #[test]
  fn test_duration_hours() {
    assert_eq!(
      entry(TimeEntryStatus::Completed).duration_hours(),
      rust_decimal_macros::dec!(1.5)
    );
  }
}
