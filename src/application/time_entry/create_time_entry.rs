use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::time_entry::{
  EntryTitle, TimeEntryError, TimeEntryService, TimeEntryStatus, TimeSpan,
};

use super::get_time_entry::TimeEntryDto;

/// Either explicit UTC timestamps or a calendar day with wall-clock times.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EntryTiming {
  Timestamps {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  },
  WallClock {
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
  },
}

impl EntryTiming {
  pub fn into_span(self) -> Result<TimeSpan, TimeEntryError> {
    let span = match self {
      EntryTiming::Timestamps { start, end } => TimeSpan::new(start, end)?,
      EntryTiming::WallClock {
        date,
        start_time,
        end_time,
      } => TimeSpan::from_date_and_times(date, start_time, end_time)?,
    };
    Ok(span)
  }
}

#[derive(Debug, Deserialize)]
pub struct CreateTimeEntryCommand {
  pub client_id: Uuid,
  pub title: String,
  pub timing: EntryTiming,
  pub status: Option<String>,
}

pub struct CreateTimeEntryUseCase {
  time_entry_service: Arc<TimeEntryService>,
}

impl CreateTimeEntryUseCase {
  pub fn new(time_entry_service: Arc<TimeEntryService>) -> Self {
    Self { time_entry_service }
  }

  pub async fn execute(
    &self,
    command: CreateTimeEntryCommand,
  ) -> Result<TimeEntryDto, TimeEntryError> {
    let title = EntryTitle::new(command.title)?;
    let span = command.timing.into_span()?;
    let status = command
      .status
      .as_deref()
      .map(TimeEntryStatus::from_str)
      .transpose()?;

    let entry = self
      .time_entry_service
      .create_entry(command.client_id, title, span, status)
      .await?;

    Ok(entry.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_timing_deserializes_both_shapes() {
    let wall: EntryTiming = serde_json::from_str(
      r#"{"date":"2026-03-02","start_time":"23:00:00","end_time":"01:30:00"}"#,
    )
    .unwrap();
    let span = wall.into_span().unwrap();
    assert_eq!(span.duration_hours(), dec!(2.5));

    let stamps: EntryTiming = serde_json::from_str(
      r#"{"start":"2026-03-02T18:00:00Z","end":"2026-03-02T19:15:00Z"}"#,
    )
    .unwrap();
    assert_eq!(stamps.into_span().unwrap().duration_minutes(), 75);
  }

  #[test]
  fn test_timing_rejects_inverted_timestamps() {
    let stamps: EntryTiming = serde_json::from_str(
      r#"{"start":"2026-03-02T19:00:00Z","end":"2026-03-02T18:00:00Z"}"#,
    )
    .unwrap();
    assert!(matches!(
      stamps.into_span(),
      Err(TimeEntryError::Validation(_))
    ));
  }
}
