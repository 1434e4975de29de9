use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::client::ports::ClientRepository;

use super::entities::{TimeEntry, TimeEntryWithClient};
use super::errors::TimeEntryError;
use super::ports::{TimeEntryFilter, TimeEntryRepository};
use super::value_objects::{EntryTitle, TimeEntryStatus, TimeSpan, ValueObjectError};

pub struct TimeEntryService {
  entry_repo: Arc<dyn TimeEntryRepository>,
  client_repo: Arc<dyn ClientRepository>,
}

impl TimeEntryService {
  pub fn new(
    entry_repo: Arc<dyn TimeEntryRepository>,
    client_repo: Arc<dyn ClientRepository>,
  ) -> Self {
    Self {
      entry_repo,
      client_repo,
    }
  }

  /// Without an explicit status, entries that already ended are logged as
  /// completed and future ones as scheduled.
  pub async fn create_entry(
    &self,
    client_id: Uuid,
    title: EntryTitle,
    span: TimeSpan,
    status: Option<TimeEntryStatus>,
  ) -> Result<TimeEntry, TimeEntryError> {
    self.verify_client_exists(client_id).await?;

    let status = match status {
      Some(TimeEntryStatus::Cancelled) => {
        return Err(TimeEntryError::Validation(ValueObjectError::InvalidStatus(
          "Entries cannot be created as cancelled".to_string(),
        )));
      }
      Some(status) => status,
      None if span.end() <= Utc::now() => TimeEntryStatus::Completed,
      None => TimeEntryStatus::Scheduled,
    };

    let entry = TimeEntry::new(client_id, title, span, status);
    let created = self.entry_repo.create(entry).await?;

    tracing::info!(
      "Created time entry {} for client {} ({})",
      created.id,
      client_id,
      created.status
    );
    Ok(created)
  }

  pub async fn update_entry(
    &self,
    entry_id: Uuid,
    title: EntryTitle,
    span: TimeSpan,
  ) -> Result<TimeEntry, TimeEntryError> {
    let mut entry = self.get_entry(entry_id).await?;
    entry.update(title, span);
    self.entry_repo.update(entry).await
  }

  pub async fn change_status(
    &self,
    entry_id: Uuid,
    new_status: TimeEntryStatus,
  ) -> Result<TimeEntry, TimeEntryError> {
    let mut entry = self.get_entry(entry_id).await?;
    entry.change_status(new_status)?;

    let updated = self.entry_repo.update(entry).await?;
    tracing::info!("Time entry {} is now {}", entry_id, updated.status);
    Ok(updated)
  }

  pub async fn get_entry(&self, entry_id: Uuid) -> Result<TimeEntry, TimeEntryError> {
    self
      .entry_repo
      .find_by_id(entry_id)
      .await?
      .ok_or(TimeEntryError::NotFound(entry_id))
  }

  pub async fn list_entries(
    &self,
    filter: TimeEntryFilter,
  ) -> Result<Vec<TimeEntryWithClient>, TimeEntryError> {
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
      if start > end {
        return Err(TimeEntryError::InvalidRange(format!(
          "start date {} is after end date {}",
          start, end
        )));
      }
    }

    let entries = self.entry_repo.find_with_clients(&filter).await?;
    tracing::debug!("Found {} time entries for {:?}", entries.len(), filter);
    Ok(entries)
  }

  pub async fn delete_entry(&self, entry_id: Uuid) -> Result<(), TimeEntryError> {
    self.get_entry(entry_id).await?;
    self.entry_repo.delete(entry_id).await?;
    tracing::info!("Deleted time entry {}", entry_id);
    Ok(())
  }

  async fn verify_client_exists(&self, client_id: Uuid) -> Result<(), TimeEntryError> {
    let client = self
      .client_repo
      .find_by_id(client_id)
      .await
      .map_err(|e| TimeEntryError::Storage(e.to_string()))?;

    if client.is_none() {
      tracing::warn!("Time entry refers to unknown client {}", client_id);
      return Err(TimeEntryError::ClientNotFound(client_id));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::client::{Client, ClientName, ContactInfo, HourlyRate};
  use crate::infrastructure::persistence::sqlite::{
    SqliteClientRepository, SqliteTimeEntryRepository, test_support::setup_test_db,
  };
  use chrono::{Duration, NaiveDate, NaiveTime};
  use rust_decimal_macros::dec;

  struct Fixture {
    service: TimeEntryService,
    client: Client,
  }

  async fn fixture() -> Fixture {
    let pool = setup_test_db().await;
    let client_repo = Arc::new(SqliteClientRepository::new(pool.clone()));
    let client = client_repo
      .create(Client::new(
        ClientName::new("Studio Nord".to_string()).unwrap(),
        ContactInfo::new("Hauptstr. 1".to_string(), None).unwrap(),
        HourlyRate::new(dec!(31.50)).unwrap(),
      ))
      .await
      .unwrap();

    let service = TimeEntryService::new(
      Arc::new(SqliteTimeEntryRepository::new(pool)),
      client_repo,
    );
    Fixture { service, client }
  }

  fn title(value: &str) -> EntryTitle {
    EntryTitle::new(value.to_string()).unwrap()
  }

  fn span_on(day: u32, start_hour: u32, end_hour: u32) -> TimeSpan {
    TimeSpan::from_date_and_times(
      NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
      NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
      NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
    )
    .unwrap()
  }

  #[tokio::test]
  async fn test_default_status_depends_on_end_time() {
    let f = fixture().await;

    let past = f
      .service
      .create_entry(f.client.id, title("Yoga"), span_on(2, 9, 10), None)
      .await
      .unwrap();
    assert_eq!(past.status, TimeEntryStatus::Completed);

    let start = Utc::now() + Duration::days(2);
    let future_span = TimeSpan::new(start, start + Duration::hours(1)).unwrap();
    let future = f
      .service
      .create_entry(f.client.id, title("Yoga"), future_span, None)
      .await
      .unwrap();
    assert_eq!(future.status, TimeEntryStatus::Scheduled);
  }

  #[tokio::test]
  async fn test_create_rejects_unknown_client_and_cancelled_status() {
    let f = fixture().await;

    let err = f
      .service
      .create_entry(Uuid::new_v4(), title("Yoga"), span_on(2, 9, 10), None)
      .await
      .unwrap_err();
    assert!(matches!(err, TimeEntryError::ClientNotFound(_)));

    let err = f
      .service
      .create_entry(
        f.client.id,
        title("Yoga"),
        span_on(2, 9, 10),
        Some(TimeEntryStatus::Cancelled),
      )
      .await
      .unwrap_err();
    assert!(matches!(err, TimeEntryError::Validation(_)));
  }

  #[tokio::test]
  async fn test_status_change_is_persisted() {
    let f = fixture().await;
    let entry = f
      .service
      .create_entry(
        f.client.id,
        title("Yoga"),
        span_on(2, 9, 10),
        Some(TimeEntryStatus::Scheduled),
      )
      .await
      .unwrap();

    f.service
      .change_status(entry.id, TimeEntryStatus::Cancelled)
      .await
      .unwrap();
    let reloaded = f.service.get_entry(entry.id).await.unwrap();
    assert_eq!(reloaded.status, TimeEntryStatus::Cancelled);

    let err = f
      .service
      .change_status(entry.id, TimeEntryStatus::Completed)
      .await
      .unwrap_err();
    assert!(matches!(err, TimeEntryError::InvalidStatusTransition { .. }));
  }

  #[tokio::test]
  async fn test_list_filters_by_inclusive_day_range() {
    let f = fixture().await;
    for day in [1, 2, 3, 4] {
      f.service
        .create_entry(f.client.id, title("Yoga"), span_on(day, 18, 20), None)
        .await
        .unwrap();
    }

    let listed = f
      .service
      .list_entries(TimeEntryFilter {
        client_id: Some(f.client.id),
        start_date: NaiveDate::from_ymd_opt(2026, 3, 2),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 3),
        status: None,
      })
      .await
      .unwrap();

    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|e| e.client_name == "Studio Nord"));
    assert!(listed.iter().all(|e| e.duration_minutes == 120));
  }

  #[tokio::test]
  async fn test_list_rejects_inverted_range() {
    let f = fixture().await;
    let err = f
      .service
      .list_entries(TimeEntryFilter {
        start_date: NaiveDate::from_ymd_opt(2026, 3, 5),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 1),
        ..Default::default()
      })
      .await
      .unwrap_err();
    assert!(matches!(err, TimeEntryError::InvalidRange(_)));
  }

  #[tokio::test]
  async fn test_delete_entry() {
    let f = fixture().await;
    let entry = f
      .service
      .create_entry(f.client.id, title("Yoga"), span_on(2, 9, 10), None)
      .await
      .unwrap();

    f.service.delete_entry(entry.id).await.unwrap();
    assert!(matches!(
      f.service.delete_entry(entry.id).await,
      Err(TimeEntryError::NotFound(_))
    ));
  }
}
