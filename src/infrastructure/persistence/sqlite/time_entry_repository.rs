use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveTime, TimeZone, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::time_entry::{
  EntryTitle, TimeEntry, TimeEntryStatus, TimeEntryWithClient, TimeSpan,
  errors::TimeEntryError,
  ports::{TimeEntryFilter, TimeEntryRepository},
};

const ENTRY_COLUMNS: &str = "t.id, t.client_id, t.title, t.start_at, t.end_at, t.status, t.created_at, t.updated_at";

#[derive(Debug, FromRow)]
struct TimeEntryRow {
  id: Uuid,
  client_id: Uuid,
  title: String,
  start_at: DateTime<Utc>,
  end_at: DateTime<Utc>,
  status: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct TimeEntryWithClientRow {
  #[sqlx(flatten)]
  entry: TimeEntryRow,
  client_name: String,
}

impl TryFrom<TimeEntryRow> for TimeEntry {
  type Error = TimeEntryError;

  fn try_from(row: TimeEntryRow) -> Result<Self, Self::Error> {
    Ok(TimeEntry {
      id: row.id,
      client_id: row.client_id,
      title: EntryTitle::new(row.title)?,
      span: TimeSpan::new(row.start_at, row.end_at)?,
      status: TimeEntryStatus::from_str(&row.status)?,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

impl TryFrom<TimeEntryWithClientRow> for TimeEntryWithClient {
  type Error = TimeEntryError;

  fn try_from(row: TimeEntryWithClientRow) -> Result<Self, Self::Error> {
    let entry: TimeEntry = row.entry.try_into()?;
    let duration_minutes = entry.span.duration_minutes();
    Ok(TimeEntryWithClient {
      entry,
      client_name: row.client_name,
      duration_minutes,
    })
  }
}

fn start_of_day(date: chrono::NaiveDate) -> DateTime<Utc> {
  Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

pub struct SqliteTimeEntryRepository {
  pool: SqlitePool,
}

impl SqliteTimeEntryRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl TimeEntryRepository for SqliteTimeEntryRepository {
  async fn create(&self, entry: TimeEntry) -> Result<TimeEntry, TimeEntryError> {
    let result = sqlx::query(
      r#"
            INSERT INTO time_entries (id, client_id, title, start_at, end_at, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
    )
    .bind(entry.id)
    .bind(entry.client_id)
    .bind(entry.title.value())
    .bind(entry.start())
    .bind(entry.end())
    .bind(entry.status.as_str())
    .bind(entry.created_at)
    .bind(entry.updated_at)
    .execute(&self.pool)
    .await;

    match result {
      Ok(_) => Ok(entry),
      Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
        Err(TimeEntryError::ClientNotFound(entry.client_id))
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn update(&self, entry: TimeEntry) -> Result<TimeEntry, TimeEntryError> {
    let result = sqlx::query(
      r#"
            UPDATE time_entries
            SET title = ?, start_at = ?, end_at = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
    )
    .bind(entry.title.value())
    .bind(entry.start())
    .bind(entry.end())
    .bind(entry.status.as_str())
    .bind(entry.updated_at)
    .bind(entry.id)
    .execute(&self.pool)
    .await?;

    if result.rows_affected() == 0 {
      return Err(TimeEntryError::NotFound(entry.id));
    }
    Ok(entry)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<TimeEntry>, TimeEntryError> {
    let row = sqlx::query_as::<_, TimeEntryRow>(&format!(
      "SELECT {} FROM time_entries t WHERE t.id = ?",
      ENTRY_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_with_clients(
    &self,
    filter: &TimeEntryFilter,
  ) -> Result<Vec<TimeEntryWithClient>, TimeEntryError> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
      "SELECT {}, c.name AS client_name FROM time_entries t JOIN clients c ON c.id = t.client_id WHERE 1 = 1",
      ENTRY_COLUMNS
    ));

    if let Some(client_id) = filter.client_id {
      query.push(" AND t.client_id = ").push_bind(client_id);
    }
    if let Some(start_date) = filter.start_date {
      query
        .push(" AND t.start_at >= ")
        .push_bind(start_of_day(start_date));
    }
    if let Some(end_date) = filter.end_date {
      let next_day = end_date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| TimeEntryError::InvalidRange(format!("end date {} is out of range", end_date)))?;
      query
        .push(" AND t.start_at < ")
        .push_bind(start_of_day(next_day));
    }
    if let Some(status) = filter.status {
      query.push(" AND t.status = ").push_bind(status.as_str());
    }
    query.push(" ORDER BY t.start_at DESC, t.id ASC");

    let rows = query
      .build_query_as::<TimeEntryWithClientRow>()
      .fetch_all(&self.pool)
      .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn find_by_client_starting_between(
    &self,
    client_id: Uuid,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
  ) -> Result<Vec<TimeEntry>, TimeEntryError> {
    let rows = sqlx::query_as::<_, TimeEntryRow>(&format!(
      "SELECT {} FROM time_entries t WHERE t.client_id = ? AND t.start_at >= ? AND t.start_at < ?",
      ENTRY_COLUMNS
    ))
    .bind(client_id)
    .bind(from)
    .bind(until)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn delete(&self, id: Uuid) -> Result<(), TimeEntryError> {
    let result = sqlx::query("DELETE FROM time_entries WHERE id = ?")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(TimeEntryError::NotFound(id));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::client::{Client, ClientName, ContactInfo, HourlyRate, ports::ClientRepository};
  use crate::infrastructure::persistence::sqlite::{
    SqliteClientRepository, test_support::setup_test_db,
  };
  use chrono::{Duration, NaiveDate};
  use rust_decimal_macros::dec;

  async fn setup() -> (SqliteTimeEntryRepository, Uuid) {
    let pool = setup_test_db().await;
    let client = SqliteClientRepository::new(pool.clone())
      .create(Client::new(
        ClientName::new("Studio Nord".to_string()).unwrap(),
        ContactInfo::new(String::new(), None).unwrap(),
        HourlyRate::new(dec!(30)).unwrap(),
      ))
      .await
      .unwrap();
    (SqliteTimeEntryRepository::new(pool), client.id)
  }

  fn entry(client_id: Uuid, start: DateTime<Utc>, status: TimeEntryStatus) -> TimeEntry {
    TimeEntry::new(
      client_id,
      EntryTitle::new("Pilates".to_string()).unwrap(),
      TimeSpan::new(start, start + Duration::minutes(90)).unwrap(),
      status,
    )
  }

  #[tokio::test]
  async fn test_create_round_trips_all_fields() {
    let (repo, client_id) = setup().await;
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 18, 0, 0).unwrap();
    let created = repo
      .create(entry(client_id, start, TimeEntryStatus::Scheduled))
      .await
      .unwrap();

    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.start(), start);
    assert_eq!(found.duration_hours(), dec!(1.5));
    assert_eq!(found.status, TimeEntryStatus::Scheduled);
  }

  #[tokio::test]
  async fn test_create_for_unknown_client() {
    let (repo, _) = setup().await;
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 18, 0, 0).unwrap();
    let err = repo
      .create(entry(Uuid::new_v4(), start, TimeEntryStatus::Completed))
      .await
      .unwrap_err();
    assert!(matches!(err, TimeEntryError::ClientNotFound(_)));
  }

  #[tokio::test]
  async fn test_starting_between_is_half_open() {
    let (repo, client_id) = setup().await;
    let from = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
    let until = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();

    for start in [from - Duration::seconds(1), from, until - Duration::seconds(1), until] {
      repo
        .create(entry(client_id, start, TimeEntryStatus::Completed))
        .await
        .unwrap();
    }

    let found = repo
      .find_by_client_starting_between(client_id, from, until)
      .await
      .unwrap();
    assert_eq!(found.len(), 2);
  }

  #[tokio::test]
  async fn test_find_with_clients_status_filter() {
    let (repo, client_id) = setup().await;
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 18, 0, 0).unwrap();
    repo
      .create(entry(client_id, start, TimeEntryStatus::Completed))
      .await
      .unwrap();
    repo
      .create(entry(client_id, start + Duration::days(1), TimeEntryStatus::Scheduled))
      .await
      .unwrap();

    let completed = repo
      .find_with_clients(&TimeEntryFilter {
        status: Some(TimeEntryStatus::Completed),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 31),
        ..Default::default()
      })
      .await
      .unwrap();

    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].client_name, "Studio Nord");
    assert_eq!(completed[0].duration_minutes, 90);
  }

  #[tokio::test]
  async fn test_update_and_delete() {
    let (repo, client_id) = setup().await;
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 18, 0, 0).unwrap();
    let mut created = repo
      .create(entry(client_id, start, TimeEntryStatus::Scheduled))
      .await
      .unwrap();

    created.change_status(TimeEntryStatus::Completed).unwrap();
    repo.update(created.clone()).await.unwrap();
    assert_eq!(
      repo.find_by_id(created.id).await.unwrap().unwrap().status,
      TimeEntryStatus::Completed
    );

    repo.delete(created.id).await.unwrap();
    assert!(matches!(
      repo.delete(created.id).await,
      Err(TimeEntryError::NotFound(_))
    ));
  }
}
