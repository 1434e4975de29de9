use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use super::parse_decimal;
use crate::domain::client::{
  Client, ClientName, ContactInfo, HourlyRate, errors::ClientError, ports::ClientRepository,
};

#[derive(Debug, FromRow)]
struct ClientRow {
  id: Uuid,
  name: String,
  address: String,
  contact_person: Option<String>,
  hourly_rate: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
  type Error = ClientError;

  fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
    let rate = parse_decimal("clients.hourly_rate", &row.hourly_rate).map_err(ClientError::Storage)?;

    Ok(Client {
      id: row.id,
      name: ClientName::new(row.name)?,
      contact: ContactInfo::new(row.address, row.contact_person)?,
      hourly_rate: HourlyRate::new(rate)?,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

fn map_write_error(error: sqlx::Error, name: &ClientName) -> ClientError {
  match error {
    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
      ClientError::NameAlreadyExists(name.value().to_string())
    }
    e => e.into(),
  }
}

pub struct SqliteClientRepository {
  pool: SqlitePool,
}

impl SqliteClientRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ClientRepository for SqliteClientRepository {
  async fn create(&self, client: Client) -> Result<Client, ClientError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            INSERT INTO clients (id, name, address, contact_person, hourly_rate, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, name, address, contact_person, hourly_rate, created_at, updated_at
            "#,
    )
    .bind(client.id)
    .bind(client.name.value())
    .bind(&client.contact.address)
    .bind(&client.contact.contact_person)
    .bind(client.hourly_rate.value().to_string())
    .bind(client.created_at)
    .bind(client.updated_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| map_write_error(e, &client.name))?;

    row.try_into()
  }

  async fn update(&self, client: Client) -> Result<Client, ClientError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            UPDATE clients
            SET name = ?, address = ?, contact_person = ?, hourly_rate = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, name, address, contact_person, hourly_rate, created_at, updated_at
            "#,
    )
    .bind(client.name.value())
    .bind(&client.contact.address)
    .bind(&client.contact.contact_person)
    .bind(client.hourly_rate.value().to_string())
    .bind(client.updated_at)
    .bind(client.id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| map_write_error(e, &client.name))?;

    row.ok_or(ClientError::NotFound(client.id))?.try_into()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, ClientError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            SELECT id, name, address, contact_person, hourly_rate, created_at, updated_at
            FROM clients
            WHERE id = ?
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_all(&self) -> Result<Vec<Client>, ClientError> {
    let rows = sqlx::query_as::<_, ClientRow>(
      r#"
            SELECT id, name, address, contact_person, hourly_rate, created_at, updated_at
            FROM clients
            ORDER BY name ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn exists_by_name(
    &self,
    name: &str,
    exclude_id: Option<Uuid>,
  ) -> Result<bool, ClientError> {
    let count = if let Some(exclude_id) = exclude_id {
      sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients WHERE name = ? AND id != ?")
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?
    } else {
      sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients WHERE name = ?")
        .bind(name)
        .fetch_one(&self.pool)
        .await?
    };

    Ok(count > 0)
  }

  async fn count_time_entries(&self, id: Uuid) -> Result<i64, ClientError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM time_entries WHERE client_id = ?")
      .bind(id)
      .fetch_one(&self.pool)
      .await?;

    Ok(count)
  }

  async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
    let result = sqlx::query("DELETE FROM clients WHERE id = ?")
      .bind(id)
      .execute(&self.pool)
      .await;

    match result {
      Ok(done) if done.rows_affected() == 0 => Err(ClientError::NotFound(id)),
      Ok(_) => Ok(()),
      Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
        Err(ClientError::HasInvoices)
      }
      Err(e) => Err(e.into()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::sqlite::test_support::setup_test_db;
  use rust_decimal_macros::dec;

  fn client(name: &str) -> Client {
    Client::new(
      ClientName::new(name.to_string()).unwrap(),
      ContactInfo::new("Hauptstr. 1\n20095 Hamburg".to_string(), Some("Eva".to_string())).unwrap(),
      HourlyRate::new(dec!(31.50)).unwrap(),
    )
  }

  #[tokio::test]
  async fn test_create_and_find() {
    let repo = SqliteClientRepository::new(setup_test_db().await);
    let created = repo.create(client("Studio Nord")).await.unwrap();

    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.name.value(), "Studio Nord");
    assert_eq!(found.hourly_rate.value(), dec!(31.50));
    assert_eq!(found.contact.contact_person.as_deref(), Some("Eva"));
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_unique_name_enforced_by_storage() {
    let repo = SqliteClientRepository::new(setup_test_db().await);
    repo.create(client("Studio Nord")).await.unwrap();

    let err = repo.create(client("Studio Nord")).await.unwrap_err();
    assert!(matches!(err, ClientError::NameAlreadyExists(_)));
  }

  #[tokio::test]
  async fn test_exists_by_name_excludes_self() {
    let repo = SqliteClientRepository::new(setup_test_db().await);
    let created = repo.create(client("Studio Nord")).await.unwrap();

    assert!(repo.exists_by_name("Studio Nord", None).await.unwrap());
    assert!(
      !repo
        .exists_by_name("Studio Nord", Some(created.id))
        .await
        .unwrap()
    );
  }

  #[tokio::test]
  async fn test_find_all_sorted_by_name() {
    let repo = SqliteClientRepository::new(setup_test_db().await);
    repo.create(client("Zumba Hall")).await.unwrap();
    repo.create(client("Aerial Loft")).await.unwrap();

    let names: Vec<String> = repo
      .find_all()
      .await
      .unwrap()
      .into_iter()
      .map(|c| c.name.into_inner())
      .collect();
    assert_eq!(names, vec!["Aerial Loft", "Zumba Hall"]);
  }

  #[tokio::test]
  async fn test_delete_unknown_client() {
    let repo = SqliteClientRepository::new(setup_test_db().await);
    assert!(matches!(
      repo.delete(Uuid::new_v4()).await,
      Err(ClientError::NotFound(_))
    ));
  }
}
