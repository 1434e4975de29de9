use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::domain::profile::{UserProfile, errors::ProfileError, ports::ProfileRepository};

#[derive(Debug, FromRow)]
struct ProfileRow {
  name: String,
  address: String,
  tax_id: Option<String>,
  bank_details: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for UserProfile {
  fn from(row: ProfileRow) -> Self {
    UserProfile {
      name: row.name,
      address: row.address,
      tax_id: row.tax_id,
      bank_details: row.bank_details,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

pub struct SqliteProfileRepository {
  pool: SqlitePool,
}

impl SqliteProfileRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
  async fn find(&self) -> Result<Option<UserProfile>, ProfileError> {
    let row = sqlx::query_as::<_, ProfileRow>(
      r#"
            SELECT name, address, tax_id, bank_details, created_at, updated_at
            FROM user_profile
            WHERE id = 1
            "#,
    )
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn save(&self, profile: UserProfile) -> Result<UserProfile, ProfileError> {
    let row = sqlx::query_as::<_, ProfileRow>(
      r#"
            INSERT INTO user_profile (id, name, address, tax_id, bank_details, created_at, updated_at)
            VALUES (1, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                address = excluded.address,
                tax_id = excluded.tax_id,
                bank_details = excluded.bank_details,
                updated_at = excluded.updated_at
            RETURNING name, address, tax_id, bank_details, created_at, updated_at
            "#,
    )
    .bind(&profile.name)
    .bind(&profile.address)
    .bind(&profile.tax_id)
    .bind(&profile.bank_details)
    .bind(profile.created_at)
    .bind(profile.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }
}
