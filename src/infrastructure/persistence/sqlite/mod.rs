pub mod client_repository;
pub mod invoice_repository;
pub mod invoice_sequence;
pub mod profile_repository;
pub mod time_entry_repository;

pub use client_repository::SqliteClientRepository;
pub use invoice_repository::SqliteInvoiceRepository;
pub use invoice_sequence::SqliteInvoiceNumberSequence;
pub use profile_repository::SqliteProfileRepository;
pub use time_entry_repository::SqliteTimeEntryRepository;

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Opens the pool, creating the database file and its directory on first
/// start.
pub async fn connect(
  database_url: &str,
  max_connections: u32,
  acquire_timeout: Duration,
) -> Result<SqlitePool, sqlx::Error> {
  let options = SqliteConnectOptions::from_str(database_url)?
    .create_if_missing(true)
    .journal_mode(SqliteJournalMode::Wal)
    .foreign_keys(true);

  let filename = options.get_filename();
  if let Some(parent) = filename.parent().filter(|p| !p.as_os_str().is_empty()) {
    tokio::fs::create_dir_all(parent).await?;
    tracing::debug!("Database directory ready at {}", parent.display());
  }

  SqlitePoolOptions::new()
    .max_connections(max_connections)
    .acquire_timeout(acquire_timeout)
    .connect_with(options)
    .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
  sqlx::migrate!("./migrations").run(pool).await
}

/// Decimals are kept as text so no precision is lost.
pub(crate) fn parse_decimal(column: &str, value: &str) -> Result<Decimal, String> {
  Decimal::from_str(value).map_err(|e| format!("Invalid decimal in {}: {} ({})", column, value, e))
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[tokio::test]
  async fn test_connect_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("hourbook.db");
    let url = format!("sqlite://{}", path.display());

    let pool = connect(&url, 2, Duration::from_secs(5)).await.unwrap();
    run_migrations(&pool).await.unwrap();

    assert!(path.exists());
    let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await.unwrap();
    assert_eq!(one, 1);
  }

  #[tokio::test]
  async fn test_connect_in_memory_needs_no_directory() {
    let pool = connect("sqlite::memory:", 1, Duration::from_secs(5))
      .await
      .unwrap();
    let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await.unwrap();
    assert_eq!(one, 1);
  }
}

#[cfg(test)]
pub mod test_support {
  use sqlx::SqlitePool;
  use sqlx::sqlite::SqlitePoolOptions;
  use std::time::Duration;
  use tempfile::TempDir;

  /// Each in-memory connection is its own database, so the pool holds one.
  pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
      .max_connections(1)
      .connect("sqlite::memory:")
      .await
      .expect("Failed to open in-memory database");

    super::run_migrations(&pool)
      .await
      .expect("Failed to run migrations");

    pool
  }

  /// File-backed database with several connections, for tests that need
  /// writers racing on separate connections.
  pub async fn setup_file_db(dir: &TempDir) -> SqlitePool {
    let url = format!("sqlite://{}", dir.path().join("hourbook.db").display());
    let pool = super::connect(&url, 8, Duration::from_secs(10))
      .await
      .expect("Failed to open file database");

    super::run_migrations(&pool)
      .await
      .expect("Failed to run migrations");

    pool
  }
}
