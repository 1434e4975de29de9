use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::invoice::{errors::InvoiceError, ports::InvoiceNumberSequence};

/// Per-scope counter row bumped by a single upsert, so two callers can
/// never read the same value.
pub struct SqliteInvoiceNumberSequence {
  pool: SqlitePool,
}

impl SqliteInvoiceNumberSequence {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceNumberSequence for SqliteInvoiceNumberSequence {
  async fn next_value(&self, scope: &str) -> Result<i64, InvoiceError> {
    let value = sqlx::query_scalar::<_, i64>(
      r#"
            INSERT INTO invoice_sequences (scope, last_value)
            VALUES (?, 1)
            ON CONFLICT (scope) DO UPDATE SET last_value = last_value + 1
            RETURNING last_value
            "#,
    )
    .bind(scope)
    .fetch_one(&self.pool)
    .await?;

    tracing::debug!("Invoice sequence {} advanced to {}", scope, value);
    Ok(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::sqlite::test_support::{setup_file_db, setup_test_db};
  use std::sync::Arc;
  use tempfile::TempDir;

  #[tokio::test]
  async fn test_values_increase_per_scope() {
    let sequence = SqliteInvoiceNumberSequence::new(setup_test_db().await);

    assert_eq!(sequence.next_value("2026").await.unwrap(), 1);
    assert_eq!(sequence.next_value("2026").await.unwrap(), 2);
    assert_eq!(sequence.next_value("2026-03").await.unwrap(), 1);
    assert_eq!(sequence.next_value("2026").await.unwrap(), 3);
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn test_concurrent_callers_get_distinct_values() {
    let dir = TempDir::new().unwrap();
    let pool = setup_file_db(&dir).await;
    let sequence = Arc::new(SqliteInvoiceNumberSequence::new(pool.clone()));

    let handles: Vec<_> = (0..20)
      .map(|_| {
        let sequence = sequence.clone();
        tokio::spawn(async move { sequence.next_value("2026").await })
      })
      .collect();

    let mut values = Vec::new();
    for handle in handles {
      values.push(handle.await.unwrap().unwrap());
    }
    values.sort();
    assert_eq!(values, (1..=20).collect::<Vec<i64>>());
    assert!(pool.options().get_max_connections() > 1);
  }
}
