use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

use super::parse_decimal;
use crate::domain::invoice::{
  BillingPeriod, Currency, Invoice, InvoiceLineItem, InvoiceNumber, InvoiceStatus, Language, Money,
  errors::InvoiceError,
  ports::{InvoiceFilter, InvoiceRepository},
};

const INVOICE_COLUMNS: &str = "id, number, client_id, period_start, period_end, total_hours, hourly_rate, total_amount, currency, status, language, issue_date, due_date, paid_date, document_path, created_at, updated_at";

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: Uuid,
  number: String,
  client_id: Uuid,
  period_start: NaiveDate,
  period_end: NaiveDate,
  total_hours: String,
  hourly_rate: String,
  total_amount: String,
  currency: String,
  status: String,
  language: String,
  issue_date: NaiveDate,
  due_date: NaiveDate,
  paid_date: Option<NaiveDate>,
  document_path: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    let decimal = |column: &str, value: &str| parse_decimal(column, value).map_err(InvoiceError::Storage);
    let currency = Currency::from_str(&row.currency)?;

    Ok(Invoice {
      id: row.id,
      number: InvoiceNumber::new(row.number)?,
      client_id: row.client_id,
      period: BillingPeriod::new(row.period_start, row.period_end)?,
      total_hours: decimal("invoices.total_hours", &row.total_hours)?,
      hourly_rate: decimal("invoices.hourly_rate", &row.hourly_rate)?,
      total_amount: Money::new(decimal("invoices.total_amount", &row.total_amount)?, currency)?,
      status: InvoiceStatus::from_str(&row.status)?,
      language: Language::from_str(&row.language)?,
      issue_date: row.issue_date,
      due_date: row.due_date,
      paid_date: row.paid_date,
      document_path: row.document_path,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

#[derive(Debug, FromRow)]
struct LineItemRow {
  id: Uuid,
  invoice_id: Uuid,
  time_entry_id: Uuid,
  title: String,
  start_at: DateTime<Utc>,
  end_at: DateTime<Utc>,
  duration_seconds: i64,
  amount: String,
  sort_order: i32,
}

impl TryFrom<LineItemRow> for InvoiceLineItem {
  type Error = InvoiceError;

  fn try_from(row: LineItemRow) -> Result<Self, Self::Error> {
    Ok(InvoiceLineItem {
      id: row.id,
      invoice_id: row.invoice_id,
      time_entry_id: row.time_entry_id,
      title: row.title,
      start: row.start_at,
      end: row.end_at,
      duration_seconds: row.duration_seconds,
      amount: parse_decimal("invoice_line_items.amount", &row.amount)
        .map_err(InvoiceError::Storage)?,
      sort_order: row.sort_order,
    })
  }
}

pub struct SqliteInvoiceRepository {
  pool: SqlitePool,
}

impl SqliteInvoiceRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for SqliteInvoiceRepository {
  async fn create(
    &self,
    invoice: Invoice,
    line_items: Vec<InvoiceLineItem>,
  ) -> Result<(Invoice, Vec<InvoiceLineItem>), InvoiceError> {
    let mut tx = self.pool.begin().await?;

    let inserted = sqlx::query(
      r#"
            INSERT INTO invoices (
                id, number, client_id, period_start, period_end, total_hours, hourly_rate,
                total_amount, currency, status, language, issue_date, due_date, paid_date,
                document_path, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
    )
    .bind(invoice.id)
    .bind(invoice.number.value())
    .bind(invoice.client_id)
    .bind(invoice.period.start())
    .bind(invoice.period.end())
    .bind(invoice.total_hours.to_string())
    .bind(invoice.hourly_rate.to_string())
    .bind(invoice.total_amount.amount.to_string())
    .bind(invoice.total_amount.currency.as_str())
    .bind(invoice.status.as_str())
    .bind(invoice.language.code())
    .bind(invoice.issue_date)
    .bind(invoice.due_date)
    .bind(invoice.paid_date)
    .bind(&invoice.document_path)
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .execute(&mut *tx)
    .await;

    if let Err(e) = inserted {
      return Err(match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
          tracing::warn!("Invoice number {} already taken", invoice.number);
          InvoiceError::NumberingConflict(invoice.number.into_inner())
        }
        e => e.into(),
      });
    }

    for item in &line_items {
      sqlx::query(
        r#"
            INSERT INTO invoice_line_items (
                id, invoice_id, time_entry_id, title, start_at, end_at, duration_seconds, amount, sort_order
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
      )
      .bind(item.id)
      .bind(item.invoice_id)
      .bind(item.time_entry_id)
      .bind(&item.title)
      .bind(item.start)
      .bind(item.end)
      .bind(item.duration_seconds)
      .bind(item.amount.to_string())
      .bind(item.sort_order)
      .execute(&mut *tx)
      .await?;
    }

    tx.commit().await?;
    Ok((invoice, line_items))
  }

  async fn update(&self, invoice: Invoice) -> Result<Invoice, InvoiceError> {
    let result = sqlx::query(
      r#"
            UPDATE invoices
            SET status = ?, paid_date = ?, document_path = ?, updated_at = ?
            WHERE id = ?
            "#,
    )
    .bind(invoice.status.as_str())
    .bind(invoice.paid_date)
    .bind(&invoice.document_path)
    .bind(invoice.updated_at)
    .bind(invoice.id)
    .execute(&self.pool)
    .await?;

    if result.rows_affected() == 0 {
      return Err(InvoiceError::InvoiceNotFound(invoice.id));
    }
    Ok(invoice)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      "SELECT {} FROM invoices WHERE id = ?",
      INVOICE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_all(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, InvoiceError> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
      "SELECT {} FROM invoices WHERE 1 = 1",
      INVOICE_COLUMNS
    ));

    if let Some(status) = filter.status {
      query.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(client_id) = filter.client_id {
      query.push(" AND client_id = ").push_bind(client_id);
    }
    query.push(" ORDER BY created_at DESC, number DESC");

    let rows = query
      .build_query_as::<InvoiceRow>()
      .fetch_all(&self.pool)
      .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn find_line_items(&self, invoice_id: Uuid) -> Result<Vec<InvoiceLineItem>, InvoiceError> {
    let rows = sqlx::query_as::<_, LineItemRow>(
      r#"
            SELECT id, invoice_id, time_entry_id, title, start_at, end_at, duration_seconds, amount, sort_order
            FROM invoice_line_items
            WHERE invoice_id = ?
            ORDER BY sort_order ASC
            "#,
    )
    .bind(invoice_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    let mut tx = self.pool.begin().await?;

    sqlx::query("DELETE FROM invoice_line_items WHERE invoice_id = ?")
      .bind(id)
      .execute(&mut *tx)
      .await?;
    let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
      .bind(id)
      .execute(&mut *tx)
      .await?;

    if result.rows_affected() == 0 {
      return Err(InvoiceError::InvoiceNotFound(id));
    }

    tx.commit().await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::client::{Client, ClientName, ContactInfo, HourlyRate, ports::ClientRepository};
  use crate::domain::invoice::NewInvoice;
  use crate::domain::time_entry::{amount_for_seconds, hours_from_seconds};
  use crate::infrastructure::persistence::sqlite::{
    SqliteClientRepository, test_support::setup_test_db,
  };
  use chrono::TimeZone;
  use rust_decimal::Decimal;
  use rust_decimal_macros::dec;

  async fn setup() -> (SqliteInvoiceRepository, Uuid) {
    let pool = setup_test_db().await;
    let client = SqliteClientRepository::new(pool.clone())
      .create(Client::new(
        ClientName::new("Studio Nord".to_string()).unwrap(),
        ContactInfo::new(String::new(), None).unwrap(),
        HourlyRate::new(dec!(31.50)).unwrap(),
      ))
      .await
      .unwrap();
    (SqliteInvoiceRepository::new(pool), client.id)
  }

  fn invoice(client_id: Uuid, sequence: i64, total_hours: Decimal) -> Invoice {
    let date = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
    Invoice::new(NewInvoice {
      number: InvoiceNumber::from_sequence("2026", sequence, 3).unwrap(),
      client_id,
      period: BillingPeriod::new(date(1), date(31)).unwrap(),
      total_hours,
      hourly_rate: dec!(31.50),
      total_amount: dec!(0),
      currency: Currency::EUR,
      language: Language::German,
      issue_date: date(31),
      payment_terms_days: 30,
    })
  }

  fn line_item(invoice_id: Uuid, order: i32, duration_seconds: i64) -> InvoiceLineItem {
    let start = Utc.with_ymd_and_hms(2026, 3, order as u32, 18, 0, 0).unwrap();
    InvoiceLineItem {
      id: Uuid::new_v4(),
      invoice_id,
      time_entry_id: Uuid::new_v4(),
      title: "Yoga".to_string(),
      start,
      end: start + chrono::Duration::seconds(duration_seconds),
      duration_seconds,
      amount: amount_for_seconds(duration_seconds, dec!(31.50)),
      sort_order: order,
    }
  }

  #[tokio::test]
  async fn test_snapshot_survives_storage() {
    let (repo, client_id) = setup().await;
    // Two 20-minute lines: neither hour value has a finite decimal form
    let invoice = invoice(client_id, 1, hours_from_seconds(2400));
    let items = vec![line_item(invoice.id, 1, 1200), line_item(invoice.id, 2, 1200)];

    repo.create(invoice.clone(), items.clone()).await.unwrap();

    let stored = repo.find_by_id(invoice.id).await.unwrap().unwrap();
    let stored_items = repo.find_line_items(invoice.id).await.unwrap();
    let resummed: i64 = stored_items.iter().map(|i| i.duration_seconds).sum();

    assert_eq!(stored.total_hours, invoice.total_hours);
    assert_eq!(hours_from_seconds(resummed), stored.total_hours);
    assert_eq!(stored_items, items);
    assert_eq!(stored.language, Language::German);
    assert_eq!(stored.period, invoice.period);
    assert_eq!(stored_items[0].sort_order, 1);
  }

  #[tokio::test]
  async fn test_duplicate_number_is_a_conflict() {
    let (repo, client_id) = setup().await;
    repo
      .create(invoice(client_id, 1, dec!(1)), vec![])
      .await
      .unwrap();

    let duplicate = invoice(client_id, 1, dec!(2));
    let duplicate_id = duplicate.id;
    let items = vec![line_item(duplicate_id, 1, 7200)];
    let err = repo.create(duplicate, items).await.unwrap_err();

    assert!(matches!(err, InvoiceError::NumberingConflict(n) if n == "2026-001"));
    assert!(repo.find_line_items(duplicate_id).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_find_all_filters() {
    let (repo, client_id) = setup().await;
    let mut sent = invoice(client_id, 1, dec!(1));
    sent.change_status(InvoiceStatus::Sent, None).unwrap();
    repo.create(sent, vec![]).await.unwrap();
    repo
      .create(invoice(client_id, 2, dec!(1)), vec![])
      .await
      .unwrap();

    let all = repo.find_all(&InvoiceFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let only_sent = repo
      .find_all(&InvoiceFilter {
        status: Some(InvoiceStatus::Sent),
        ..Default::default()
      })
      .await
      .unwrap();
    assert_eq!(only_sent.len(), 1);
    assert_eq!(only_sent[0].number.value(), "2026-001");

    let other_client = repo
      .find_all(&InvoiceFilter {
        client_id: Some(Uuid::new_v4()),
        ..Default::default()
      })
      .await
      .unwrap();
    assert!(other_client.is_empty());
  }

  #[tokio::test]
  async fn test_delete_removes_line_items() {
    let (repo, client_id) = setup().await;
    let invoice = invoice(client_id, 1, dec!(1));
    let id = invoice.id;
    repo
      .create(invoice, vec![line_item(id, 1, 3600)])
      .await
      .unwrap();

    repo.delete(id).await.unwrap();
    assert!(repo.find_by_id(id).await.unwrap().is_none());
    assert!(repo.find_line_items(id).await.unwrap().is_empty());
    assert!(matches!(
      repo.delete(id).await,
      Err(InvoiceError::InvoiceNotFound(_))
    ));
  }
}
