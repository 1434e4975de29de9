use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::client::Client;
use crate::domain::profile::UserProfile;
use crate::domain::time_entry::hours_from_seconds;

use super::errors::InvoiceError;
use super::value_objects::{
  BillingPeriod, Currency, DocumentFormat, InvoiceNumber, InvoiceStatus, Language, Money,
};

// Invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Uuid,
  pub number: InvoiceNumber,
  pub client_id: Uuid,
  pub period: BillingPeriod,
  pub total_hours: Decimal,
  pub hourly_rate: Decimal,
  pub total_amount: Money,
  pub status: InvoiceStatus,
  pub language: Language,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  pub paid_date: Option<NaiveDate>,
  pub document_path: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Everything fixed at generation time.
#[derive(Debug, Clone)]
pub struct NewInvoice {
  pub number: InvoiceNumber,
  pub client_id: Uuid,
  pub period: BillingPeriod,
  pub total_hours: Decimal,
  pub hourly_rate: Decimal,
  pub total_amount: Decimal,
  pub currency: Currency,
  pub language: Language,
  pub issue_date: NaiveDate,
  pub payment_terms_days: u32,
}

impl Invoice {
  pub fn new(data: NewInvoice) -> Self {
    let now = Utc::now();
    let due_date = data
      .issue_date
      .checked_add_days(Days::new(u64::from(data.payment_terms_days)))
      .unwrap_or(data.issue_date);

    Self {
      id: Uuid::new_v4(),
      number: data.number,
      client_id: data.client_id,
      period: data.period,
      total_hours: data.total_hours,
      hourly_rate: data.hourly_rate,
      total_amount: Money {
        amount: data.total_amount,
        currency: data.currency,
      },
      status: InvoiceStatus::Created,
      language: data.language,
      issue_date: data.issue_date,
      due_date,
      paid_date: None,
      document_path: None,
      created_at: now,
      updated_at: now,
    }
  }

  /// Marking an invoice paid needs the date the payment arrived.
  pub fn change_status(
    &mut self,
    new_status: InvoiceStatus,
    paid_date: Option<NaiveDate>,
  ) -> Result<(), InvoiceError> {
    if !self.status.can_transition_to(new_status) {
      return Err(InvoiceError::InvalidStatusTransition {
        from: self.status,
        to: new_status,
      });
    }

    if new_status == InvoiceStatus::Paid {
      self.paid_date = Some(paid_date.ok_or(InvoiceError::PaidDateRequired)?);
    }
    self.status = new_status;
    self.updated_at = Utc::now();
    Ok(())
  }

  pub fn set_document_path(&mut self, path: String) {
    self.document_path = Some(path);
    self.updated_at = Utc::now();
  }

  /// Sent but not yet paid.
  pub fn is_outstanding(&self) -> bool {
    self.status == InvoiceStatus::Sent
  }

  /// Name (without extension) the rendered document is stored under.
  /// The id suffix keeps a conflicting number from clobbering another file.
  pub fn document_name(&self) -> String {
    format!("invoice-{}-{}", self.number, self.id.simple())
  }
}

// Invoice Line Item - immutable snapshot of one billed time entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
  pub id: Uuid,
  pub invoice_id: Uuid,
  pub time_entry_id: Uuid,
  pub title: String,
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
  /// Whole seconds, so stored lines re-sum to the invoice total exactly.
  pub duration_seconds: i64,
  /// Informational only; never rounded or summed into the total.
  pub amount: Decimal,
  pub sort_order: i32,
}

impl InvoiceLineItem {
  pub fn duration_hours(&self) -> Decimal {
    hours_from_seconds(self.duration_seconds)
  }
}

/// Aggregated but not yet persisted invoice.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
  pub invoice: Invoice,
  pub line_items: Vec<InvoiceLineItem>,
}

/// Borrowed view handed to document renderers.
#[derive(Debug, Clone, Copy)]
pub struct InvoiceDocument<'a> {
  pub invoice: &'a Invoice,
  pub line_items: &'a [InvoiceLineItem],
  pub client: &'a Client,
  pub profile: Option<&'a UserProfile>,
}

#[derive(Debug, Clone)]
pub struct RenderedDocument {
  pub format: DocumentFormat,
  pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
  pub period_start: NaiveDate,
  pub period_end: NaiveDate,
  pub total_revenue_period: Decimal,
  pub pending_invoices_amount: Decimal,
  pub pending_invoices_count: i64,
  pub total_invoices_count: i64,
  pub paid_invoices_count: i64,
  pub currency: Currency,
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn invoice() -> Invoice {
    let date = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
    Invoice::new(NewInvoice {
      number: InvoiceNumber::from_sequence("2026", 1, 3).unwrap(),
      client_id: Uuid::new_v4(),
      period: BillingPeriod::new(date(1), date(31)).unwrap(),
      total_hours: dec!(5),
      hourly_rate: dec!(31.50),
      total_amount: dec!(157.50),
      currency: Currency::EUR,
      language: Language::English,
      issue_date: date(31),
      payment_terms_days: 14,
    })
  }

  #[test]
  fn test_new_invoice_is_created_with_due_date() {
    let invoice = invoice();
    assert_eq!(invoice.status, InvoiceStatus::Created);
    assert_eq!(
      invoice.due_date,
      NaiveDate::from_ymd_opt(2026, 4, 14).unwrap()
    );
    assert!(invoice.paid_date.is_none());
    assert!(invoice.document_name().starts_with("invoice-2026-001-"));
  }

  #[test]
  fn test_lifecycle_created_sent_paid() {
    let mut invoice = invoice();
    let paid_on = NaiveDate::from_ymd_opt(2026, 4, 10).unwrap();

    invoice.change_status(InvoiceStatus::Sent, None).unwrap();
    assert!(invoice.is_outstanding());

    assert!(matches!(
      invoice.change_status(InvoiceStatus::Paid, None),
      Err(InvoiceError::PaidDateRequired)
    ));
    assert_eq!(invoice.status, InvoiceStatus::Sent);

    invoice
      .change_status(InvoiceStatus::Paid, Some(paid_on))
      .unwrap();
    assert_eq!(invoice.paid_date, Some(paid_on));
  }

  #[test]
  fn test_skipping_to_paid_rejected() {
    let mut invoice = invoice();
    let err = invoice
      .change_status(
        InvoiceStatus::Paid,
        NaiveDate::from_ymd_opt(2026, 4, 10),
      )
      .unwrap_err();
    assert!(matches!(
      err,
      InvoiceError::InvalidStatusTransition {
        from: InvoiceStatus::Created,
        to: InvoiceStatus::Paid
      }
    ));
    assert!(invoice.paid_date.is_none());
  }
}
