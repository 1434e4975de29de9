use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid invoice number: {0}")]
  InvalidInvoiceNumber(String),
  #[error("Invalid currency code: {0}")]
  InvalidCurrency(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid status: {0}")]
  InvalidStatus(String),
  #[error("Invalid language: {0}")]
  InvalidLanguage(String),
  #[error("Invalid period: {0}")]
  InvalidPeriod(String),
}

/// Rounds half away from zero to two decimal places. Amounts are never
/// negative, so this is the usual commercial half-up rounding.
pub fn round_currency(amount: Decimal) -> Decimal {
  amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// Invoice Number - "{scope}-{seq}" with the sequence zero-padded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 100 {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot exceed 100 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  /// Sequences wider than `width` are printed in full, never truncated.
  pub fn from_sequence(scope: &str, sequence: i64, width: usize) -> Result<Self, ValueObjectError> {
    if sequence < 1 {
      return Err(ValueObjectError::InvalidInvoiceNumber(format!(
        "Sequence value must be positive, got {}",
        sequence
      )));
    }
    Self::new(format!("{}-{:0width$}", scope, sequence, width = width))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Numbering Scope - the bucket invoice numbers are sequential within
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingScope {
  #[default]
  Year,
  YearMonth,
}

impl NumberingScope {
  pub fn key_for(&self, date: NaiveDate) -> String {
    match self {
      NumberingScope::Year => format!("{:04}", date.year()),
      NumberingScope::YearMonth => format!("{:04}-{:02}", date.year(), date.month()),
    }
  }
}

// Invoice Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
  Created,
  Sent,
  Paid,
}

impl InvoiceStatus {
  /// Strictly one step forward; skipping and reversing are rejected.
  pub fn can_transition_to(&self, new_status: InvoiceStatus) -> bool {
    match (self, new_status) {
      (InvoiceStatus::Created, InvoiceStatus::Sent) => true,
      (InvoiceStatus::Sent, InvoiceStatus::Paid) => true,
      (InvoiceStatus::Created, _) => false,
      (InvoiceStatus::Sent, _) => false,
      (InvoiceStatus::Paid, _) => false,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Created => "created",
      InvoiceStatus::Sent => "sent",
      InvoiceStatus::Paid => "paid",
    }
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "created" => Ok(InvoiceStatus::Created),
      "sent" => Ok(InvoiceStatus::Sent),
      "paid" => Ok(InvoiceStatus::Paid),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown status: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Billing Period - whole days, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
  start: NaiveDate,
  end: NaiveDate,
}

impl BillingPeriod {
  pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValueObjectError> {
    if start > end {
      return Err(ValueObjectError::InvalidPeriod(format!(
        "start date {} is after end date {}",
        start, end
      )));
    }
    if end.checked_add_days(Days::new(1)).is_none() {
      return Err(ValueObjectError::InvalidPeriod(
        "end date is out of range".to_string(),
      ));
    }
    Ok(Self { start, end })
  }

  pub fn start(&self) -> NaiveDate {
    self.start
  }

  pub fn end(&self) -> NaiveDate {
    self.end
  }

  /// Midnight UTC of the first day.
  pub fn starts_at(&self) -> DateTime<Utc> {
    Utc.from_utc_datetime(&self.start.and_time(chrono::NaiveTime::MIN))
  }

  /// Midnight UTC of the day after the last day (exclusive bound).
  pub fn ends_before(&self) -> DateTime<Utc> {
    let next_day = self
      .end
      .checked_add_days(Days::new(1))
      .unwrap_or(NaiveDate::MAX);
    Utc.from_utc_datetime(&next_day.and_time(chrono::NaiveTime::MIN))
  }

  pub fn contains(&self, instant: DateTime<Utc>) -> bool {
    instant >= self.starts_at() && instant < self.ends_before()
  }
}

// Currency - ISO 4217
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
  USD,
  #[default]
  EUR,
  GBP,
  CHF,
}

impl Currency {
  pub fn as_str(&self) -> &'static str {
    match self {
      Currency::USD => "USD",
      Currency::EUR => "EUR",
      Currency::GBP => "GBP",
      Currency::CHF => "CHF",
    }
  }

  pub fn symbol(&self) -> &'static str {
    match self {
      Currency::USD => "$",
      Currency::EUR => "€",
      Currency::GBP => "£",
      Currency::CHF => "CHF ",
    }
  }
}

impl FromStr for Currency {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "USD" => Ok(Currency::USD),
      "EUR" => Ok(Currency::EUR),
      "GBP" => Ok(Currency::GBP),
      "CHF" => Ok(Currency::CHF),
      _ => Err(ValueObjectError::InvalidCurrency(format!(
        "Unsupported currency: {}",
        s
      ))),
    }
  }
}

// Money - Amount with currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
  pub amount: Decimal,
  pub currency: Currency,
}

impl Money {
  pub fn new(amount: Decimal, currency: Currency) -> Result<Self, ValueObjectError> {
    if amount.is_sign_negative() && !amount.is_zero() {
      return Err(ValueObjectError::InvalidAmount(
        "Amount cannot be negative".to_string(),
      ));
    }
    Ok(Self { amount, currency })
  }

  pub fn zero(currency: Currency) -> Self {
    Self {
      amount: Decimal::ZERO,
      currency,
    }
  }

  pub fn add(&self, other: &Money) -> Result<Money, ValueObjectError> {
    if self.currency != other.currency {
      return Err(ValueObjectError::InvalidAmount(
        "Cannot add amounts with different currencies".to_string(),
      ));
    }
    Ok(Money {
      amount: self.amount + other.amount,
      currency: self.currency,
    })
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{:.2}", self.currency.symbol(), self.amount)
  }
}

// Language the invoice document is rendered in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
  #[default]
  #[serde(rename = "en")]
  English,
  #[serde(rename = "de")]
  German,
}

impl Language {
  pub fn code(&self) -> &'static str {
    match self {
      Language::English => "en",
      Language::German => "de",
    }
  }
}

impl FromStr for Language {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "en" | "english" => Ok(Language::English),
      "de" | "german" | "deutsch" => Ok(Language::German),
      _ => Err(ValueObjectError::InvalidLanguage(format!(
        "Unsupported language: {}",
        s
      ))),
    }
  }
}

// Document Format - what a renderer produces and the store keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
  Html,
  Pdf,
}

impl DocumentFormat {
  pub fn extension(&self) -> &'static str {
    match self {
      DocumentFormat::Html => "html",
      DocumentFormat::Pdf => "pdf",
    }
  }

  pub fn content_type(&self) -> &'static str {
    match self {
      DocumentFormat::Html => "text/html; charset=utf-8",
      DocumentFormat::Pdf => "application/pdf",
    }
  }

  pub fn from_path(path: &str) -> Option<Self> {
    let extension = path.rsplit_once('.')?.1.to_lowercase();
    match extension.as_str() {
      "html" | "htm" => Some(DocumentFormat::Html),
      "pdf" => Some(DocumentFormat::Pdf),
      _ => None,
    }
  }
}

// Dashboard Period - calendar month, quarter or year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPeriod {
  Month { year: i32, month: u32 },
  Quarter { year: i32, quarter: u32 },
  Year(i32),
}

impl DashboardPeriod {
  /// Parses the `period` keyword; quarter is derived from `month`.
  pub fn parse(period: &str, year: i32, month: Option<u32>) -> Result<Self, ValueObjectError> {
    let current_year = Utc::now().year();
    if year < 2000 || year > current_year + 1 {
      return Err(ValueObjectError::InvalidPeriod(format!(
        "Invalid year: {}",
        year
      )));
    }
    if let Some(month) = month {
      if !(1..=12).contains(&month) {
        return Err(ValueObjectError::InvalidPeriod(format!(
          "Invalid month: {}",
          month
        )));
      }
    }

    let month = month.unwrap_or_else(|| Utc::now().month());
    match period.to_lowercase().as_str() {
      "month" => Ok(DashboardPeriod::Month { year, month }),
      "quarter" => Ok(DashboardPeriod::Quarter {
        year,
        quarter: (month - 1) / 3 + 1,
      }),
      "year" => Ok(DashboardPeriod::Year(year)),
      _ => Err(ValueObjectError::InvalidPeriod(format!(
        "Unknown period '{}', use month, quarter or year",
        period
      ))),
    }
  }

  /// First day and the day after the last day.
  pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate), ValueObjectError> {
    let (year, first_month, months) = match *self {
      DashboardPeriod::Month { year, month } => (year, month, 1),
      DashboardPeriod::Quarter { year, quarter } => (year, (quarter - 1) * 3 + 1, 3),
      DashboardPeriod::Year(year) => (year, 1, 12),
    };

    let start = NaiveDate::from_ymd_opt(year, first_month, 1)
      .ok_or_else(|| ValueObjectError::InvalidPeriod(format!("{:?}", self)))?;
    let end = start
      .checked_add_months(chrono::Months::new(months))
      .ok_or_else(|| ValueObjectError::InvalidPeriod(format!("{:?}", self)))?;
    Ok((start, end))
  }
}
