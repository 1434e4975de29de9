use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_HOUR: i64 = 3600;

/// Converts whole seconds to hours with a single division. Sum seconds
/// first and convert once; adding converted values drifts for durations
/// like 20 minutes that have no finite decimal form.
pub fn hours_from_seconds(seconds: i64) -> Decimal {
  Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}

/// `hours_from_seconds(seconds) * rate`, multiplied before dividing so a
/// terminating result is never truncated.
pub fn amount_for_seconds(seconds: i64, hourly_rate: Decimal) -> Decimal {
  Decimal::from(seconds) * hourly_rate / Decimal::from(SECONDS_PER_HOUR)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid title: {0}")]
  InvalidTitle(String),
  #[error("Invalid time span: {0}")]
  InvalidTimeSpan(String),
  #[error("Invalid status: {0}")]
  InvalidStatus(String),
}

// Entry Title - free-text label such as a class or session name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTitle(String);

impl EntryTitle {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidTitle(
        "Title cannot be empty".to_string(),
      ));
    }
    if trimmed.chars().count() > 255 {
      return Err(ValueObjectError::InvalidTitle(
        "Title cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for EntryTitle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Time Entry Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeEntryStatus {
  Scheduled,
  Completed,
  Cancelled,
}

impl TimeEntryStatus {
  pub fn can_transition_to(&self, new_status: TimeEntryStatus) -> bool {
    match (self, new_status) {
      (TimeEntryStatus::Scheduled, TimeEntryStatus::Completed) => true,
      (TimeEntryStatus::Scheduled, TimeEntryStatus::Cancelled) => true,
      (TimeEntryStatus::Scheduled, TimeEntryStatus::Scheduled) => false,
      (TimeEntryStatus::Completed, _) => false,
      (TimeEntryStatus::Cancelled, _) => false,
    }
  }

  /// Only completed entries ever reach an invoice.
  pub fn is_billable(&self) -> bool {
    matches!(self, TimeEntryStatus::Completed)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      TimeEntryStatus::Scheduled => "scheduled",
      TimeEntryStatus::Completed => "completed",
      TimeEntryStatus::Cancelled => "cancelled",
    }
  }
}

impl FromStr for TimeEntryStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "scheduled" => Ok(TimeEntryStatus::Scheduled),
      "completed" => Ok(TimeEntryStatus::Completed),
      "cancelled" => Ok(TimeEntryStatus::Cancelled),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown status: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for TimeEntryStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Time Span - start/end pair with end strictly after start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
  start: DateTime<Utc>,
  end: DateTime<Utc>,
}

impl TimeSpan {
  pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValueObjectError> {
    if end <= start {
      return Err(ValueObjectError::InvalidTimeSpan(
        "End time must be after start time".to_string(),
      ));
    }
    Ok(Self { start, end })
  }

  /// Builds a span from a calendar date and wall-clock times.
  /// An end time before the start time runs past midnight into the next day.
  pub fn from_date_and_times(
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
  ) -> Result<Self, ValueObjectError> {
    if start_time == end_time {
      return Err(ValueObjectError::InvalidTimeSpan(
        "End time must differ from start time".to_string(),
      ));
    }

    let end_date = if end_time < start_time {
      date.succ_opt().ok_or_else(|| {
        ValueObjectError::InvalidTimeSpan("Date is out of range".to_string())
      })?
    } else {
      date
    };

    let start = Utc.from_utc_datetime(&date.and_time(start_time));
    let end = Utc.from_utc_datetime(&end_date.and_time(end_time));
    Self::new(start, end)
  }

  pub fn start(&self) -> DateTime<Utc> {
    self.start
  }

  pub fn end(&self) -> DateTime<Utc> {
    self.end
  }

  pub fn duration(&self) -> Duration {
    self.end - self.start
  }

  pub fn duration_minutes(&self) -> i64 {
    self.duration().num_minutes()
  }

  pub fn duration_seconds(&self) -> i64 {
    self.duration().num_seconds()
  }

  /// Decimal hours, no rounding applied. Not for summing.
  pub fn duration_hours(&self) -> Decimal {
    hours_from_seconds(self.duration_seconds())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn time(h: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, min, 0).unwrap()
  }

  #[test]
  fn test_entry_title() {
    assert_eq!(
      EntryTitle::new(" Yoga Basics ".to_string()).unwrap().value(),
      "Yoga Basics"
    );
    assert!(EntryTitle::new("".to_string()).is_err());
  }

  #[test]
  fn test_status_transitions() {
    assert!(TimeEntryStatus::Scheduled.can_transition_to(TimeEntryStatus::Completed));
    assert!(TimeEntryStatus::Scheduled.can_transition_to(TimeEntryStatus::Cancelled));
    assert!(!TimeEntryStatus::Completed.can_transition_to(TimeEntryStatus::Cancelled));
    assert!(!TimeEntryStatus::Cancelled.can_transition_to(TimeEntryStatus::Completed));
    assert!(!TimeEntryStatus::Completed.can_transition_to(TimeEntryStatus::Scheduled));
  }

  #[test]
  fn test_only_completed_is_billable() {
    assert!(TimeEntryStatus::Completed.is_billable());
    assert!(!TimeEntryStatus::Scheduled.is_billable());
    assert!(!TimeEntryStatus::Cancelled.is_billable());
  }

  #[test]
  fn test_status_parsing() {
    assert_eq!(
      TimeEntryStatus::from_str("Completed").unwrap(),
      TimeEntryStatus::Completed
    );
    assert!(TimeEntryStatus::from_str("done").is_err());
  }

  #[test]
  fn test_span_rejects_non_positive_duration() {
    let t = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    assert!(TimeSpan::new(t, t).is_err());
    assert!(TimeSpan::new(t, t - Duration::minutes(1)).is_err());
  }

  #[test]
  fn test_span_duration_hours_is_exact() {
    let span = TimeSpan::from_date_and_times(date(2026, 3, 2), time(18, 0), time(19, 15)).unwrap();
    assert_eq!(span.duration_hours(), dec!(1.25));
    assert_eq!(span.duration_minutes(), 75);
  }

  #[test]
  fn test_span_past_midnight() {
    let span = TimeSpan::from_date_and_times(date(2026, 3, 2), time(23, 0), time(1, 30)).unwrap();
    assert_eq!(span.end().date_naive(), date(2026, 3, 3));
    assert_eq!(span.duration_hours(), dec!(2.5));
  }

  #[test]
  fn test_twenty_minute_spans_sum_exactly_in_seconds() {
    let twenty = TimeSpan::from_date_and_times(date(2026, 3, 2), time(18, 0), time(18, 20)).unwrap();
    let half = TimeSpan::from_date_and_times(date(2026, 3, 3), time(18, 0), time(18, 30)).unwrap();

    // Adding three truncated thirds of an hour falls short of one hour
    let drifted: Decimal = (0..3).map(|_| twenty.duration_hours()).sum();
    assert_ne!(drifted + half.duration_hours(), dec!(1.5));

    let seconds = 3 * twenty.duration_seconds() + half.duration_seconds();
    assert_eq!(seconds, 5400);
    assert_eq!(hours_from_seconds(seconds), dec!(1.5));
    assert_eq!(amount_for_seconds(seconds, dec!(25.25)), dec!(37.875));
  }

  #[test]
  fn test_span_equal_times_rejected() {
    assert!(TimeSpan::from_date_and_times(date(2026, 3, 2), time(9, 0), time(9, 0)).is_err());
  }
}
