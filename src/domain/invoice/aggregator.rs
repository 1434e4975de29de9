//! Turns logged time entries into invoice lines and totals.
//!
//! The aggregation is pure: it never touches storage, so a failed or
//! abandoned generation leaves nothing behind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::time_entry::{TimeEntry, amount_for_seconds, hours_from_seconds};

use super::value_objects::{BillingPeriod, round_currency};

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedLine {
  pub time_entry_id: Uuid,
  pub title: String,
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
  pub duration_seconds: i64,
  pub amount: Decimal,
}

impl AggregatedLine {
  pub fn duration_hours(&self) -> Decimal {
    hours_from_seconds(self.duration_seconds)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceAggregate {
  pub lines: Vec<AggregatedLine>,
  pub total_hours: Decimal,
  pub total_amount: Decimal,
}

/// Keeps completed entries starting inside `period`, ordered by start then
/// id. Durations are summed in whole seconds and converted to hours once;
/// the amount is rounded once, on the total.
pub fn aggregate(entries: &[TimeEntry], period: &BillingPeriod, hourly_rate: Decimal) -> InvoiceAggregate {
  let mut billable: Vec<&TimeEntry> = entries
    .iter()
    .filter(|entry| entry.is_billable() && period.contains(entry.start()))
    .collect();
  billable.sort_by(|a, b| a.start().cmp(&b.start()).then_with(|| a.id.cmp(&b.id)));

  let lines: Vec<AggregatedLine> = billable
    .into_iter()
    .map(|entry| {
      let duration_seconds = entry.duration_seconds();
      AggregatedLine {
        time_entry_id: entry.id,
        title: entry.title.value().to_string(),
        start: entry.start(),
        end: entry.end(),
        duration_seconds,
        amount: amount_for_seconds(duration_seconds, hourly_rate),
      }
    })
    .collect();

  let total_seconds: i64 = lines.iter().map(|line| line.duration_seconds).sum();
  let total_hours = hours_from_seconds(total_seconds);
  let total_amount = round_currency(amount_for_seconds(total_seconds, hourly_rate));

  InvoiceAggregate {
    lines,
    total_hours,
    total_amount,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::time_entry::{EntryTitle, TimeEntryStatus, TimeSpan};
  use chrono::{Duration, NaiveDate, TimeZone};
  use rust_decimal_macros::dec;

  fn period() -> BillingPeriod {
    BillingPeriod::new(
      NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
      NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
    )
    .unwrap()
  }

  fn entry_at(start: DateTime<Utc>, minutes: i64, status: TimeEntryStatus) -> TimeEntry {
    TimeEntry::new(
      Uuid::new_v4(),
      EntryTitle::new("Yoga".to_string()).unwrap(),
      TimeSpan::new(start, start + Duration::minutes(minutes)).unwrap(),
      status,
    )
  }

  fn entry_on(day: u32, minutes: i64, status: TimeEntryStatus) -> TimeEntry {
    entry_at(
      Utc.with_ymd_and_hms(2026, 3, day, 18, 0, 0).unwrap(),
      minutes,
      status,
    )
  }

  #[test]
  fn test_four_completed_sessions() {
    let entries: Vec<TimeEntry> = (1..=4)
      .map(|day| entry_on(day, 75, TimeEntryStatus::Completed))
      .collect();

    let aggregate = aggregate(&entries, &period(), dec!(31.50));

    assert_eq!(aggregate.lines.len(), 4);
    assert_eq!(aggregate.total_hours, dec!(5.00));
    assert_eq!(aggregate.total_amount, dec!(157.50));
  }

  #[test]
  fn test_cancelled_entry_excluded() {
    let entries = vec![
      entry_on(2, 75, TimeEntryStatus::Completed),
      entry_on(3, 75, TimeEntryStatus::Cancelled),
      entry_on(4, 75, TimeEntryStatus::Completed),
    ];

    let aggregate = aggregate(&entries, &period(), dec!(31.50));

    assert_eq!(aggregate.lines.len(), 2);
    assert_eq!(aggregate.total_hours, dec!(2.50));
    assert_eq!(aggregate.total_amount, dec!(78.75));
  }

  #[test]
  fn test_scheduled_entries_never_billed() {
    let entries = vec![
      entry_on(2, 60, TimeEntryStatus::Scheduled),
      entry_on(3, 60, TimeEntryStatus::Scheduled),
    ];

    let aggregate = aggregate(&entries, &period(), dec!(40));

    assert!(aggregate.lines.is_empty());
    assert_eq!(aggregate.total_hours, Decimal::ZERO);
    assert_eq!(aggregate.total_amount, Decimal::ZERO);
  }

  #[test]
  fn test_period_is_inclusive_by_day() {
    let entries = vec![
      entry_at(
        Utc.with_ymd_and_hms(2026, 2, 28, 23, 59, 59).unwrap(),
        60,
        TimeEntryStatus::Completed,
      ),
      entry_at(
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
        60,
        TimeEntryStatus::Completed,
      ),
      entry_at(
        Utc.with_ymd_and_hms(2026, 3, 31, 23, 30, 0).unwrap(),
        60,
        TimeEntryStatus::Completed,
      ),
      entry_at(
        Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap(),
        60,
        TimeEntryStatus::Completed,
      ),
    ];

    let aggregate = aggregate(&entries, &period(), dec!(10));

    assert_eq!(aggregate.lines.len(), 2);
    assert_eq!(aggregate.total_hours, dec!(2));
  }

  #[test]
  fn test_lines_sorted_by_start_then_id() {
    let same_start = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
    let entries = vec![
      entry_on(20, 60, TimeEntryStatus::Completed),
      entry_at(same_start, 30, TimeEntryStatus::Completed),
      entry_at(same_start, 45, TimeEntryStatus::Completed),
      entry_on(5, 60, TimeEntryStatus::Completed),
    ];

    let aggregate = aggregate(&entries, &period(), dec!(10));
    let starts: Vec<_> = aggregate.lines.iter().map(|l| l.start).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);

    let tied: Vec<Uuid> = aggregate
      .lines
      .iter()
      .filter(|l| l.start == same_start)
      .map(|l| l.time_entry_id)
      .collect();
    assert_eq!(tied.len(), 2);
    assert!(tied[0] < tied[1]);
  }

  #[test]
  fn test_rounding_applied_once_on_total() {
    // 3 × 15 min at 10.02/h: per-line rounding would give 3 × 2.51 = 7.53
    let entries: Vec<TimeEntry> = (1..=3)
      .map(|day| entry_on(day, 15, TimeEntryStatus::Completed))
      .collect();

    let aggregate = aggregate(&entries, &period(), dec!(10.02));

    assert_eq!(aggregate.total_hours, dec!(0.75));
    assert_eq!(aggregate.total_amount, dec!(7.52));
    assert!(aggregate.lines.iter().all(|l| l.amount == dec!(2.505)));
  }

  #[test]
  fn test_twenty_minute_sessions_total_exactly() {
    let entries = vec![
      entry_on(2, 20, TimeEntryStatus::Completed),
      entry_on(3, 20, TimeEntryStatus::Completed),
      entry_on(4, 20, TimeEntryStatus::Completed),
      entry_on(5, 30, TimeEntryStatus::Completed),
    ];

    let aggregate = aggregate(&entries, &period(), dec!(25.25));

    assert_eq!(aggregate.total_hours, dec!(1.5));
    // 37.875 rounds half-up
    assert_eq!(aggregate.total_amount, dec!(37.88));
    let seconds: Vec<i64> = aggregate.lines.iter().map(|l| l.duration_seconds).collect();
    assert_eq!(seconds, vec![1200, 1200, 1200, 1800]);
    assert_eq!(
      hours_from_seconds(seconds.iter().sum()),
      aggregate.total_hours
    );
  }

  #[test]
  fn test_repeating_hours_round_half_up() {
    // 40 + 50 min = 1.5 h at 10.01/h = 15.015
    let entries = vec![
      entry_on(2, 40, TimeEntryStatus::Completed),
      entry_on(3, 50, TimeEntryStatus::Completed),
    ];

    let aggregate = aggregate(&entries, &period(), dec!(10.01));

    assert_eq!(aggregate.total_hours, dec!(1.5));
    assert_eq!(aggregate.total_amount, dec!(15.02));
  }
}
