use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::time_entry::EntryTiming;

/// Request for creating a client
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClientRequest {
  #[validate(length(
    min = 1,
    max = 255,
    message = "Name must be between 1 and 255 characters"
  ))]
  pub name: String,

  #[serde(default)]
  #[validate(length(max = 1000, message = "Address cannot exceed 1000 characters"))]
  pub address: String,

  #[validate(length(max = 255, message = "Contact person cannot exceed 255 characters"))]
  pub contact_person: Option<String>,

  /// Currency units per hour
  pub hourly_rate: Decimal,
}

/// Partial client update; omitted fields are kept
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClientRequest {
  #[validate(length(
    min = 1,
    max = 255,
    message = "Name must be between 1 and 255 characters"
  ))]
  pub name: Option<String>,

  #[validate(length(max = 1000, message = "Address cannot exceed 1000 characters"))]
  pub address: Option<String>,

  #[validate(length(max = 255, message = "Contact person cannot exceed 255 characters"))]
  pub contact_person: Option<String>,

  pub hourly_rate: Option<Decimal>,
}

/// Request for logging time against a client
///
/// Timing is either `start`/`end` timestamps or `date` with
/// `start_time`/`end_time`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTimeEntryRequest {
  pub client_id: Uuid,

  #[validate(length(
    min = 1,
    max = 255,
    message = "Title must be between 1 and 255 characters"
  ))]
  pub title: String,

  #[serde(flatten)]
  pub timing: EntryTiming,

  /// `scheduled` or `completed`; derived from the end time when omitted
  pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTimeEntryRequest {
  #[validate(length(
    min = 1,
    max = 255,
    message = "Title must be between 1 and 255 characters"
  ))]
  pub title: String,

  #[serde(flatten)]
  pub timing: EntryTiming,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeStatusRequest {
  pub status: String,
  /// Required when an invoice is marked paid
  pub paid_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeEntryQuery {
  pub client_id: Option<Uuid>,
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
  pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveProfileRequest {
  #[validate(length(
    min = 1,
    max = 255,
    message = "Name must be between 1 and 255 characters"
  ))]
  pub name: String,

  #[serde(default)]
  #[validate(length(max = 1000, message = "Address cannot exceed 1000 characters"))]
  pub address: String,

  #[validate(length(max = 50, message = "Tax ID cannot exceed 50 characters"))]
  pub tax_id: Option<String>,

  #[validate(length(max = 1000, message = "Bank details cannot exceed 1000 characters"))]
  pub bank_details: Option<String>,
}

/// Request for generating an invoice over an inclusive date range
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateInvoiceRequest {
  pub client_id: Uuid,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  /// `en` or `de`
  #[validate(length(min = 2, max = 10, message = "Invalid language code"))]
  pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceQuery {
  pub status: Option<String>,
  pub client_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
  pub period: Option<String>,
  pub year: Option<i32>,
  pub month: Option<u32>,
}

/// Health check result
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
  pub status: String,
  pub database: String,
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  /// Success message
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;
  use validator::Validate;

  #[test]
  fn test_create_client_request_validation() {
    let request = CreateClientRequest {
      name: "Studio Nord".to_string(),
      address: "Hauptstr. 1".to_string(),
      contact_person: None,
      hourly_rate: dec!(31.50),
    };
    assert!(request.validate().is_ok());

    let request = CreateClientRequest {
      name: String::new(),
      ..request
    };
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_create_time_entry_request_accepts_wall_clock_times() {
    let json = serde_json::json!({
      "client_id": Uuid::nil(),
      "title": "Yoga",
      "date": "2026-03-02",
      "start_time": "18:00:00",
      "end_time": "19:15:00"
    });

    let request: CreateTimeEntryRequest = serde_json::from_value(json).unwrap();
    assert!(request.validate().is_ok());
    assert!(matches!(request.timing, EntryTiming::WallClock { .. }));
    assert!(request.status.is_none());
  }

  #[test]
  fn test_create_time_entry_request_accepts_timestamps() {
    let json = serde_json::json!({
      "client_id": Uuid::nil(),
      "title": "Yoga",
      "start": "2026-03-02T18:00:00Z",
      "end": "2026-03-02T19:15:00Z",
      "status": "completed"
    });

    let request: CreateTimeEntryRequest = serde_json::from_value(json).unwrap();
    assert!(matches!(request.timing, EntryTiming::Timestamps { .. }));
  }

  #[test]
  fn test_save_profile_request_rejects_long_tax_id() {
    let request = SaveProfileRequest {
      name: "Anna Berg".to_string(),
      address: String::new(),
      tax_id: Some("x".repeat(51)),
      bank_details: None,
    };
    assert!(request.validate().is_err());
  }
}
