use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::client::ClientError;
use crate::domain::invoice::InvoiceError;
use crate::domain::profile::ProfileError;
use crate::domain::time_entry::TimeEntryError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Malformed or invalid input (400 Bad Request)
  Validation(String),

  /// Unknown resource (404 Not Found)
  NotFound(String),

  /// Uniqueness or reference conflict (409 Conflict)
  Conflict(String),

  /// Well-formed request the current state does not allow (422 Unprocessable Entity)
  Unprocessable(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::Unprocessable(msg) => write!(f, "Unprocessable: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Conflict(msg) => ("conflict", msg.clone()),
      ApiError::Unprocessable(msg) => ("unprocessable", msg.clone()),
      ApiError::Internal(msg) => {
        // Don't expose internal error details
        tracing::error!("Internal error: {}", msg);
        ("internal_error", "An internal server error occurred".to_string())
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

impl From<ClientError> for ApiError {
  fn from(error: ClientError) -> Self {
    match error {
      ClientError::Validation(e) => ApiError::Validation(e.to_string()),
      ClientError::NotFound(_) => ApiError::NotFound(error.to_string()),
      ClientError::NameAlreadyExists(_)
      | ClientError::HasTimeEntries(_)
      | ClientError::HasInvoices => ApiError::Conflict(error.to_string()),
      ClientError::Storage(e) => ApiError::Internal(format!("Storage error: {}", e)),
    }
  }
}

impl From<TimeEntryError> for ApiError {
  fn from(error: TimeEntryError) -> Self {
    match error {
      TimeEntryError::Validation(e) => ApiError::Validation(e.to_string()),
      TimeEntryError::InvalidRange(_) => ApiError::Validation(error.to_string()),
      TimeEntryError::NotFound(_) | TimeEntryError::ClientNotFound(_) => {
        ApiError::NotFound(error.to_string())
      }
      TimeEntryError::InvalidStatusTransition { .. } => ApiError::Unprocessable(error.to_string()),
      TimeEntryError::Storage(e) => ApiError::Internal(format!("Storage error: {}", e)),
    }
  }
}

impl From<ProfileError> for ApiError {
  fn from(error: ProfileError) -> Self {
    match error {
      ProfileError::Validation(msg) => ApiError::Validation(msg),
      ProfileError::NotFound => ApiError::NotFound(error.to_string()),
      ProfileError::Storage(e) => ApiError::Internal(format!("Storage error: {}", e)),
    }
  }
}

impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::Validation(e) => ApiError::Validation(e.to_string()),
      InvoiceError::InvalidRange(_) => ApiError::Validation(error.to_string()),
      InvoiceError::ClientNotFound(_) | InvoiceError::InvoiceNotFound(_) => {
        ApiError::NotFound(error.to_string())
      }
      InvoiceError::NumberingConflict(_) => ApiError::Conflict(error.to_string()),
      InvoiceError::InvalidStatusTransition { .. } | InvoiceError::PaidDateRequired => {
        ApiError::Unprocessable(error.to_string())
      }
      InvoiceError::Document(e) => ApiError::Internal(format!("Document error: {}", e)),
      InvoiceError::Storage(e) => ApiError::Internal(format!("Storage error: {}", e)),
    }
  }
}
