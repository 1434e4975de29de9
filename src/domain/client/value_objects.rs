use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid client name: {0}")]
  InvalidClientName(String),
  #[error("Invalid hourly rate: {0}")]
  InvalidHourlyRate(String),
  #[error("Invalid address: {0}")]
  InvalidAddress(String),
}

// Client Name - unique per installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientName(String);

impl ClientName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidClientName(
        "Client name cannot be empty".to_string(),
      ));
    }
    if trimmed.chars().count() > 255 {
      return Err(ValueObjectError::InvalidClientName(
        "Client name cannot exceed 255 characters".to_string(),
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

impl fmt::Display for ClientName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Hourly Rate - currency units per hour, current value only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRate(Decimal);

impl HourlyRate {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() && !value.is_zero() {
      return Err(ValueObjectError::InvalidHourlyRate(
        "Hourly rate cannot be negative".to_string(),
      ));
    }
    if value.normalize().scale() > 2 {
      return Err(ValueObjectError::InvalidHourlyRate(
        "Hourly rate cannot have more than 2 decimal places".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

impl fmt::Display for HourlyRate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:.2}", self.0)
  }
}

// Contact details printed on invoices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
  pub address: String,
  pub contact_person: Option<String>,
}

impl ContactInfo {
  pub fn new(address: String, contact_person: Option<String>) -> Result<Self, ValueObjectError> {
    let address = address.trim().to_string();
    if address.chars().count() > 1000 {
      return Err(ValueObjectError::InvalidAddress(
        "Address cannot exceed 1000 characters".to_string(),
      ));
    }

    let contact_person = contact_person
      .map(|p| p.trim().to_string())
      .filter(|p| !p.is_empty());

    Ok(Self {
      address,
      contact_person,
    })
  }
}
