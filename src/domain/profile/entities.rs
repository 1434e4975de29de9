use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::ProfileError;

const MAX_NAME_LENGTH: usize = 255;
const MAX_ADDRESS_LENGTH: usize = 1000;
const MAX_TAX_ID_LENGTH: usize = 50;

// User Profile - the invoicing party printed as "from" on every invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  pub name: String,
  pub address: String,
  pub tax_id: Option<String>,
  pub bank_details: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Profile fields as submitted by the user
#[derive(Debug, Clone, Default)]
pub struct ProfileDetails {
  pub name: String,
  pub address: String,
  pub tax_id: Option<String>,
  pub bank_details: Option<String>,
}

impl ProfileDetails {
  fn validate(self) -> Result<Self, ProfileError> {
    let name = self.name.trim().to_string();
    if name.is_empty() {
      return Err(ProfileError::Validation("Name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
      return Err(ProfileError::Validation(format!(
        "Name cannot exceed {} characters",
        MAX_NAME_LENGTH
      )));
    }

    let address = self.address.trim().to_string();
    if address.chars().count() > MAX_ADDRESS_LENGTH {
      return Err(ProfileError::Validation(format!(
        "Address cannot exceed {} characters",
        MAX_ADDRESS_LENGTH
      )));
    }

    let tax_id = blank_to_none(self.tax_id);
    if tax_id
      .as_ref()
      .is_some_and(|t| t.chars().count() > MAX_TAX_ID_LENGTH)
    {
      return Err(ProfileError::Validation(format!(
        "Tax ID cannot exceed {} characters",
        MAX_TAX_ID_LENGTH
      )));
    }

    Ok(Self {
      name,
      address,
      tax_id,
      bank_details: blank_to_none(self.bank_details),
    })
  }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl UserProfile {
  pub fn new(details: ProfileDetails) -> Result<Self, ProfileError> {
    let details = details.validate()?;
    let now = Utc::now();
    Ok(Self {
      name: details.name,
      address: details.address,
      tax_id: details.tax_id,
      bank_details: details.bank_details,
      created_at: now,
      updated_at: now,
    })
  }

  pub fn apply(&mut self, details: ProfileDetails) -> Result<(), ProfileError> {
    let details = details.validate()?;
    self.name = details.name;
    self.address = details.address;
    self.tax_id = details.tax_id;
    self.bank_details = details.bank_details;
    self.updated_at = Utc::now();
    Ok(())
  }
}
