use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::profile::{ProfileError, ProfileService, UserProfile};

#[derive(Debug, Clone, Serialize)]
pub struct ProfileDto {
  pub name: String,
  pub address: String,
  pub tax_id: Option<String>,
  pub bank_details: Option<String>,
  pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for ProfileDto {
  fn from(profile: UserProfile) -> Self {
    Self {
      name: profile.name,
      address: profile.address,
      tax_id: profile.tax_id,
      bank_details: profile.bank_details,
      updated_at: profile.updated_at,
    }
  }
}

pub struct GetProfileUseCase {
  profile_service: Arc<ProfileService>,
}

impl GetProfileUseCase {
  pub fn new(profile_service: Arc<ProfileService>) -> Self {
    Self { profile_service }
  }

  pub async fn execute(&self) -> Result<ProfileDto, ProfileError> {
    let profile = self.profile_service.get_profile().await?;
    Ok(profile.into())
  }
}
