use serde::Deserialize;
use std::sync::Arc;

use crate::domain::profile::{ProfileDetails, ProfileError, ProfileService};

use super::get_profile::ProfileDto;

#[derive(Debug, Deserialize)]
pub struct SaveProfileCommand {
  pub name: String,
  pub address: String,
  pub tax_id: Option<String>,
  pub bank_details: Option<String>,
}

pub struct SaveProfileUseCase {
  profile_service: Arc<ProfileService>,
}

impl SaveProfileUseCase {
  pub fn new(profile_service: Arc<ProfileService>) -> Self {
    Self { profile_service }
  }

  pub async fn execute(&self, command: SaveProfileCommand) -> Result<ProfileDto, ProfileError> {
    let profile = self
      .profile_service
      .save_profile(ProfileDetails {
        name: command.name,
        address: command.address,
        tax_id: command.tax_id,
        bank_details: command.bank_details,
      })
      .await?;

    Ok(profile.into())
  }
}
