use std::sync::Arc;

use super::entities::{ProfileDetails, UserProfile};
use super::errors::ProfileError;
use super::ports::ProfileRepository;

pub struct ProfileService {
  profile_repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
  pub fn new(profile_repo: Arc<dyn ProfileRepository>) -> Self {
    Self { profile_repo }
  }

  pub async fn get_profile(&self) -> Result<UserProfile, ProfileError> {
    self
      .profile_repo
      .find()
      .await?
      .ok_or(ProfileError::NotFound)
  }

  /// Returns `None` instead of an error when nothing was saved yet.
  pub async fn find_profile(&self) -> Result<Option<UserProfile>, ProfileError> {
    self.profile_repo.find().await
  }

  pub async fn save_profile(&self, details: ProfileDetails) -> Result<UserProfile, ProfileError> {
    let profile = match self.profile_repo.find().await? {
      Some(mut existing) => {
        existing.apply(details)?;
        existing
      }
      None => UserProfile::new(details)?,
    };

    let saved = self.profile_repo.save(profile).await?;
    tracing::info!("Saved profile for {}", saved.name);
    Ok(saved)
  }
}
