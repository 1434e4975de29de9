use async_trait::async_trait;

use super::entities::UserProfile;
use super::errors::ProfileError;

/// Single-record store; there is at most one profile per installation.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
  async fn find(&self) -> Result<Option<UserProfile>, ProfileError>;
  async fn save(&self, profile: UserProfile) -> Result<UserProfile, ProfileError>;
}
