use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Profile has not been set up")]
  NotFound,

  #[error("Storage error: {0}")]
  Storage(String),
}

impl From<sqlx::Error> for ProfileError {
  fn from(error: sqlx::Error) -> Self {
    ProfileError::Storage(error.to_string())
  }
}
