use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::{
  adapters::http::{dtos::SaveProfileRequest, errors::ApiError},
  application::profile::{GetProfileUseCase, SaveProfileCommand, SaveProfileUseCase},
};

/// GET /api/profile
pub async fn get_profile_handler(
  use_case: web::Data<Arc<GetProfileUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let profile = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(profile))
}

/// Create or replace the profile
/// PUT /api/profile
pub async fn save_profile_handler(
  request: web::Json<SaveProfileRequest>,
  use_case: web::Data<Arc<SaveProfileUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let profile = use_case
    .execute(SaveProfileCommand {
      name: request.name,
      address: request.address,
      tax_id: request.tax_id,
      bank_details: request.bank_details,
    })
    .await?;

  Ok(HttpResponse::Ok().json(profile))
}
