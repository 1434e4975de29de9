use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
  adapters::http::{
    dtos::{CreateClientRequest, SuccessResponse, UpdateClientRequest},
    errors::ApiError,
  },
  application::client::{
    CreateClientCommand, CreateClientUseCase, DeleteClientCommand, DeleteClientUseCase,
    GetClientCommand, GetClientUseCase, ListClientsUseCase, UpdateClientCommand,
    UpdateClientUseCase,
  },
};

/// List clients ordered by name
/// GET /api/clients
pub async fn list_clients_handler(
  use_case: web::Data<Arc<ListClientsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Create client
/// POST /api/clients
pub async fn create_client_handler(
  request: web::Json<CreateClientRequest>,
  use_case: web::Data<Arc<CreateClientUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let client = use_case
    .execute(CreateClientCommand {
      name: request.name,
      address: request.address,
      contact_person: request.contact_person,
      hourly_rate: request.hourly_rate,
    })
    .await?;

  Ok(HttpResponse::Created().json(client))
}

/// GET /api/clients/{id}
pub async fn get_client_handler(
  client_id: web::Path<Uuid>,
  use_case: web::Data<Arc<GetClientUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let client = use_case
    .execute(GetClientCommand {
      client_id: *client_id,
    })
    .await?;
  Ok(HttpResponse::Ok().json(client))
}

/// PUT /api/clients/{id}
pub async fn update_client_handler(
  client_id: web::Path<Uuid>,
  request: web::Json<UpdateClientRequest>,
  use_case: web::Data<Arc<UpdateClientUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let client = use_case
    .execute(UpdateClientCommand {
      client_id: *client_id,
      name: request.name,
      address: request.address,
      contact_person: request.contact_person,
      hourly_rate: request.hourly_rate,
    })
    .await?;

  Ok(HttpResponse::Ok().json(client))
}

/// Delete client; refused while time entries exist
/// DELETE /api/clients/{id}
pub async fn delete_client_handler(
  client_id: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteClientUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(DeleteClientCommand {
      client_id: *client_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Client deleted successfully".to_string(),
  }))
}
