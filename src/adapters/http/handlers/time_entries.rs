use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
  adapters::http::{
    dtos::{
      ChangeStatusRequest, CreateTimeEntryRequest, SuccessResponse, TimeEntryQuery,
      UpdateTimeEntryRequest,
    },
    errors::ApiError,
  },
  application::time_entry::{
    ChangeTimeEntryStatusCommand, ChangeTimeEntryStatusUseCase, CreateTimeEntryCommand,
    CreateTimeEntryUseCase, DeleteTimeEntryCommand, DeleteTimeEntryUseCase, GetTimeEntryCommand,
    GetTimeEntryUseCase, ListTimeEntriesCommand, ListTimeEntriesUseCase, UpdateTimeEntryCommand,
    UpdateTimeEntryUseCase,
  },
};

/// List time entries, newest first
/// GET /api/time-entries?client_id=&start_date=&end_date=&status=
pub async fn list_time_entries_handler(
  query: web::Query<TimeEntryQuery>,
  use_case: web::Data<Arc<ListTimeEntriesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let query = query.into_inner();

  let response = use_case
    .execute(ListTimeEntriesCommand {
      client_id: query.client_id,
      start_date: query.start_date,
      end_date: query.end_date,
      status_filter: query.status,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/time-entries
pub async fn create_time_entry_handler(
  request: web::Json<CreateTimeEntryRequest>,
  use_case: web::Data<Arc<CreateTimeEntryUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let entry = use_case
    .execute(CreateTimeEntryCommand {
      client_id: request.client_id,
      title: request.title,
      timing: request.timing,
      status: request.status,
    })
    .await?;

  Ok(HttpResponse::Created().json(entry))
}

/// GET /api/time-entries/{id}
pub async fn get_time_entry_handler(
  entry_id: web::Path<Uuid>,
  use_case: web::Data<Arc<GetTimeEntryUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let entry = use_case
    .execute(GetTimeEntryCommand {
      entry_id: *entry_id,
    })
    .await?;
  Ok(HttpResponse::Ok().json(entry))
}

/// PUT /api/time-entries/{id}
pub async fn update_time_entry_handler(
  entry_id: web::Path<Uuid>,
  request: web::Json<UpdateTimeEntryRequest>,
  use_case: web::Data<Arc<UpdateTimeEntryUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let entry = use_case
    .execute(UpdateTimeEntryCommand {
      entry_id: *entry_id,
      title: request.title,
      timing: request.timing,
    })
    .await?;

  Ok(HttpResponse::Ok().json(entry))
}

/// PUT /api/time-entries/{id}/status
pub async fn change_time_entry_status_handler(
  entry_id: web::Path<Uuid>,
  request: web::Json<ChangeStatusRequest>,
  use_case: web::Data<Arc<ChangeTimeEntryStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let entry = use_case
    .execute(ChangeTimeEntryStatusCommand {
      entry_id: *entry_id,
      new_status: request.into_inner().status,
    })
    .await?;

  Ok(HttpResponse::Ok().json(entry))
}

/// DELETE /api/time-entries/{id}
pub async fn delete_time_entry_handler(
  entry_id: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteTimeEntryUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(DeleteTimeEntryCommand {
      entry_id: *entry_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Time entry deleted successfully".to_string(),
  }))
}
