use actix_web::{
  HttpResponse,
  http::header::{ContentDisposition, DispositionParam, DispositionType},
  web,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
  adapters::http::{
    dtos::{ChangeStatusRequest, DashboardQuery, GenerateInvoiceRequest, InvoiceQuery, SuccessResponse},
    errors::ApiError,
  },
  application::invoice::{
    ChangeInvoiceStatusCommand, ChangeInvoiceStatusUseCase, DeleteInvoiceCommand,
    DeleteInvoiceUseCase, GenerateInvoiceCommand, GenerateInvoiceUseCase,
    GetDashboardMetricsCommand, GetDashboardMetricsUseCase, GetInvoiceDetailsCommand,
    GetInvoiceDetailsUseCase, GetInvoiceDocumentCommand, GetInvoiceDocumentUseCase,
    ListInvoicesCommand, ListInvoicesUseCase,
  },
};

/// List invoices, newest first
/// GET /api/invoices?status=&client_id=
pub async fn list_invoices_handler(
  query: web::Query<InvoiceQuery>,
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let query = query.into_inner();

  let response = use_case
    .execute(ListInvoicesCommand {
      status_filter: query.status,
      client_filter: query.client_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Generate and issue an invoice for a client's completed entries
/// POST /api/invoices
pub async fn generate_invoice_handler(
  request: web::Json<GenerateInvoiceRequest>,
  use_case: web::Data<Arc<GenerateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let invoice = use_case
    .execute(GenerateInvoiceCommand {
      client_id: request.client_id,
      start_date: request.start_date,
      end_date: request.end_date,
      language: request.language,
    })
    .await?;

  Ok(HttpResponse::Created().json(invoice))
}

/// GET /api/invoices/{id}
pub async fn get_invoice_handler(
  invoice_id: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoiceDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoice = use_case
    .execute(GetInvoiceDetailsCommand {
      invoice_id: *invoice_id,
    })
    .await?;
  Ok(HttpResponse::Ok().json(invoice))
}

/// PUT /api/invoices/{id}/status
pub async fn change_invoice_status_handler(
  invoice_id: web::Path<Uuid>,
  request: web::Json<ChangeStatusRequest>,
  use_case: web::Data<Arc<ChangeInvoiceStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();

  let response = use_case
    .execute(ChangeInvoiceStatusCommand {
      invoice_id: *invoice_id,
      new_status: request.status,
      paid_date: request.paid_date,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/invoices/{id}
pub async fn delete_invoice_handler(
  invoice_id: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(DeleteInvoiceCommand {
      invoice_id: *invoice_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Invoice deleted successfully".to_string(),
  }))
}

/// Stored invoice document as an attachment
/// GET /api/invoices/{id}/document
pub async fn get_invoice_document_handler(
  invoice_id: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoiceDocumentUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let document = use_case
    .execute(GetInvoiceDocumentCommand {
      invoice_id: *invoice_id,
    })
    .await?;

  Ok(
    HttpResponse::Ok()
      .content_type(document.content_type)
      .insert_header(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(document.file_name)],
      })
      .body(document.bytes),
  )
}

/// GET /api/dashboard?period=month|quarter|year&year=&month=
pub async fn dashboard_handler(
  query: web::Query<DashboardQuery>,
  use_case: web::Data<Arc<GetDashboardMetricsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let query = query.into_inner();

  let metrics = use_case
    .execute(GetDashboardMetricsCommand {
      period: query.period,
      year: query.year,
      month: query.month,
    })
    .await?;

  Ok(HttpResponse::Ok().json(metrics))
}
