use actix_web::web;
use std::sync::Arc;

use crate::application::client::{
  CreateClientUseCase, DeleteClientUseCase, GetClientUseCase, ListClientsUseCase,
  UpdateClientUseCase,
};
use crate::application::invoice::{
  ChangeInvoiceStatusUseCase, DeleteInvoiceUseCase, GenerateInvoiceUseCase,
  GetDashboardMetricsUseCase, GetInvoiceDetailsUseCase, GetInvoiceDocumentUseCase,
  ListInvoicesUseCase,
};
use crate::application::profile::{GetProfileUseCase, SaveProfileUseCase};
use crate::application::time_entry::{
  ChangeTimeEntryStatusUseCase, CreateTimeEntryUseCase, DeleteTimeEntryUseCase,
  GetTimeEntryUseCase, ListTimeEntriesUseCase, UpdateTimeEntryUseCase,
};
use crate::domain::client::ClientService;
use crate::domain::invoice::InvoiceService;
use crate::domain::profile::ProfileService;
use crate::domain::time_entry::TimeEntryService;

use super::handlers::{clients, invoices, profile, time_entries};

/// Every use case the JSON API dispatches to
#[derive(Clone)]
pub struct ApiDependencies {
  pub create_client: Arc<CreateClientUseCase>,
  pub list_clients: Arc<ListClientsUseCase>,
  pub get_client: Arc<GetClientUseCase>,
  pub update_client: Arc<UpdateClientUseCase>,
  pub delete_client: Arc<DeleteClientUseCase>,
  pub create_time_entry: Arc<CreateTimeEntryUseCase>,
  pub list_time_entries: Arc<ListTimeEntriesUseCase>,
  pub get_time_entry: Arc<GetTimeEntryUseCase>,
  pub update_time_entry: Arc<UpdateTimeEntryUseCase>,
  pub change_time_entry_status: Arc<ChangeTimeEntryStatusUseCase>,
  pub delete_time_entry: Arc<DeleteTimeEntryUseCase>,
  pub get_profile: Arc<GetProfileUseCase>,
  pub save_profile: Arc<SaveProfileUseCase>,
  pub generate_invoice: Arc<GenerateInvoiceUseCase>,
  pub list_invoices: Arc<ListInvoicesUseCase>,
  pub get_invoice_details: Arc<GetInvoiceDetailsUseCase>,
  pub change_invoice_status: Arc<ChangeInvoiceStatusUseCase>,
  pub delete_invoice: Arc<DeleteInvoiceUseCase>,
  pub get_invoice_document: Arc<GetInvoiceDocumentUseCase>,
  pub dashboard: Arc<GetDashboardMetricsUseCase>,
}

impl ApiDependencies {
  pub fn new(
    client_service: Arc<ClientService>,
    time_entry_service: Arc<TimeEntryService>,
    profile_service: Arc<ProfileService>,
    invoice_service: Arc<InvoiceService>,
  ) -> Self {
    Self {
      create_client: Arc::new(CreateClientUseCase::new(client_service.clone())),
      list_clients: Arc::new(ListClientsUseCase::new(client_service.clone())),
      get_client: Arc::new(GetClientUseCase::new(client_service.clone())),
      update_client: Arc::new(UpdateClientUseCase::new(client_service.clone())),
      delete_client: Arc::new(DeleteClientUseCase::new(client_service)),
      create_time_entry: Arc::new(CreateTimeEntryUseCase::new(time_entry_service.clone())),
      list_time_entries: Arc::new(ListTimeEntriesUseCase::new(time_entry_service.clone())),
      get_time_entry: Arc::new(GetTimeEntryUseCase::new(time_entry_service.clone())),
      update_time_entry: Arc::new(UpdateTimeEntryUseCase::new(time_entry_service.clone())),
      change_time_entry_status: Arc::new(ChangeTimeEntryStatusUseCase::new(
        time_entry_service.clone(),
      )),
      delete_time_entry: Arc::new(DeleteTimeEntryUseCase::new(time_entry_service)),
      get_profile: Arc::new(GetProfileUseCase::new(profile_service.clone())),
      save_profile: Arc::new(SaveProfileUseCase::new(profile_service)),
      generate_invoice: Arc::new(GenerateInvoiceUseCase::new(invoice_service.clone())),
      list_invoices: Arc::new(ListInvoicesUseCase::new(invoice_service.clone())),
      get_invoice_details: Arc::new(GetInvoiceDetailsUseCase::new(invoice_service.clone())),
      change_invoice_status: Arc::new(ChangeInvoiceStatusUseCase::new(invoice_service.clone())),
      delete_invoice: Arc::new(DeleteInvoiceUseCase::new(invoice_service.clone())),
      get_invoice_document: Arc::new(GetInvoiceDocumentUseCase::new(invoice_service.clone())),
      dashboard: Arc::new(GetDashboardMetricsUseCase::new(invoice_service)),
    }
  }
}

/// Configure the JSON API
///
/// Mount under a scope such as `/api`.
///
/// # Routes
///
/// - GET/POST /clients, GET/PUT/DELETE /clients/{id}
/// - GET/POST /time-entries, GET/PUT/DELETE /time-entries/{id},
///   PUT /time-entries/{id}/status
/// - GET/PUT /profile
/// - GET/POST /invoices, GET/DELETE /invoices/{id},
///   PUT /invoices/{id}/status, GET /invoices/{id}/document
/// - GET /dashboard
pub fn configure_api_routes(cfg: &mut web::ServiceConfig, deps: ApiDependencies) {
  cfg
    .app_data(web::Data::new(deps.create_client))
    .app_data(web::Data::new(deps.list_clients))
    .app_data(web::Data::new(deps.get_client))
    .app_data(web::Data::new(deps.update_client))
    .app_data(web::Data::new(deps.delete_client))
    .app_data(web::Data::new(deps.create_time_entry))
    .app_data(web::Data::new(deps.list_time_entries))
    .app_data(web::Data::new(deps.get_time_entry))
    .app_data(web::Data::new(deps.update_time_entry))
    .app_data(web::Data::new(deps.change_time_entry_status))
    .app_data(web::Data::new(deps.delete_time_entry))
    .app_data(web::Data::new(deps.get_profile))
    .app_data(web::Data::new(deps.save_profile))
    .app_data(web::Data::new(deps.generate_invoice))
    .app_data(web::Data::new(deps.list_invoices))
    .app_data(web::Data::new(deps.get_invoice_details))
    .app_data(web::Data::new(deps.change_invoice_status))
    .app_data(web::Data::new(deps.delete_invoice))
    .app_data(web::Data::new(deps.get_invoice_document))
    .app_data(web::Data::new(deps.dashboard))
    // Clients
    .service(
      web::resource("/clients")
        .route(web::get().to(clients::list_clients_handler))
        .route(web::post().to(clients::create_client_handler)),
    )
    .service(
      web::resource("/clients/{id}")
        .route(web::get().to(clients::get_client_handler))
        .route(web::put().to(clients::update_client_handler))
        .route(web::delete().to(clients::delete_client_handler)),
    )
    // Time entries
    .service(
      web::resource("/time-entries")
        .route(web::get().to(time_entries::list_time_entries_handler))
        .route(web::post().to(time_entries::create_time_entry_handler)),
    )
    .service(
      web::resource("/time-entries/{id}")
        .route(web::get().to(time_entries::get_time_entry_handler))
        .route(web::put().to(time_entries::update_time_entry_handler))
        .route(web::delete().to(time_entries::delete_time_entry_handler)),
    )
    .route(
      "/time-entries/{id}/status",
      web::put().to(time_entries::change_time_entry_status_handler),
    )
    // Profile
    .service(
      web::resource("/profile")
        .route(web::get().to(profile::get_profile_handler))
        .route(web::put().to(profile::save_profile_handler)),
    )
    // Invoices
    .service(
      web::resource("/invoices")
        .route(web::get().to(invoices::list_invoices_handler))
        .route(web::post().to(invoices::generate_invoice_handler)),
    )
    .service(
      web::resource("/invoices/{id}")
        .route(web::get().to(invoices::get_invoice_handler))
        .route(web::delete().to(invoices::delete_invoice_handler)),
    )
    .route(
      "/invoices/{id}/status",
      web::put().to(invoices::change_invoice_status_handler),
    )
    .route(
      "/invoices/{id}/document",
      web::get().to(invoices::get_invoice_document_handler),
    )
    .route("/dashboard", web::get().to(invoices::dashboard_handler));
}
