use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hourbook::{
  adapters::http::{
    ApiDependencies, RequestIdMiddleware, SecurityHeadersMiddleware, configure_api_routes,
    health_handler,
  },
  domain::client::ClientService,
  domain::invoice::{
    DocumentRenderer, InvoiceService, InvoiceServiceDependencies, InvoiceSettings,
  },
  domain::profile::ProfileService,
  domain::time_entry::TimeEntryService,
  infrastructure::{
    config::{Config, RendererKind},
    documents::{FilesystemDocumentStore, HtmlInvoiceRenderer, WkHtmlToPdfRenderer},
    persistence::sqlite::{
      self, SqliteClientRepository, SqliteInvoiceNumberSequence, SqliteInvoiceRepository,
      SqliteProfileRepository, SqliteTimeEntryRepository,
    },
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hourbook=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting hourbook");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  tracing::info!("Connecting to database: {}", config.database.url);
  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    sqlite::connect(
      &config.database.url,
      config.database.max_connections,
      Duration::from_secs(config.database.acquire_timeout_seconds),
    ),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds",
      config.database.connect_timeout_seconds
    );
    anyhow::anyhow!(
      "Database connection timed out after {} seconds",
      config.database.connect_timeout_seconds
    )
  })?
  .with_context(|| format!("Could not open database at {}", config.database.url))?;
  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlite::run_migrations(&db_pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let client_repo = Arc::new(SqliteClientRepository::new(db_pool.clone()));
  let time_entry_repo = Arc::new(SqliteTimeEntryRepository::new(db_pool.clone()));
  let profile_repo = Arc::new(SqliteProfileRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(SqliteInvoiceRepository::new(db_pool.clone()));
  let number_sequence = Arc::new(SqliteInvoiceNumberSequence::new(db_pool.clone()));

  // Initialize document rendering and storage
  let html_renderer = HtmlInvoiceRenderer::new().context("Failed to load invoice template")?;
  let renderer: Arc<dyn DocumentRenderer> = match config.documents.renderer {
    RendererKind::Html => Arc::new(html_renderer),
    RendererKind::Wkhtmltopdf => {
      let pdf = WkHtmlToPdfRenderer::new(html_renderer, config.documents.wkhtmltopdf_path.clone());
      pdf
        .verify_installed()
        .await
        .context("PDF rendering is configured but wkhtmltopdf is unavailable")?;
      Arc::new(pdf)
    }
  };
  let document_store = Arc::new(FilesystemDocumentStore::new(&config.documents.output_dir));
  tracing::info!(
    "Rendering {:?} invoices into {}",
    config.documents.renderer,
    config.documents.output_dir
  );

  // Initialize services
  let client_service = Arc::new(ClientService::new(client_repo.clone()));
  let time_entry_service = Arc::new(TimeEntryService::new(
    time_entry_repo.clone(),
    client_repo.clone(),
  ));
  let profile_service = Arc::new(ProfileService::new(profile_repo.clone()));
  let invoice_service = Arc::new(InvoiceService::new(
    InvoiceServiceDependencies {
      invoice_repo,
      number_sequence,
      client_repo,
      time_entry_repo,
      profile_repo,
      renderer,
      document_store,
    },
    InvoiceSettings::from(&config.invoicing),
  ));

  let api = ApiDependencies::new(
    client_service,
    time_entry_service,
    profile_service,
    invoice_service,
  );

  let server_host = config.server.host.clone();
  let server_port = config.server.port;
  let static_dir = config.server.static_dir.clone();

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let app = App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(SecurityHeadersMiddleware::new())
      .wrap(Logger::default())
      .app_data(web::Data::new(db_pool.clone()))
      .service(web::scope("/api").configure(|cfg| configure_api_routes(cfg, api.clone())))
      .route("/health", web::get().to(health_handler));

    match &static_dir {
      Some(dir) => app.service(fs::Files::new("/static", dir)),
      None => app,
    }
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await?;

  Ok(())
}
