use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

use crate::adapters::http::dtos::HealthResponse;

/// Health check that round-trips the database
/// GET /health
pub async fn health_handler(pool: web::Data<SqlitePool>) -> HttpResponse {
  match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
    Ok(_) => HttpResponse::Ok().json(HealthResponse {
      status: "ok".to_string(),
      database: "ok".to_string(),
    }),
    Err(e) => {
      tracing::error!("Health check failed: {}", e);
      HttpResponse::ServiceUnavailable().json(HealthResponse {
        status: "unavailable".to_string(),
        database: "unreachable".to_string(),
      })
    }
  }
}
