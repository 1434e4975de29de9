pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{ErrorResponse, SuccessResponse};
pub use errors::ApiError;
pub use handlers::health::health_handler;
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware, SecurityHeadersMiddleware};
pub use routes::{ApiDependencies, configure_api_routes};
