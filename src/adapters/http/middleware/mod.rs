pub mod request_id;
pub mod security_headers;

pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdExt, RequestIdMiddleware};
pub use security_headers::SecurityHeadersMiddleware;
