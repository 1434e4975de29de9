use actix_web::{
  Error,
  body::MessageBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header::{HeaderName, HeaderValue},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
};

/// Inline styles stay allowed for the rendered HTML invoices.
pub const CONTENT_SECURITY_POLICY: &str =
  "default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'";

const SECURITY_HEADERS: [(&str, &str); 4] = [
  ("x-content-type-options", "nosniff"),
  ("x-frame-options", "DENY"),
  ("x-xss-protection", "1; mode=block"),
  ("content-security-policy", CONTENT_SECURITY_POLICY),
];

/// Adds browser hardening headers to every response.
#[derive(Debug, Clone, Default)]
pub struct SecurityHeadersMiddleware;

impl SecurityHeadersMiddleware {
  pub fn new() -> Self {
    Self
  }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeadersMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = SecurityHeadersMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(SecurityHeadersMiddlewareService {
      service: Rc::new(service),
    }))
  }
}

pub struct SecurityHeadersMiddlewareService<S> {
  service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      let mut res = service.call(req).await?;

      let headers = res.headers_mut();
      for (name, value) in SECURITY_HEADERS {
        headers.insert(
          HeaderName::from_static(name),
          HeaderValue::from_static(value),
        );
      }

      Ok(res)
    })
  }
}
