//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("bad gateway: {0}")]
  BadGateway(String),

  #[error("gateway timeout: {0}")]
  GatewayTimeout(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Convert a store or search backend error.
  pub fn backend<E: Into<shelter_core::Error>>(e: E) -> Self {
    let core: shelter_core::Error = e.into();
    core.into()
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
      ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<shelter_core::Error> for ApiError {
  fn from(e: shelter_core::Error) -> Self {
    use shelter_core::Error as E;
    match e {
      E::MissingField(_) | E::InvalidShelterList(_) | E::DuplicateCoordinate { .. } => {
        ApiError::BadRequest(e.to_string())
      }
      E::ShelterNotFound(_) | E::ResourcesNotFound(_) | E::UnverifiedShelterNotFound(_) => {
        ApiError::NotFound(e.to_string())
      }
      E::Upstream(_) => ApiError::BadGateway(e.to_string()),
      E::UpstreamTimeout(_) => ApiError::GatewayTimeout(e.to_string()),
      E::Store(inner) => ApiError::Store(inner),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

// A segment that does not parse as an id names no resource.
impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    ApiError::NotFound(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      ApiError::NotFound(m)
      | ApiError::BadRequest(m)
      | ApiError::BadGateway(m)
      | ApiError::GatewayTimeout(m) => m.clone(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        e.to_string()
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use shelter_core::Error;

  use super::*;

  #[test]
  fn core_errors_map_to_statuses() {
    let cases = [
      (Error::MissingField("name"), StatusCode::BAD_REQUEST),
      (Error::InvalidShelterList("x".into()), StatusCode::BAD_REQUEST),
      (
        Error::DuplicateCoordinate { latitude: 1.0, longitude: 2.0 },
        StatusCode::BAD_REQUEST,
      ),
      (Error::ShelterNotFound("x".into()), StatusCode::NOT_FOUND),
      (Error::ResourcesNotFound("x".into()), StatusCode::NOT_FOUND),
      (Error::UnverifiedShelterNotFound(3), StatusCode::NOT_FOUND),
      (Error::Upstream("down".into()), StatusCode::BAD_GATEWAY),
      (Error::UpstreamTimeout(Duration::from_secs(10)), StatusCode::GATEWAY_TIMEOUT),
      (
        Error::store(std::io::Error::other("disk")),
        StatusCode::INTERNAL_SERVER_ERROR,
      ),
    ];

    for (core, expected) in cases {
      assert_eq!(ApiError::from(core).status(), expected);
    }
  }

  #[test]
  fn message_keeps_core_wording() {
    let err = ApiError::from(Error::MissingField("name"));
    assert!(matches!(err, ApiError::BadRequest(ref m) if m == "name is required"));
  }
}
