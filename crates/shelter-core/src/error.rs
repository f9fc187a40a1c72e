//! Error types for `shelter-core`.
//!
//! Every backend error converts into [`Error`]; the API layer maps each
//! variant to an HTTP status.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required request field was absent.
  #[error("{0} is required")]
  MissingField(&'static str),

  /// The shelter list assembled from a places search failed validation.
  #[error("invalid shelter list: {0}")]
  InvalidShelterList(String),

  #[error("a shelter already exists at ({latitude}, {longitude})")]
  DuplicateCoordinate { latitude: f64, longitude: f64 },

  #[error("shelter not found: {0:?}")]
  ShelterNotFound(String),

  #[error("no resources recorded for shelter {0:?}")]
  ResourcesNotFound(String),

  #[error("unverified shelter not found: {0}")]
  UnverifiedShelterNotFound(i64),

  #[error("places search failed: {0}")]
  Upstream(String),

  #[error("places search timed out after {0:?}")]
  UpstreamTimeout(Duration),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend failure that carries no domain meaning.
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
