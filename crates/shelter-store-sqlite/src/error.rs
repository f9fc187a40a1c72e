//! Error type for `shelter-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Rejected by the pre-save check or by the `UNIQUE (latitude, longitude)`
  /// constraint; callers cannot tell which.
  #[error("a shelter already exists at ({latitude}, {longitude})")]
  DuplicateCoordinate { latitude: f64, longitude: f64 },

  #[error("unverified shelter not found: {0}")]
  UnverifiedShelterNotFound(i64),
}

impl From<Error> for shelter_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::DuplicateCoordinate { latitude, longitude } => {
        Self::DuplicateCoordinate { latitude, longitude }
      }
      Error::UnverifiedShelterNotFound(id) => Self::UnverifiedShelterNotFound(id),
      other => Self::store(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
