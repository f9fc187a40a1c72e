//! Error type for `shelter-places`.

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to read API key from {}: {source}", path.display())]
  Credential {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("API key file {} is empty", .0.display())]
  EmptyCredential(PathBuf),

  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("request timed out after {0:?}")]
  Timeout(Duration),

  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("provider returned {status}: {body}")]
  Status {
    status: reqwest::StatusCode,
    body:   String,
  },

  #[error("malformed response body: {0}")]
  Decode(#[from] serde_json::Error),
}

impl From<Error> for shelter_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Timeout(after) => Self::UpstreamTimeout(after),
      other => Self::Upstream(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
