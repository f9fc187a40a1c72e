//! [`PlacesClient`]: the reqwest-backed [`PlacesSearch`] implementation.
//!
//! The API key is read from disk on first use and cached. Each request is
//! bounded by [`PlacesConfig::timeout`].

use std::{path::PathBuf, time::Duration};

use reqwest::{Client, header::CONTENT_TYPE};
use shelter_core::{
  location::Coordinates,
  search::PlacesSearch,
  shelter::PlaceCandidate,
};
use tokio::sync::OnceCell;

use crate::{
  Error, Result,
  wire::{SearchTextRequest, SearchTextResponse},
};

pub const DEFAULT_ENDPOINT: &str = "https://places.googleapis.com/v1/places:searchText";

/// Response fields requested from the provider.
pub const FIELD_MASK: &str = "places.displayName,places.location,places.name";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Longest provider error body carried into an error message.
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for [`PlacesClient`].
#[derive(Debug, Clone)]
pub struct PlacesConfig {
  pub endpoint:     String,
  /// File holding the raw API key.
  pub api_key_path: PathBuf,
  pub timeout:      Duration,
}

impl Default for PlacesConfig {
  fn default() -> Self {
    Self {
      endpoint:     DEFAULT_ENDPOINT.to_owned(),
      api_key_path: PathBuf::from("api_key"),
      timeout:      Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
  }
}

/// The free-text query sent for a point.
pub fn search_query(point: Coordinates) -> String {
  format!("emergency shelters at {} , {}", point.latitude, point.longitude)
}

/// Async client for the places `searchText` endpoint.
///
/// The API key is read at most once; rotating it requires a restart.
pub struct PlacesClient {
  client:  Client,
  config:  PlacesConfig,
  api_key: OnceCell<String>,
}

impl std::fmt::Debug for PlacesClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PlacesClient")
      .field("config", &self.config)
      .field("api_key", &self.api_key.get().map(|_| "<redacted>"))
      .finish()
  }
}

impl PlacesClient {
  pub fn new(config: PlacesConfig) -> Result<Self> {
    let client = Client::builder()
      .connect_timeout(config.timeout)
      .timeout(config.timeout)
      .build()
      .map_err(Error::Client)?;
    Ok(Self { client, config, api_key: OnceCell::new() })
  }

  pub fn config(&self) -> &PlacesConfig { &self.config }

  async fn api_key(&self) -> Result<&str> {
    let key = self
      .api_key
      .get_or_try_init(|| async {
        let path = &self.config.api_key_path;
        let raw = tokio::fs::read_to_string(path)
          .await
          .map_err(|source| Error::Credential { path: path.clone(), source })?;
        let key = raw.trim();
        if key.is_empty() {
          return Err(Error::EmptyCredential(path.clone()));
        }
        tracing::debug!(path = %path.display(), "loaded places API key");
        Ok::<_, Error>(key.to_owned())
      })
      .await?;
    Ok(key)
  }

  fn convert_reqwest_error(&self, error: reqwest::Error) -> Error {
    if error.is_timeout() {
      Error::Timeout(self.config.timeout)
    } else {
      Error::Http(error)
    }
  }

  async fn search(&self, point: Coordinates) -> Result<Vec<PlaceCandidate>> {
    let key = self.api_key().await?;
    let query = search_query(point);

    let resp = self
      .client
      .post(&self.config.endpoint)
      .header(CONTENT_TYPE, "application/json")
      .header("X-Goog-Api-Key", key)
      .header("X-Goog-FieldMask", FIELD_MASK)
      .json(&SearchTextRequest { text_query: &query })
      .send()
      .await
      .map_err(|e| self.convert_reqwest_error(e))?;

    let status = resp.status();
    let body = resp.bytes().await.map_err(|e| self.convert_reqwest_error(e))?;

    if !status.is_success() {
      let mut body = String::from_utf8_lossy(&body).into_owned();
      if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
          .rev()
          .find(|&i| body.is_char_boundary(i))
          .unwrap_or(0);
        body.truncate(cut);
      }
      return Err(Error::Status { status, body });
    }

    let response: SearchTextResponse = serde_json::from_slice(&body)?;
    let candidates = response.into_candidates();
    tracing::debug!(%query, found = candidates.len(), "places search complete");
    Ok(candidates)
  }
}

impl PlacesSearch for PlacesClient {
  type Error = Error;

  async fn search_near(&self, point: Coordinates) -> Result<Vec<PlaceCandidate>> {
    self.search(point).await.inspect_err(|e| {
      tracing::warn!(error = %e, "places search failed");
    })
  }
}
