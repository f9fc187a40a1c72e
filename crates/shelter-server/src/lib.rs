//! Configuration and router assembly for the shelter server binary.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use axum::Router;
use serde::Deserialize;
use shelter_api::{AppState, api_router};
use shelter_core::{
  Coordinates, location::DEFAULT_LOCATION, search::PlacesSearch, store::ShelterStore,
};
use shelter_places::{DEFAULT_ENDPOINT, PlacesConfig};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SHELTER_*` environment variables. Every key is optional.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub store_path:          PathBuf,
  pub places_endpoint:     String,
  /// File holding the places API key.
  pub api_key_path:        PathBuf,
  pub places_timeout_secs: u64,
  pub fallback_latitude:   f64,
  pub fallback_longitude:  f64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                "127.0.0.1".to_string(),
      port:                8000,
      store_path:          PathBuf::from("shelters.sqlite3"),
      places_endpoint:     DEFAULT_ENDPOINT.to_string(),
      api_key_path:        PathBuf::from("api_key"),
      places_timeout_secs: 10,
      fallback_latitude:   DEFAULT_LOCATION.latitude,
      fallback_longitude:  DEFAULT_LOCATION.longitude,
    }
  }
}

impl ServerConfig {
  /// Load from an optional TOML file, with `SHELTER_*` variables on top.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("SHELTER").try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn fallback(&self) -> Coordinates {
    Coordinates::new(self.fallback_latitude, self.fallback_longitude)
  }

  pub fn places_config(&self) -> PlacesConfig {
    PlacesConfig {
      endpoint:     self.places_endpoint.clone(),
      api_key_path: expand_tilde(&self.api_key_path),
      timeout:      Duration::from_secs(self.places_timeout_secs),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router with request tracing.
pub fn router<S, P>(state: AppState<S, P>) -> Router
where
  S: ShelterStore + 'static,
  P: PlacesSearch + 'static,
{
  api_router(state).layer(TraceLayer::new_for_http())
}
