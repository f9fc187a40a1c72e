//! JSON HTTP API for the shelter directory.
//!
//! Exposes an axum [`Router`] backed by any
//! [`ShelterStore`](shelter_core::store::ShelterStore) and any
//! [`PlacesSearch`](shelter_core::search::PlacesSearch). Tracing, TLS and the
//! listener are the caller's responsibility.
//!
//! Routes keep their trailing slashes; `/update-location` without one is a
//! 404.

pub mod error;
pub mod location;
pub mod resources;
pub mod shelters;
pub mod unverified;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use shelter_core::{Coordinates, Error, search::PlacesSearch, store::ShelterStore};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S, P> {
  pub store:    Arc<S>,
  pub places:   Arc<P>,
  /// Search centre used until a client reports a location.
  pub fallback: Coordinates,
}

// Derived `Clone` would require `S: Clone` and `P: Clone`.
impl<S, P> Clone for AppState<S, P> {
  fn clone(&self) -> Self {
    Self {
      store:    self.store.clone(),
      places:   self.places.clone(),
      fallback: self.fallback,
    }
  }
}

/// A required name field. Whitespace-only counts as missing.
pub(crate) fn non_blank(name: Option<String>) -> Result<String, Error> {
  name
    .filter(|n| !n.trim().is_empty())
    .ok_or(Error::MissingField("name"))
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
pub fn api_router<S, P>(state: AppState<S, P>) -> Router<()>
where
  S: ShelterStore + 'static,
  P: PlacesSearch + 'static,
{
  Router::new()
    // Location
    .route("/update-location/", post(location::update::<S, P>))
    // Directory
    .route("/fetch-shelters/", get(shelters::fetch::<S, P>))
    // Resource ledger
    .route(
      "/shelter-resources/",
      get(resources::get_by_name::<S, P>).post(resources::upsert::<S, P>),
    )
    // Unverified shelters
    .route("/unverified-shelters/", post(unverified::create::<S, P>))
    .route(
      "/unverified-shelters/{id}/",
      get(unverified::get_one::<S, P>)
        .put(unverified::replace::<S, P>)
        .patch(unverified::merge::<S, P>),
    )
    .route("/api/unverified-shelters/", get(unverified::list::<S, P>))
    .with_state(state)
}
