//! Handler for `GET /fetch-shelters/`: search around the last known location
//! and record what comes back in the directory.

use axum::{Json, extract::State};
use serde::Serialize;
use shelter_core::{
  search::PlacesSearch,
  shelter::{NewShelterLocation, validate_candidates},
  store::{ShelterStore, most_recent_coordinates},
};

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct ShelterList {
  pub coordinates: Vec<NewShelterLocation>,
}

/// `GET /fetch-shelters/`
///
/// The whole list is validated before the first upsert, so a rejected list
/// writes nothing.
pub async fn fetch<S, P>(
  State(state): State<AppState<S, P>>,
) -> Result<Json<ShelterList>, ApiError>
where
  S: ShelterStore,
  P: PlacesSearch,
{
  let point = most_recent_coordinates(state.store.as_ref(), state.fallback)
    .await
    .map_err(ApiError::backend)?;

  let candidates = state
    .places
    .search_near(point)
    .await
    .map_err(ApiError::backend)?;
  let found = candidates.len();

  let entries = validate_candidates(candidates)?;
  for entry in &entries {
    state
      .store
      .upsert_shelter(entry.clone())
      .await
      .map_err(ApiError::backend)?;
  }

  tracing::info!(
    latitude = point.latitude,
    longitude = point.longitude,
    found,
    saved = entries.len(),
    "fetched shelters"
  );
  Ok(Json(ShelterList { coordinates: entries }))
}
