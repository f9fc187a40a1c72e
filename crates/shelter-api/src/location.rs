//! Handler for `POST /update-location/`.
//!
//! Body: `{"latitude": 33.75, "longitude": -84.39}`. Returns the stored
//! `{latitude, longitude, timestamp}`.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Deserialize;
use shelter_core::{
  Coordinates, Error, location::UserLocation, search::PlacesSearch, store::ShelterStore,
};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct LocationBody {
  pub latitude:  Option<f64>,
  pub longitude: Option<f64>,
}

impl LocationBody {
  /// `0.0` is a valid coordinate; only absent values are rejected.
  pub fn coordinates(&self) -> Result<Coordinates, Error> {
    let latitude = self.latitude.ok_or(Error::MissingField("latitude"))?;
    let longitude = self.longitude.ok_or(Error::MissingField("longitude"))?;
    Ok(Coordinates::new(latitude, longitude))
  }
}

/// `POST /update-location/`
pub async fn update<S, P>(
  State(state): State<AppState<S, P>>,
  body: Result<Json<LocationBody>, JsonRejection>,
) -> Result<Json<UserLocation>, ApiError>
where
  S: ShelterStore,
  P: PlacesSearch,
{
  let Json(body) = body?;
  let point = body.coordinates()?;
  let location = state
    .store
    .update_location(point)
    .await
    .map_err(ApiError::backend)?;
  Ok(Json(location))
}
