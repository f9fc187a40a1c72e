//! Handlers for community-submitted shelters.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `POST`  | `/unverified-shelters/` | Body: [`UnverifiedShelterBody`]; 201 + [`UnverifiedShelterView`] |
//! | `GET`   | `/unverified-shelters/{id}/` | 404 if not found |
//! | `PUT`   | `/unverified-shelters/{id}/` | Full body, same rules as create |
//! | `PATCH` | `/unverified-shelters/{id}/` | Supplied fields merged over the stored record |
//! | `GET`   | `/api/unverified-shelters/` | Every submission, oldest first |
//!
//! Records are stored flat; the wire shape nests coordinates under
//! `location` and supplies under `amenities`:
//!
//! | Stored | Wire |
//! |--------|------|
//! | `latitude`, `longitude` | `location.latitude`, `location.longitude` |
//! | `available_beds` | `amenities.numberOfBeds` |
//! | `available_food` | `amenities.food` |
//! | `available_medical_supplies` | `amenities.firstAid` |
//! | `water`, `electricity` | `amenities.water`, `amenities.electricity` |

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use shelter_core::{
  Coordinates, Error,
  search::PlacesSearch,
  store::ShelterStore,
  unverified::{NewUnverifiedShelter, UnverifiedShelter},
};

use crate::{AppState, error::ApiError, non_blank};

// ─── Request body ─────────────────────────────────────────────────────────────

/// A submission or edit as posted. Every field is optional so that a missing
/// one is reported by name rather than as a decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct UnverifiedShelterBody {
  pub name:           Option<String>,
  pub total_capacity: Option<i64>,
  #[serde(default)]
  pub location:       LocationFields,
  #[serde(default)]
  pub amenities:      AmenityFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocationFields {
  pub latitude:  Option<f64>,
  pub longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityFields {
  pub number_of_beds: Option<i64>,
  pub food:           Option<bool>,
  pub first_aid:      Option<bool>,
  pub water:          Option<bool>,
  pub electricity:    Option<bool>,
}

impl UnverifiedShelterBody {
  /// Validate a full submission. `total_capacity` defaults to zero.
  pub fn into_new(self) -> Result<NewUnverifiedShelter, Error> {
    let Self { name, total_capacity, location, amenities } = self;
    Ok(NewUnverifiedShelter {
      name:                       non_blank(name)?,
      latitude:                   location
        .latitude
        .ok_or(Error::MissingField("location.latitude"))?,
      longitude:                  location
        .longitude
        .ok_or(Error::MissingField("location.longitude"))?,
      total_capacity:             total_capacity.unwrap_or(0),
      available_beds:             amenities
        .number_of_beds
        .ok_or(Error::MissingField("amenities.numberOfBeds"))?,
      available_food:             amenities
        .food
        .ok_or(Error::MissingField("amenities.food"))?,
      available_medical_supplies: amenities
        .first_aid
        .ok_or(Error::MissingField("amenities.firstAid"))?,
      electricity:                amenities
        .electricity
        .ok_or(Error::MissingField("amenities.electricity"))?,
      water:                      amenities
        .water
        .ok_or(Error::MissingField("amenities.water"))?,
    })
  }

  /// Merge the supplied fields over `current`. Nested objects merge field by
  /// field, so `{"amenities": {"food": false}}` changes only `food`.
  pub fn apply_to(self, current: &UnverifiedShelter) -> Result<NewUnverifiedShelter, Error> {
    let base = current.to_new();
    let Self { name, total_capacity, location, amenities } = self;
    Ok(NewUnverifiedShelter {
      name:                       match name {
        Some(name) => non_blank(Some(name))?,
        None => base.name,
      },
      latitude:                   location.latitude.unwrap_or(base.latitude),
      longitude:                  location.longitude.unwrap_or(base.longitude),
      total_capacity:             total_capacity.unwrap_or(base.total_capacity),
      available_beds:             amenities.number_of_beds.unwrap_or(base.available_beds),
      available_food:             amenities.food.unwrap_or(base.available_food),
      available_medical_supplies: amenities
        .first_aid
        .unwrap_or(base.available_medical_supplies),
      electricity:                amenities.electricity.unwrap_or(base.electricity),
      water:                      amenities.water.unwrap_or(base.water),
    })
  }
}

// ─── Response view ────────────────────────────────────────────────────────────

/// The nested wire shape of a stored record. Posting it back to create
/// reproduces the same stored fields; `id` is ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnverifiedShelterView {
  pub id:             i64,
  pub name:           String,
  pub total_capacity: i64,
  pub location:       Coordinates,
  pub amenities:      Amenities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenities {
  pub number_of_beds: i64,
  pub food:           bool,
  pub first_aid:      bool,
  pub water:          bool,
  pub electricity:    bool,
}

impl From<&UnverifiedShelter> for UnverifiedShelterView {
  fn from(s: &UnverifiedShelter) -> Self {
    Self {
      id:             s.id,
      name:           s.name.clone(),
      total_capacity: s.total_capacity,
      location:       s.coordinates(),
      amenities:      Amenities {
        number_of_beds: s.available_beds,
        food:           s.available_food,
        first_aid:      s.available_medical_supplies,
        water:          s.water,
        electricity:    s.electricity,
      },
    }
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /unverified-shelters/`
pub async fn create<S, P>(
  State(state): State<AppState<S, P>>,
  body: Result<Json<UnverifiedShelterBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ShelterStore,
  P: PlacesSearch,
{
  let Json(body) = body?;
  let input = body.into_new()?;
  let shelter = state
    .store
    .create_unverified(input)
    .await
    .map_err(ApiError::backend)?;

  tracing::info!(id = shelter.id, name = %shelter.name, "unverified shelter submitted");
  Ok((StatusCode::CREATED, Json(UnverifiedShelterView::from(&shelter))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /unverified-shelters/{id}/`
pub async fn get_one<S, P>(
  State(state): State<AppState<S, P>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UnverifiedShelterView>, ApiError>
where
  S: ShelterStore,
  P: PlacesSearch,
{
  let Path(id) = id?;
  let shelter = state
    .store
    .get_unverified(id)
    .await
    .map_err(ApiError::backend)?
    .ok_or(Error::UnverifiedShelterNotFound(id))?;
  Ok(Json(UnverifiedShelterView::from(&shelter)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /unverified-shelters/{id}/`
pub async fn replace<S, P>(
  State(state): State<AppState<S, P>>,
  id: Result<Path<i64>, PathRejection>,
  body: Result<Json<UnverifiedShelterBody>, JsonRejection>,
) -> Result<Json<UnverifiedShelterView>, ApiError>
where
  S: ShelterStore,
  P: PlacesSearch,
{
  let Path(id) = id?;
  let Json(body) = body?;
  let input = body.into_new()?;
  let shelter = state
    .store
    .update_unverified(id, input)
    .await
    .map_err(ApiError::backend)?;
  Ok(Json(UnverifiedShelterView::from(&shelter)))
}

/// `PATCH /unverified-shelters/{id}/`
pub async fn merge<S, P>(
  State(state): State<AppState<S, P>>,
  id: Result<Path<i64>, PathRejection>,
  body: Result<Json<UnverifiedShelterBody>, JsonRejection>,
) -> Result<Json<UnverifiedShelterView>, ApiError>
where
  S: ShelterStore,
  P: PlacesSearch,
{
  let Path(id) = id?;
  let Json(body) = body?;
  let current = state
    .store
    .get_unverified(id)
    .await
    .map_err(ApiError::backend)?
    .ok_or(Error::UnverifiedShelterNotFound(id))?;

  let input = body.apply_to(&current)?;
  let shelter = state
    .store
    .update_unverified(id, input)
    .await
    .map_err(ApiError::backend)?;
  Ok(Json(UnverifiedShelterView::from(&shelter)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /api/unverified-shelters/`
pub async fn list<S, P>(
  State(state): State<AppState<S, P>>,
) -> Result<Json<Vec<UnverifiedShelterView>>, ApiError>
where
  S: ShelterStore,
  P: PlacesSearch,
{
  let shelters = state
    .store
    .list_unverified()
    .await
    .map_err(ApiError::backend)?;
  Ok(Json(shelters.iter().map(UnverifiedShelterView::from).collect()))
}
