//! Handlers for `/shelter-resources/`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/shelter-resources/?name=<name>` | Counts joined with the directory's `place` |
//! | `POST` | `/shelter-resources/` | Body: [`ResourcesBody`]; upsert keyed by `name` |

use axum::{
  Json,
  extract::{Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use shelter_core::{
  Error,
  resources::{ResourceReport, ShelterResources},
  search::PlacesSearch,
  store::ShelterStore,
};

use crate::{AppState, error::ApiError, non_blank};

// ─── Lookup ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NameParams {
  pub name: Option<String>,
}

/// `GET /shelter-resources/?name=<name>`
///
/// 404 when either the ledger or the directory has no row for `name`.
pub async fn get_by_name<S, P>(
  State(state): State<AppState<S, P>>,
  Query(params): Query<NameParams>,
) -> Result<Json<ResourceReport>, ApiError>
where
  S: ShelterStore,
  P: PlacesSearch,
{
  let name = non_blank(params.name)?;

  let resources = state
    .store
    .get_resources(&name)
    .await
    .map_err(ApiError::backend)?
    .ok_or_else(|| Error::ResourcesNotFound(name.clone()))?;

  let shelter = state
    .store
    .get_shelter(&name)
    .await
    .map_err(ApiError::backend)?
    .ok_or_else(|| Error::ShelterNotFound(name.clone()))?;

  Ok(Json(ResourceReport::new(resources, &shelter)))
}

// ─── Upsert ───────────────────────────────────────────────────────────────────

/// Resource counts as posted. `water` and `electricity` default to zero.
#[derive(Debug, Deserialize)]
pub struct ResourcesBody {
  pub name:        Option<String>,
  pub food:        Option<i64>,
  pub beds:        Option<i64>,
  pub water:       Option<i64>,
  pub electricity: Option<i64>,
  pub first_aid:   Option<i64>,
}

impl ResourcesBody {
  pub fn into_resources(self) -> Result<ShelterResources, Error> {
    Ok(ShelterResources {
      name:        non_blank(self.name)?,
      food:        self.food.ok_or(Error::MissingField("food"))?,
      beds:        self.beds.ok_or(Error::MissingField("beds"))?,
      water:       self.water.unwrap_or(0),
      electricity: self.electricity.unwrap_or(0),
      first_aid:   self.first_aid.ok_or(Error::MissingField("first_aid"))?,
    })
  }
}

/// `POST /shelter-resources/`
pub async fn upsert<S, P>(
  State(state): State<AppState<S, P>>,
  body: Result<Json<ResourcesBody>, JsonRejection>,
) -> Result<Json<ShelterResources>, ApiError>
where
  S: ShelterStore,
  P: PlacesSearch,
{
  let Json(body) = body?;
  let resources = body.into_resources()?;
  let stored = state
    .store
    .upsert_resources(resources)
    .await
    .map_err(ApiError::backend)?;
  Ok(Json(stored))
}
