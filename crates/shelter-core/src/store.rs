//! The `ShelterStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `shelter-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  location::{Coordinates, UserLocation},
  resources::ShelterResources,
  shelter::{NewShelterLocation, ShelterLocation},
  unverified::{NewUnverifiedShelter, UnverifiedShelter},
};

/// Abstraction over a shelter store backend.
///
/// Backend errors convert into [`crate::Error`]. Duplicate coordinates and
/// missing unverified shelters must surface as
/// [`crate::Error::DuplicateCoordinate`] and
/// [`crate::Error::UnverifiedShelterNotFound`] after conversion.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ShelterStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Location ──────────────────────────────────────────────────────────

  /// Overwrite the server-wide location and refresh its timestamp.
  fn update_location(
    &self,
    point: Coordinates,
  ) -> impl Future<Output = Result<UserLocation, Self::Error>> + Send + '_;

  /// The most recently written location, if any client ever sent one.
  fn most_recent_location(
    &self,
  ) -> impl Future<Output = Result<Option<UserLocation>, Self::Error>> + Send + '_;

  // ── Directory ─────────────────────────────────────────────────────────

  /// Insert a directory entry, or overwrite the coordinates and place of the
  /// entry with the same name.
  fn upsert_shelter(
    &self,
    input: NewShelterLocation,
  ) -> impl Future<Output = Result<ShelterLocation, Self::Error>> + Send + '_;

  fn get_shelter<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<ShelterLocation>, Self::Error>> + Send + 'a;

  // ── Resource ledger ───────────────────────────────────────────────────

  /// Insert or fully replace the counts recorded under `input.name`.
  fn upsert_resources(
    &self,
    input: ShelterResources,
  ) -> impl Future<Output = Result<ShelterResources, Self::Error>> + Send + '_;

  fn get_resources<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<ShelterResources>, Self::Error>> + Send + 'a;

  // ── Unverified shelters ───────────────────────────────────────────────

  /// Persist a new submission. Fails with a duplicate-coordinate error when
  /// any record already sits at the same coordinates.
  fn create_unverified(
    &self,
    input: NewUnverifiedShelter,
  ) -> impl Future<Output = Result<UnverifiedShelter, Self::Error>> + Send + '_;

  /// Replace every writable field of record `id`. The coordinate check
  /// ignores the record itself, so keeping its coordinates succeeds.
  fn update_unverified(
    &self,
    id: i64,
    input: NewUnverifiedShelter,
  ) -> impl Future<Output = Result<UnverifiedShelter, Self::Error>> + Send + '_;

  fn get_unverified(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<UnverifiedShelter>, Self::Error>> + Send + '_;

  /// Every submission, oldest first.
  fn list_unverified(
    &self,
  ) -> impl Future<Output = Result<Vec<UnverifiedShelter>, Self::Error>> + Send + '_;
}

/// The point to centre a shelter search on: the latest stored location, or
/// `fallback` when none has been reported.
pub async fn most_recent_coordinates<S>(
  store: &S,
  fallback: Coordinates,
) -> Result<Coordinates, S::Error>
where
  S: ShelterStore,
{
  Ok(
    store
      .most_recent_location()
      .await?
      .map_or(fallback, |loc| loc.coordinates()),
  )
}
