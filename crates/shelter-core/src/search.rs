//! The [`PlacesSearch`] trait: discovery of shelters near a point.
//!
//! Implemented by `shelter-places` against the hosted places API; tests use
//! canned stubs.

use std::future::Future;

use crate::{location::Coordinates, shelter::PlaceCandidate};

/// A shelter search provider.
pub trait PlacesSearch: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Search for emergency shelters around `point`.
  ///
  /// Results without a name or location are dropped; the remaining
  /// candidates are returned in provider order. Nothing is persisted.
  fn search_near(
    &self,
    point: Coordinates,
  ) -> impl Future<Output = Result<Vec<PlaceCandidate>, Self::Error>> + Send + '_;
}
