//! Shelter directory entries discovered through the places search.
//!
//! The directory is keyed by shelter `name`. The resource ledger uses the
//! same name to find a shelter's `place` identifier, so names are the join
//! key between the two tables and renaming a shelter orphans its resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, location::Coordinates};

// ─── Stored record ───────────────────────────────────────────────────────────

/// A persisted directory entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelterLocation {
  pub name:      String,
  pub latitude:  f64,
  pub longitude: f64,
  /// Opaque identifier assigned by the places provider (e.g. `places/ChIJ…`).
  pub place:     String,
  /// When the shelter was first discovered; later upserts keep it.
  pub timestamp: DateTime<Utc>,
}

/// Input to [`crate::store::ShelterStore::upsert_shelter`], and the entry
/// shape returned by the fetch-shelters endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShelterLocation {
  pub latitude:  f64,
  pub longitude: f64,
  pub name:      String,
  pub place:     String,
}

// ─── Search candidates ───────────────────────────────────────────────────────

/// One usable result from the places search. Results lacking a name or a
/// location never become candidates; the place identifier may still be
/// missing and is checked by [`validate_candidates`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
  pub name:      String,
  pub latitude:  f64,
  pub longitude: f64,
  pub place:     Option<String>,
}

impl PlaceCandidate {
  pub fn coordinates(&self) -> Coordinates {
    Coordinates::new(self.latitude, self.longitude)
  }
}

/// Turn search candidates into directory entries, rejecting the whole list
/// if any entry has a blank name or no place identifier.
///
/// Runs before anything is written, so a bad list leaves the directory
/// untouched.
pub fn validate_candidates(
  candidates: Vec<PlaceCandidate>,
) -> Result<Vec<NewShelterLocation>> {
  candidates
    .into_iter()
    .enumerate()
    .map(|(index, c)| {
      if c.name.trim().is_empty() {
        return Err(Error::InvalidShelterList(format!(
          "entry {index} has a blank name"
        )));
      }
      let place = c
        .place
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| {
          Error::InvalidShelterList(format!(
            "entry {index} ({:?}) has no place identifier",
            c.name
          ))
        })?;
      Ok(NewShelterLocation {
        latitude: c.latitude,
        longitude: c.longitude,
        name: c.name,
        place,
      })
    })
    .collect()
}
