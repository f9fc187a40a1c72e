//! Community-submitted shelters awaiting moderation.
//!
//! Records are stored flat. No two records may share a
//! `(latitude, longitude)` pair; stores enforce this with a pre-save check
//! and a unique constraint, and report either as
//! [`Error::DuplicateCoordinate`](crate::Error::DuplicateCoordinate).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::location::Coordinates;

/// A persisted unverified shelter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnverifiedShelter {
  pub id:                         i64,
  pub name:                       String,
  pub latitude:                   f64,
  pub longitude:                  f64,
  /// Reported by the submitter; not derived from the amenities.
  pub total_capacity:             i64,
  pub available_beds:             i64,
  pub available_food:             bool,
  pub available_medical_supplies: bool,
  pub electricity:                bool,
  pub water:                      bool,
  pub created_at:                 DateTime<Utc>,
  pub updated_at:                 DateTime<Utc>,
}

impl UnverifiedShelter {
  pub fn coordinates(&self) -> Coordinates {
    Coordinates::new(self.latitude, self.longitude)
  }

  /// The writable fields, e.g. as the base for a partial update.
  pub fn to_new(&self) -> NewUnverifiedShelter {
    NewUnverifiedShelter {
      name:                       self.name.clone(),
      latitude:                   self.latitude,
      longitude:                  self.longitude,
      total_capacity:             self.total_capacity,
      available_beds:             self.available_beds,
      available_food:             self.available_food,
      available_medical_supplies: self.available_medical_supplies,
      electricity:                self.electricity,
      water:                      self.water,
    }
  }
}

/// Input to the store's create and update operations. `id` and the
/// timestamps are always set by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUnverifiedShelter {
  pub name:                       String,
  pub latitude:                   f64,
  pub longitude:                  f64,
  pub total_capacity:             i64,
  pub available_beds:             i64,
  pub available_food:             bool,
  pub available_medical_supplies: bool,
  pub electricity:                bool,
  pub water:                      bool,
}

impl NewUnverifiedShelter {
  pub fn coordinates(&self) -> Coordinates {
    Coordinates::new(self.latitude, self.longitude)
  }
}
