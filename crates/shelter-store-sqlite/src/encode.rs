//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Booleans are stored as
//! integers by rusqlite.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use shelter_core::{
  location::UserLocation,
  resources::ShelterResources,
  shelter::ShelterLocation,
  unverified::UnverifiedShelter,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Constraint failures ─────────────────────────────────────────────────────

/// Whether `e` is a `UNIQUE` constraint failure.
pub fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _)
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read from the `user_location` row.
pub struct RawUserLocation {
  pub latitude:  f64,
  pub longitude: f64,
  pub timestamp: String,
}

impl RawUserLocation {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      latitude:  row.get(0)?,
      longitude: row.get(1)?,
      timestamp: row.get(2)?,
    })
  }

  pub fn into_location(self) -> Result<UserLocation> {
    Ok(UserLocation {
      latitude:  self.latitude,
      longitude: self.longitude,
      timestamp: decode_dt(&self.timestamp)?,
    })
  }
}

pub const SHELTER_COLUMNS: &str = "name, latitude, longitude, place, timestamp";

/// Raw values read from a `shelters` row, in [`SHELTER_COLUMNS`] order.
pub struct RawShelter {
  pub name:      String,
  pub latitude:  f64,
  pub longitude: f64,
  pub place:     String,
  pub timestamp: String,
}

impl RawShelter {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      name:      row.get(0)?,
      latitude:  row.get(1)?,
      longitude: row.get(2)?,
      place:     row.get(3)?,
      timestamp: row.get(4)?,
    })
  }

  pub fn into_shelter(self) -> Result<ShelterLocation> {
    Ok(ShelterLocation {
      name:      self.name,
      latitude:  self.latitude,
      longitude: self.longitude,
      place:     self.place,
      timestamp: decode_dt(&self.timestamp)?,
    })
  }
}

pub const RESOURCE_COLUMNS: &str = "name, food, beds, water, electricity, first_aid";

/// Decode a `shelter_resources` row in [`RESOURCE_COLUMNS`] order. Every
/// column maps directly, so no raw intermediate is needed.
pub fn resources_from_row(row: &Row<'_>) -> rusqlite::Result<ShelterResources> {
  Ok(ShelterResources {
    name:        row.get(0)?,
    food:        row.get(1)?,
    beds:        row.get(2)?,
    water:       row.get(3)?,
    electricity: row.get(4)?,
    first_aid:   row.get(5)?,
  })
}

pub const UNVERIFIED_COLUMNS: &str = "id, name, latitude, longitude, total_capacity, \
   available_beds, available_food, available_medical_supplies, electricity, water, \
   created_at, updated_at";

/// Raw values read from an `unverified_shelters` row, in
/// [`UNVERIFIED_COLUMNS`] order.
pub struct RawUnverifiedShelter {
  pub id:                         i64,
  pub name:                       String,
  pub latitude:                   f64,
  pub longitude:                  f64,
  pub total_capacity:             i64,
  pub available_beds:             i64,
  pub available_food:             bool,
  pub available_medical_supplies: bool,
  pub electricity:                bool,
  pub water:                      bool,
  pub created_at:                 String,
  pub updated_at:                 String,
}

impl RawUnverifiedShelter {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                         row.get(0)?,
      name:                       row.get(1)?,
      latitude:                   row.get(2)?,
      longitude:                  row.get(3)?,
      total_capacity:             row.get(4)?,
      available_beds:             row.get(5)?,
      available_food:             row.get(6)?,
      available_medical_supplies: row.get(7)?,
      electricity:                row.get(8)?,
      water:                      row.get(9)?,
      created_at:                 row.get(10)?,
      updated_at:                 row.get(11)?,
    })
  }

  pub fn into_shelter(self) -> Result<UnverifiedShelter> {
    Ok(UnverifiedShelter {
      id:                         self.id,
      name:                       self.name,
      latitude:                   self.latitude,
      longitude:                  self.longitude,
      total_capacity:             self.total_capacity,
      available_beds:             self.available_beds,
      available_food:             self.available_food,
      available_medical_supplies: self.available_medical_supplies,
      electricity:                self.electricity,
      water:                      self.water,
      created_at:                 decode_dt(&self.created_at)?,
      updated_at:                 decode_dt(&self.updated_at)?,
    })
  }
}
