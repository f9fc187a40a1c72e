//! The shared "last known location" that centres shelter searches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub latitude:  f64,
  pub longitude: f64,
}

impl Coordinates {
  pub const fn new(latitude: f64, longitude: f64) -> Self {
    Self { latitude, longitude }
  }
}

/// Used when no location has ever been submitted.
///
/// The longitude is positive, which puts the point in central Asia rather
/// than Atlanta. Existing clients rely on this exact value; servers override
/// it through configuration.
pub const DEFAULT_LOCATION: Coordinates = Coordinates::new(33.7501, 84.3885);

/// The server-wide location record.
///
/// Exactly one row exists once any client has reported a location. Every
/// update overwrites it and refreshes `timestamp`, so the location is shared
/// by all clients rather than scoped to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLocation {
  pub latitude:  f64,
  pub longitude: f64,
  pub timestamp: DateTime<Utc>,
}

impl UserLocation {
  pub fn coordinates(&self) -> Coordinates {
    Coordinates::new(self.latitude, self.longitude)
  }
}
