//! The resource ledger: per-shelter supply counts.

use serde::{Deserialize, Serialize};

use crate::shelter::ShelterLocation;

/// Supply counts for one shelter, keyed by the shelter's directory name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelterResources {
  pub name:        String,
  pub food:        i64,
  pub beds:        i64,
  pub water:       i64,
  pub electricity: i64,
  pub first_aid:   i64,
}

/// Resource counts joined with the directory's place identifier. This is the
/// read model served by the resource lookup; it is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceReport {
  #[serde(flatten)]
  pub resources: ShelterResources,
  pub place:     String,
}

impl ResourceReport {
  pub fn new(resources: ShelterResources, shelter: &ShelterLocation) -> Self {
    Self { resources, place: shelter.place.clone() }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use serde_json::json;

  use super::*;

  #[test]
  fn report_serialises_flat() {
    let shelter = ShelterLocation {
      name:      "Oak Hall".into(),
      latitude:  33.75,
      longitude: -84.39,
      place:     "places/abc".into(),
      timestamp: Utc::now(),
    };
    let resources = ShelterResources {
      name:        "Oak Hall".into(),
      food:        10,
      beds:        20,
      water:       30,
      electricity: 1,
      first_aid:   5,
    };

    let value = serde_json::to_value(ResourceReport::new(resources, &shelter)).unwrap();
    assert_eq!(
      value,
      json!({
        "name": "Oak Hall",
        "food": 10,
        "beds": 20,
        "water": 30,
        "electricity": 1,
        "first_aid": 5,
        "place": "places/abc",
      })
    );
  }
}
