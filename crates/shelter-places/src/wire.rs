//! Wire types for the places `searchText` response.
//!
//! Only the fields named in the request's field mask are modelled. Every
//! field is optional on the wire; incomplete entries are dropped when
//! converting to [`PlaceCandidate`]s.

use serde::{Deserialize, Serialize};
use shelter_core::shelter::PlaceCandidate;

/// Request body: a free-text query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextRequest<'a> {
  pub text_query: &'a str,
}

/// Response body. An empty result set omits `places` entirely.
#[derive(Debug, Default, Deserialize)]
pub struct SearchTextResponse {
  #[serde(default)]
  pub places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
  /// Resource name, e.g. `places/ChIJ...`.
  pub name:         Option<String>,
  pub display_name: Option<LocalizedText>,
  pub location:     Option<LatLng>,
}

#[derive(Debug, Deserialize)]
pub struct LocalizedText {
  pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
  pub latitude:  Option<f64>,
  pub longitude: Option<f64>,
}

impl Place {
  /// `None` when the entry has no display name or an incomplete location.
  pub fn into_candidate(self) -> Option<PlaceCandidate> {
    let name = self.display_name?.text?;
    let location = self.location?;
    Some(PlaceCandidate {
      name,
      latitude: location.latitude?,
      longitude: location.longitude?,
      place: self.name,
    })
  }
}

impl SearchTextResponse {
  /// Usable candidates in provider order.
  pub fn into_candidates(self) -> Vec<PlaceCandidate> {
    self
      .places
      .into_iter()
      .enumerate()
      .filter_map(|(index, place)| {
        let candidate = place.into_candidate();
        if candidate.is_none() {
          tracing::debug!(index, "dropping place without name or location");
        }
        candidate
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserialise_full_response() {
    let json = r#"{
      "places": [
        {
          "name": "places/ChIJabc",
          "location": { "latitude": 33.7512, "longitude": -84.3901 },
          "displayName": { "text": "Oak Hall Shelter", "languageCode": "en" }
        },
        {
          "name": "places/ChIJdef",
          "location": { "latitude": 33.76, "longitude": -84.38 },
          "displayName": { "text": "Elm Center" }
        }
      ]
    }"#;

    let response: SearchTextResponse = serde_json::from_str(json).unwrap();
    let candidates = response.into_candidates();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0], PlaceCandidate {
      name:      "Oak Hall Shelter".into(),
      latitude:  33.7512,
      longitude: -84.3901,
      place:     Some("places/ChIJabc".into()),
    });
    assert_eq!(candidates[1].name, "Elm Center");
  }

  #[test]
  fn empty_object_means_no_results() {
    let response: SearchTextResponse = serde_json::from_str("{}").unwrap();
    assert!(response.into_candidates().is_empty());
  }

  #[test]
  fn incomplete_entries_are_dropped() {
    let json = r#"{
      "places": [
        { "name": "places/a", "location": { "latitude": 1.0, "longitude": 2.0 } },
        { "name": "places/b", "displayName": { "text": "No location" } },
        { "name": "places/c", "displayName": { "text": "Half" },
          "location": { "latitude": 1.0 } },
        { "displayName": { "text": "Kept" },
          "location": { "latitude": 3.0, "longitude": 4.0 } }
      ]
    }"#;

    let response: SearchTextResponse = serde_json::from_str(json).unwrap();
    let candidates = response.into_candidates();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "Kept");
    // A missing place identifier survives here and is rejected later.
    assert_eq!(candidates[0].place, None);
  }

  #[test]
  fn request_uses_camel_case() {
    let body = serde_json::to_string(&SearchTextRequest { text_query: "q" }).unwrap();
    assert_eq!(body, r#"{"textQuery":"q"}"#);
  }
}
