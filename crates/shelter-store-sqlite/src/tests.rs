//! Integration tests for `SqliteStore` against an in-memory database.

use shelter_core::{
  location::{Coordinates, DEFAULT_LOCATION},
  resources::ShelterResources,
  shelter::NewShelterLocation,
  store::{ShelterStore, most_recent_coordinates},
  unverified::NewUnverifiedShelter,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Location ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn no_location_yields_fallback() {
  let s = store().await;

  assert!(s.most_recent_location().await.unwrap().is_none());
  let point = most_recent_coordinates(&s, DEFAULT_LOCATION).await.unwrap();
  assert_eq!(point, Coordinates::new(33.7501, 84.3885));
}

#[tokio::test]
async fn update_then_read_returns_same_pair() {
  let s = store().await;

  for (lat, lon) in [(33.75, -84.39), (-12.5, 130.8), (0.0, 0.0), (89.9, -179.9)] {
    s.update_location(Coordinates::new(lat, lon)).await.unwrap();
    let latest = s.most_recent_location().await.unwrap().unwrap();
    assert_eq!((latest.latitude, latest.longitude), (lat, lon));
  }
}

#[tokio::test]
async fn location_is_a_single_row_with_fresh_timestamp() {
  let s = store().await;

  let first = s.update_location(Coordinates::new(1.0, 2.0)).await.unwrap();
  let second = s.update_location(Coordinates::new(3.0, 4.0)).await.unwrap();
  assert!(second.timestamp >= first.timestamp);

  let latest = s.most_recent_location().await.unwrap().unwrap();
  assert_eq!(latest.coordinates(), Coordinates::new(3.0, 4.0));
  assert_eq!(latest.timestamp, second.timestamp);

  let rows: i64 = s
    .conn_for_tests()
    .call(|conn| {
      Ok(conn.query_row("SELECT COUNT(*) FROM user_location", [], |r| r.get(0))?)
    })
    .await
    .unwrap();
  assert_eq!(rows, 1);
}

// ─── Directory ───────────────────────────────────────────────────────────────

fn entry(name: &str, lat: f64, place: &str) -> NewShelterLocation {
  NewShelterLocation {
    latitude:  lat,
    longitude: -84.39,
    name:      name.into(),
    place:     place.into(),
  }
}

#[tokio::test]
async fn upsert_shelter_by_name_overwrites_location_and_place() {
  let s = store().await;

  let first = s.upsert_shelter(entry("Oak Hall", 33.75, "places/a")).await.unwrap();
  let second = s.upsert_shelter(entry("Oak Hall", 33.80, "places/b")).await.unwrap();

  assert_eq!(second.latitude, 33.80);
  assert_eq!(second.place, "places/b");
  // First-discovery time survives the overwrite.
  assert_eq!(second.timestamp, first.timestamp);

  let fetched = s.get_shelter("Oak Hall").await.unwrap().unwrap();
  assert_eq!(fetched.place, "places/b");
}

#[tokio::test]
async fn get_shelter_missing_returns_none() {
  let s = store().await;
  s.upsert_shelter(entry("Oak Hall", 33.75, "places/a")).await.unwrap();

  assert!(s.get_shelter("oak hall").await.unwrap().is_none());
  assert!(s.get_shelter("Elm Center").await.unwrap().is_none());
}

// ─── Resource ledger ─────────────────────────────────────────────────────────

fn resources(name: &str, beds: i64) -> ShelterResources {
  ShelterResources {
    name: name.into(),
    food: 10,
    beds,
    water: 30,
    electricity: 1,
    first_aid: 5,
  }
}

#[tokio::test]
async fn upsert_resources_is_keyed_by_name() {
  let s = store().await;

  s.upsert_resources(resources("Oak Hall", 20)).await.unwrap();
  s.upsert_resources(resources("Elm Center", 7)).await.unwrap();
  let replaced = s.upsert_resources(resources("Oak Hall", 3)).await.unwrap();
  assert_eq!(replaced.beds, 3);

  let oak = s.get_resources("Oak Hall").await.unwrap().unwrap();
  let elm = s.get_resources("Elm Center").await.unwrap().unwrap();
  assert_eq!(oak, resources("Oak Hall", 3));
  assert_eq!(elm.beds, 7);
}

#[tokio::test]
async fn resources_exist_independently_of_directory() {
  let s = store().await;
  s.upsert_resources(resources("Oak Hall", 20)).await.unwrap();

  assert!(s.get_resources("Oak Hall").await.unwrap().is_some());
  assert!(s.get_shelter("Oak Hall").await.unwrap().is_none());
}

// ─── Unverified shelters ─────────────────────────────────────────────────────

fn submission(name: &str, lat: f64, lon: f64) -> NewUnverifiedShelter {
  NewUnverifiedShelter {
    name:                       name.into(),
    latitude:                   lat,
    longitude:                  lon,
    total_capacity:             50,
    available_beds:             20,
    available_food:             true,
    available_medical_supplies: false,
    electricity:                true,
    water:                      true,
  }
}

#[tokio::test]
async fn create_and_get_unverified() {
  let s = store().await;

  let created = s
    .create_unverified(submission("Oak Hall", 33.75, -84.39))
    .await
    .unwrap();
  assert_eq!(created.to_new(), submission("Oak Hall", 33.75, -84.39));
  assert_eq!(created.created_at, created.updated_at);

  let fetched = s.get_unverified(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn duplicate_coordinates_are_rejected() {
  let s = store().await;

  s.create_unverified(submission("Oak Hall", 33.75, -84.39))
    .await
    .unwrap();
  let err = s
    .create_unverified(submission("Other name", 33.75, -84.39))
    .await
    .unwrap_err();

  assert!(matches!(
    err,
    Error::DuplicateCoordinate { latitude, longitude }
      if latitude == 33.75 && longitude == -84.39
  ));
  assert_eq!(s.list_unverified().await.unwrap().len(), 1);
}

#[tokio::test]
async fn same_latitude_different_longitude_is_allowed() {
  let s = store().await;

  s.create_unverified(submission("A", 33.75, -84.39)).await.unwrap();
  s.create_unverified(submission("B", 33.75, -84.40)).await.unwrap();
  assert_eq!(s.list_unverified().await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_keeping_own_coordinates_succeeds() {
  let s = store().await;

  let created = s
    .create_unverified(submission("Oak Hall", 33.75, -84.39))
    .await
    .unwrap();

  let mut input = created.to_new();
  input.name = "Oak Hall Annex".into();
  input.available_beds = 4;

  let updated = s.update_unverified(created.id, input).await.unwrap();
  assert_eq!(updated.id, created.id);
  assert_eq!(updated.name, "Oak Hall Annex");
  assert_eq!(updated.available_beds, 4);
  assert_eq!(updated.created_at, created.created_at);
  assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_onto_anothers_coordinates_is_rejected() {
  let s = store().await;

  s.create_unverified(submission("A", 1.0, 1.0)).await.unwrap();
  let b = s.create_unverified(submission("B", 2.0, 2.0)).await.unwrap();

  let err = s
    .update_unverified(b.id, submission("B", 1.0, 1.0))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateCoordinate { .. }));

  // Nothing was written.
  let unchanged = s.get_unverified(b.id).await.unwrap().unwrap();
  assert_eq!(unchanged.coordinates(), Coordinates::new(2.0, 2.0));
}

#[tokio::test]
async fn update_missing_id_errors() {
  let s = store().await;

  let err = s
    .update_unverified(42, submission("Ghost", 1.0, 1.0))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UnverifiedShelterNotFound(42)));
  assert!(s.get_unverified(42).await.unwrap().is_none());
}

#[tokio::test]
async fn list_unverified_in_submission_order() {
  let s = store().await;

  s.create_unverified(submission("First", 1.0, 1.0)).await.unwrap();
  s.create_unverified(submission("Second", 2.0, 2.0)).await.unwrap();
  s.create_unverified(submission("Third", 3.0, 3.0)).await.unwrap();

  let names: Vec<_> = s
    .list_unverified()
    .await
    .unwrap()
    .into_iter()
    .map(|u| u.name)
    .collect();
  assert_eq!(names, ["First", "Second", "Third"]);
}

#[tokio::test]
async fn unique_constraint_backs_the_pre_save_check() {
  let s = store().await;
  s.create_unverified(submission("A", 5.0, 5.0)).await.unwrap();

  // Bypass the store's check and write straight to the table.
  let result = s
    .conn_for_tests()
    .call(|conn| {
      conn.execute(
        "INSERT INTO unverified_shelters (
           name, latitude, longitude, available_beds, available_food,
           available_medical_supplies, electricity, water, created_at, updated_at
         ) VALUES ('B', 5.0, 5.0, 0, 0, 0, 0, 0, 'x', 'x')",
        [],
      )?;
      Ok(())
    })
    .await;

  match result {
    Err(tokio_rusqlite::Error::Rusqlite(e)) => {
      assert!(crate::encode::is_unique_violation(&e), "{e}")
    }
    other => panic!("expected a constraint failure, got {other:?}"),
  }
}

#[tokio::test]
async fn store_errors_map_to_core_errors() {
  let dup: shelter_core::Error = Error::DuplicateCoordinate {
    latitude:  1.0,
    longitude: 2.0,
  }
  .into();
  assert!(matches!(dup, shelter_core::Error::DuplicateCoordinate { .. }));

  let missing: shelter_core::Error = Error::UnverifiedShelterNotFound(7).into();
  assert!(matches!(missing, shelter_core::Error::UnverifiedShelterNotFound(7)));

  let other: shelter_core::Error = Error::DateParse("bad".into()).into();
  assert!(matches!(other, shelter_core::Error::Store(_)));
}
