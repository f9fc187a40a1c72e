//! [`SqliteStore`]: the SQLite implementation of [`ShelterStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use shelter_core::{
  location::{Coordinates, UserLocation},
  resources::ShelterResources,
  shelter::{NewShelterLocation, ShelterLocation},
  store::ShelterStore,
  unverified::{NewUnverifiedShelter, UnverifiedShelter},
};

use crate::{
  Error, Result,
  encode::{
    RESOURCE_COLUMNS, RawShelter, RawUnverifiedShelter, RawUserLocation, SHELTER_COLUMNS,
    UNVERIFIED_COLUMNS, encode_dt, is_unique_violation, resources_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A shelter store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted. Every call
/// runs on the connection's dedicated thread, one at a time.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Outcome of an unverified-shelter update, decided inside one transaction.
enum Update {
  Saved(RawUnverifiedShelter),
  Duplicate,
  Missing,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn conn_for_tests(&self) -> &tokio_rusqlite::Connection {
    &self.conn
  }
}

/// The pre-save uniqueness check: is any record other than `exclude` already
/// at `point`?
fn coordinate_taken(
  conn: &rusqlite::Connection,
  point: Coordinates,
  exclude: Option<i64>,
) -> rusqlite::Result<bool> {
  conn
    .query_row(
      "SELECT 1 FROM unverified_shelters
       WHERE latitude = ?1 AND longitude = ?2 AND (?3 IS NULL OR id != ?3)",
      rusqlite::params![point.latitude, point.longitude, exclude],
      |_| Ok(()),
    )
    .optional()
    .map(|row| row.is_some())
}

fn duplicate(point: Coordinates) -> Error {
  Error::DuplicateCoordinate {
    latitude:  point.latitude,
    longitude: point.longitude,
  }
}

// ─── ShelterStore impl ───────────────────────────────────────────────────────

impl ShelterStore for SqliteStore {
  type Error = Error;

  // ── Location ──────────────────────────────────────────────────────────────

  async fn update_location(&self, point: Coordinates) -> Result<UserLocation> {
    let location = UserLocation {
      latitude:  point.latitude,
      longitude: point.longitude,
      timestamp: Utc::now(),
    };
    let at_str = encode_dt(location.timestamp);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO user_location (id, latitude, longitude, timestamp)
           VALUES (1, ?1, ?2, ?3)
           ON CONFLICT (id) DO UPDATE SET
             latitude  = excluded.latitude,
             longitude = excluded.longitude,
             timestamp = excluded.timestamp",
          rusqlite::params![point.latitude, point.longitude, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(location)
  }

  async fn most_recent_location(&self) -> Result<Option<UserLocation>> {
    let raw: Option<RawUserLocation> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              "SELECT latitude, longitude, timestamp FROM user_location
               ORDER BY timestamp DESC LIMIT 1",
              [],
              RawUserLocation::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUserLocation::into_location).transpose()
  }

  // ── Directory ─────────────────────────────────────────────────────────────

  async fn upsert_shelter(&self, input: NewShelterLocation) -> Result<ShelterLocation> {
    let at_str = encode_dt(Utc::now());

    let raw: RawShelter = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO shelters (name, latitude, longitude, place, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (name) DO UPDATE SET
               latitude  = excluded.latitude,
               longitude = excluded.longitude,
               place     = excluded.place
             RETURNING {SHELTER_COLUMNS}"
          ),
          rusqlite::params![
            input.name,
            input.latitude,
            input.longitude,
            input.place,
            at_str,
          ],
          RawShelter::from_row,
        )?)
      })
      .await?;

    raw.into_shelter()
  }

  async fn get_shelter(&self, name: &str) -> Result<Option<ShelterLocation>> {
    let name = name.to_owned();

    let raw: Option<RawShelter> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {SHELTER_COLUMNS} FROM shelters WHERE name = ?1"),
              rusqlite::params![name],
              RawShelter::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawShelter::into_shelter).transpose()
  }

  // ── Resource ledger ───────────────────────────────────────────────────────

  async fn upsert_resources(&self, input: ShelterResources) -> Result<ShelterResources> {
    let stored = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO shelter_resources
               (name, food, beds, water, electricity, first_aid)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (name) DO UPDATE SET
               food        = excluded.food,
               beds        = excluded.beds,
               water       = excluded.water,
               electricity = excluded.electricity,
               first_aid   = excluded.first_aid
             RETURNING {RESOURCE_COLUMNS}"
          ),
          rusqlite::params![
            input.name,
            input.food,
            input.beds,
            input.water,
            input.electricity,
            input.first_aid,
          ],
          resources_from_row,
        )?)
      })
      .await?;

    Ok(stored)
  }

  async fn get_resources(&self, name: &str) -> Result<Option<ShelterResources>> {
    let name = name.to_owned();

    let resources = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {RESOURCE_COLUMNS} FROM shelter_resources WHERE name = ?1"
              ),
              rusqlite::params![name],
              resources_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(resources)
  }

  // ── Unverified shelters ───────────────────────────────────────────────────

  async fn create_unverified(
    &self,
    input: NewUnverifiedShelter,
  ) -> Result<UnverifiedShelter> {
    let point  = input.coordinates();
    let at_str = encode_dt(Utc::now());

    // `None` means the coordinates are taken.
    let raw: Option<RawUnverifiedShelter> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if coordinate_taken(&tx, point, None)? {
          return Ok(None);
        }

        let inserted = tx.query_row(
          &format!(
            "INSERT INTO unverified_shelters (
               name, latitude, longitude, total_capacity, available_beds,
               available_food, available_medical_supplies, electricity, water,
               created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
             RETURNING {UNVERIFIED_COLUMNS}"
          ),
          rusqlite::params![
            input.name,
            input.latitude,
            input.longitude,
            input.total_capacity,
            input.available_beds,
            input.available_food,
            input.available_medical_supplies,
            input.electricity,
            input.water,
            at_str,
          ],
          RawUnverifiedShelter::from_row,
        );

        let raw = match inserted {
          Ok(raw) => raw,
          Err(e) if is_unique_violation(&e) => return Ok(None),
          Err(e) => return Err(e.into()),
        };

        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.ok_or_else(|| duplicate(point))?.into_shelter()
  }

  async fn update_unverified(
    &self,
    id: i64,
    input: NewUnverifiedShelter,
  ) -> Result<UnverifiedShelter> {
    let point  = input.coordinates();
    let at_str = encode_dt(Utc::now());

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let exists = tx
          .query_row(
            "SELECT 1 FROM unverified_shelters WHERE id = ?1",
            rusqlite::params![id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !exists {
          return Ok(Update::Missing);
        }

        if coordinate_taken(&tx, point, Some(id))? {
          return Ok(Update::Duplicate);
        }

        let updated = tx.query_row(
          &format!(
            "UPDATE unverified_shelters SET
               name                       = ?2,
               latitude                   = ?3,
               longitude                  = ?4,
               total_capacity             = ?5,
               available_beds             = ?6,
               available_food             = ?7,
               available_medical_supplies = ?8,
               electricity                = ?9,
               water                      = ?10,
               updated_at                 = ?11
             WHERE id = ?1
             RETURNING {UNVERIFIED_COLUMNS}"
          ),
          rusqlite::params![
            id,
            input.name,
            input.latitude,
            input.longitude,
            input.total_capacity,
            input.available_beds,
            input.available_food,
            input.available_medical_supplies,
            input.electricity,
            input.water,
            at_str,
          ],
          RawUnverifiedShelter::from_row,
        );

        let raw = match updated {
          Ok(raw) => raw,
          Err(e) if is_unique_violation(&e) => return Ok(Update::Duplicate),
          Err(e) => return Err(e.into()),
        };

        tx.commit()?;
        Ok(Update::Saved(raw))
      })
      .await?;

    match outcome {
      Update::Saved(raw) => raw.into_shelter(),
      Update::Duplicate => Err(duplicate(point)),
      Update::Missing => Err(Error::UnverifiedShelterNotFound(id)),
    }
  }

  async fn get_unverified(&self, id: i64) -> Result<Option<UnverifiedShelter>> {
    let raw: Option<RawUnverifiedShelter> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {UNVERIFIED_COLUMNS} FROM unverified_shelters WHERE id = ?1"
              ),
              rusqlite::params![id],
              RawUnverifiedShelter::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUnverifiedShelter::into_shelter).transpose()
  }

  async fn list_unverified(&self) -> Result<Vec<UnverifiedShelter>> {
    let raws: Vec<RawUnverifiedShelter> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {UNVERIFIED_COLUMNS} FROM unverified_shelters ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], RawUnverifiedShelter::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUnverifiedShelter::into_shelter).collect()
  }
}
