//! SQL schema for the shelter SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One server-wide row; every location update overwrites it.
CREATE TABLE IF NOT EXISTS user_location (
    id          INTEGER PRIMARY KEY CHECK (id = 1),
    latitude    REAL NOT NULL,
    longitude   REAL NOT NULL,
    timestamp   TEXT NOT NULL    -- RFC 3339 UTC; refreshed on each update
);

-- Directory of shelters discovered through the places search.
CREATE TABLE IF NOT EXISTS shelters (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    latitude    REAL NOT NULL,
    longitude   REAL NOT NULL,
    place       TEXT NOT NULL,   -- opaque provider identifier
    timestamp   TEXT NOT NULL    -- first discovery
);

-- Joined to shelters by name at query time; no foreign key.
CREATE TABLE IF NOT EXISTS shelter_resources (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    food        INTEGER NOT NULL,
    beds        INTEGER NOT NULL,
    water       INTEGER NOT NULL,
    electricity INTEGER NOT NULL,
    first_aid   INTEGER NOT NULL
);

-- Community submissions awaiting moderation. Never deleted.
CREATE TABLE IF NOT EXISTS unverified_shelters (
    id                         INTEGER PRIMARY KEY AUTOINCREMENT,
    name                       TEXT NOT NULL,
    latitude                   REAL NOT NULL,
    longitude                  REAL NOT NULL,
    total_capacity             INTEGER NOT NULL DEFAULT 0,
    available_beds             INTEGER NOT NULL,
    available_food             INTEGER NOT NULL,
    available_medical_supplies INTEGER NOT NULL,
    electricity                INTEGER NOT NULL,
    water                      INTEGER NOT NULL,
    created_at                 TEXT NOT NULL,
    updated_at                 TEXT NOT NULL,
    UNIQUE (latitude, longitude)
);

PRAGMA user_version = 1;
";
