//! Core types and trait definitions for the shelter directory.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! SQLite backend, the places-search client and the JSON API all depend on it.

pub mod error;
pub mod location;
pub mod resources;
pub mod search;
pub mod shelter;
pub mod store;
pub mod unverified;

pub use error::{Error, Result};
pub use location::Coordinates;
