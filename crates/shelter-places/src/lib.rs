//! Client for the hosted places `searchText` API.
//!
//! [`PlacesClient`] implements [`shelter_core::search::PlacesSearch`]. It
//! reads the API key from a local file on first use and keeps it for the
//! life of the process.

mod client;
mod wire;

pub mod error;

pub use client::{DEFAULT_ENDPOINT, FIELD_MASK, PlacesClient, PlacesConfig, search_query};
pub use error::{Error, Result};
