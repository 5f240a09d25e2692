//! Client library for the Jikan v4 catalog API (unofficial MyAnimeList API).
//!
//! Provides the response types the browser consumes, a typed error, and a
//! thin HTTP client behind the [`Catalog`] trait.

pub mod api;
pub mod error;

pub use api::{ApiBase, Catalog, JikanClient};
pub use api::types::*;
pub use error::{CatalogError, Result};
