//! Jikan API v4 client implementation.
//!
//! This module provides a single-shot client for interacting with the Jikan
//! API. Failures are reported once and never retried.

pub mod client;
pub mod types;

pub use client::{ApiBase, Catalog, JikanClient};
