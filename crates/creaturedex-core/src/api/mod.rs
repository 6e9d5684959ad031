//! REST client module for the creature catalog.
//!
//! This module provides the `CatalogClient` for fetching the creature list
//! from a single unauthenticated JSON endpoint, and the `CatalogSource`
//! trait so the fetcher can be driven by any source of creature lists.

pub mod client;
pub mod error;

pub use client::{CatalogClient, CatalogSource, DEFAULT_CATALOG_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use error::ApiError;
