//! Local caching module for offline data access.
//!
//! This module provides the `CacheManager` for storing and retrieving
//! catalog data through a `KeyValueStore`. Three logical keys exist:
//! - the full creature list (JSON, wrapped with the time it was cached)
//! - the favorites list (JSON array of ids)
//! - one key per creature for its captured image reference (plain string)

pub mod manager;
pub mod store;

pub use manager::{CacheManager, CachedData};
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError};
