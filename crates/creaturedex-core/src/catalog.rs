//! Remote catalog fetching with offline fallback.
//!
//! A fetch always tries the network first. On success the cache is
//! overwritten with the fresh list; on any failure the last cached list is
//! served instead, and when there is no cache the result is empty.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::api::CatalogSource;
use crate::cache::CacheManager;
use crate::models::Creature;

/// Shown when there is nothing to display.
pub const NO_CREATURES_MESSAGE: &str = "No creatures to display. Check your internet connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogOrigin {
    /// Fresh from the network.
    Remote,
    /// Network failed; served from the local cache.
    Cache,
    /// Network failed and nothing was cached.
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogLoad {
    pub creatures: Vec<Creature>,
    pub origin: CatalogOrigin,
    /// Age of the cached copy, when the list came from the cache.
    pub cache_age: Option<String>,
}

impl CatalogLoad {
    fn empty() -> Self {
        Self {
            creatures: Vec::new(),
            origin: CatalogOrigin::Empty,
            cache_age: None,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.origin != CatalogOrigin::Remote
    }

    /// Message for the "check your connection" state.
    pub fn status_message(&self) -> Option<&'static str> {
        if self.creatures.is_empty() {
            Some(NO_CREATURES_MESSAGE)
        } else {
            None
        }
    }
}

#[derive(Clone)]
pub struct CatalogFetcher {
    source: Arc<dyn CatalogSource>,
    cache: CacheManager,
}

impl CatalogFetcher {
    pub fn new(source: Arc<dyn CatalogSource>, cache: CacheManager) -> Self {
        Self { source, cache }
    }

    pub async fn fetch_creatures(&self) -> CatalogLoad {
        match self.source.fetch_creatures().await {
            Ok(creatures) => {
                if let Err(e) = self.cache.save_creatures(&creatures).await {
                    warn!(error = %e, "Failed to cache creatures");
                }
                info!(count = creatures.len(), "Loaded creatures from network");
                CatalogLoad {
                    creatures,
                    origin: CatalogOrigin::Remote,
                    cache_age: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "No internet, loading locally stored creatures");
                self.load_cached().await
            }
        }
    }

    async fn load_cached(&self) -> CatalogLoad {
        match self.cache.load_creatures().await {
            Ok(Some(cached)) => {
                let cache_age = cached.age_display();
                info!(count = cached.data.len(), age = %cache_age, "Loaded creatures from cache");
                CatalogLoad {
                    creatures: cached.data,
                    origin: CatalogOrigin::Cache,
                    cache_age: Some(cache_age),
                }
            }
            Ok(None) => {
                error!("No local data found");
                CatalogLoad::empty()
            }
            Err(e) => {
                error!(error = %e, "Error reading cached creatures");
                CatalogLoad::empty()
            }
        }
    }
}
