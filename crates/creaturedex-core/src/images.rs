//! Per-creature registry of captured photo references.
//!
//! Only the device-local location of a capture is remembered; image data is
//! never copied into app-managed storage.

use std::collections::HashMap;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::cache::CacheManager;
use crate::models::{Creature, CreatureId};

/// Maximum concurrent storage reads when loading thumbnails.
const MAX_CONCURRENT_READS: usize = 8;

#[derive(Clone)]
pub struct ImageRegistry {
    cache: CacheManager,
}

impl ImageRegistry {
    pub fn new(cache: CacheManager) -> Self {
        Self { cache }
    }

    pub async fn image_for(&self, id: CreatureId) -> Result<Option<String>> {
        self.cache.load_image(id).await
    }

    pub async fn record(&self, id: CreatureId, uri: &str) -> Result<()> {
        self.cache.save_image(id, uri).await?;
        debug!(creature_id = id, uri = %uri, "Recorded creature image");
        Ok(())
    }

    /// Image references for every creature in `creatures` that has one.
    /// A creature whose entry cannot be read is skipped.
    pub async fn images_for(&self, creatures: &[Creature]) -> HashMap<CreatureId, String> {
        let results: Vec<_> = stream::iter(creatures.iter().map(|c| c.id))
            .map(|id| async move { (id, self.cache.load_image(id).await) })
            .buffer_unordered(MAX_CONCURRENT_READS)
            .collect()
            .await;

        let mut images = HashMap::new();
        for (id, result) in results {
            match result {
                Ok(Some(uri)) => {
                    images.insert(id, uri);
                }
                Ok(None) => {}
                Err(e) => warn!(creature_id = id, error = %e, "Failed to load creature image"),
            }
        }
        images
    }

    /// Image entries that no longer match a creature in `known`.
    /// They are reported, never pruned.
    pub async fn stale_ids(&self, known: &[Creature]) -> Result<Vec<CreatureId>> {
        let mut ids = self.cache.image_ids().await?;
        ids.retain(|id| !known.iter().any(|c| c.id == *id));
        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::testing::creature;
    use std::sync::Arc;

    fn registry() -> ImageRegistry {
        ImageRegistry::new(CacheManager::new(Arc::new(MemoryStore::new())))
    }

    #[tokio::test]
    async fn test_record_only_touches_its_own_entry() {
        let registry = registry();
        registry.record(2, "file:///old-2.jpg").await.unwrap();

        registry.record(1, "file:///1.jpg").await.unwrap();

        assert_eq!(registry.image_for(1).await.unwrap().as_deref(), Some("file:///1.jpg"));
        assert_eq!(registry.image_for(2).await.unwrap().as_deref(), Some("file:///old-2.jpg"));
        assert_eq!(registry.image_for(3).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_record_replaces_previous_capture() {
        let registry = registry();
        registry.record(1, "file:///first.jpg").await.unwrap();
        registry.record(1, "file:///second.jpg").await.unwrap();
        assert_eq!(registry.image_for(1).await.unwrap().as_deref(), Some("file:///second.jpg"));
    }

    #[tokio::test]
    async fn test_images_for_known_creatures() {
        let registry = registry();
        registry.record(1, "file:///1.jpg").await.unwrap();
        registry.record(3, "file:///3.jpg").await.unwrap();
        registry.record(99, "file:///99.jpg").await.unwrap();

        let creatures = vec![creature(1, "Griffin"), creature(2, "Basilisk"), creature(3, "Hydra")];
        let images = registry.images_for(&creatures).await;

        assert_eq!(images.len(), 2);
        assert_eq!(images.get(&1).map(String::as_str), Some("file:///1.jpg"));
        assert_eq!(images.get(&3).map(String::as_str), Some("file:///3.jpg"));
        assert!(!images.contains_key(&99));
    }

    #[tokio::test]
    async fn test_stale_ids() {
        let registry = registry();
        registry.record(1, "a").await.unwrap();
        registry.record(7, "b").await.unwrap();

        let stale = registry.stale_ids(&[creature(1, "Griffin")]).await.unwrap();
        assert_eq!(stale, vec![7]);
        assert!(registry.image_for(7).await.unwrap().is_some());
    }
}
