//! Persisted set of favorite creatures.
//!
//! Storage is the source of truth: every query re-reads the persisted list
//! and every toggle is a read-modify-write against it. Toggles issued
//! through clones of the same ledger are serialized so a rapid double tap
//! cannot lose an update inside one process.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::CacheManager;
use crate::models::{Creature, CreatureId};

#[derive(Clone)]
pub struct FavoritesLedger {
    cache: CacheManager,
    write_lock: Arc<Mutex<()>>,
}

impl FavoritesLedger {
    pub fn new(cache: CacheManager) -> Self {
        Self {
            cache,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn favorites(&self) -> Result<Vec<CreatureId>> {
        self.cache.load_favorites().await
    }

    pub async fn is_favorite(&self, id: CreatureId) -> Result<bool> {
        Ok(self.favorites().await?.contains(&id))
    }

    /// Flip membership of `id` and persist it. Returns the new status once
    /// the write has succeeded; on error nothing was changed.
    pub async fn toggle_favorite(&self, id: CreatureId) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut favorites = self.cache.load_favorites().await?;

        let now_favorite = if favorites.contains(&id) {
            favorites.retain(|&f| f != id);
            false
        } else {
            favorites.push(id);
            true
        };

        self.cache.save_favorites(&favorites).await?;
        debug!(creature_id = id, favorite = now_favorite, "Toggled favorite");
        Ok(now_favorite)
    }

    /// Favorites that no longer match a creature in `known`.
    /// They are reported, never pruned.
    pub async fn stale_ids(&self, known: &[Creature]) -> Result<Vec<CreatureId>> {
        let favorites = self.favorites().await?;
        Ok(favorites
            .into_iter()
            .filter(|id| !known.iter().any(|c| c.id == *id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::testing::{creature, FailingStore};

    fn ledger() -> FavoritesLedger {
        FavoritesLedger::new(CacheManager::new(Arc::new(MemoryStore::new())))
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_membership() {
        let ledger = ledger();
        assert!(!ledger.is_favorite(1).await.unwrap());

        assert!(ledger.toggle_favorite(1).await.unwrap());
        assert!(ledger.is_favorite(1).await.unwrap());

        assert!(!ledger.toggle_favorite(1).await.unwrap());
        assert!(!ledger.is_favorite(1).await.unwrap());
        assert!(ledger.favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_keeps_other_entries_in_order() {
        let ledger = ledger();
        ledger.toggle_favorite(3).await.unwrap();
        ledger.toggle_favorite(1).await.unwrap();
        ledger.toggle_favorite(2).await.unwrap();
        ledger.toggle_favorite(1).await.unwrap();

        assert_eq!(ledger.favorites().await.unwrap(), vec![3, 2]);
    }

    #[tokio::test]
    async fn test_toggle_removes_duplicates() {
        let cache = CacheManager::new(Arc::new(MemoryStore::new()));
        // Older clients could write the same id twice
        cache.save_favorites(&[5, 5, 6]).await.unwrap();
        let ledger = FavoritesLedger::new(cache);

        assert!(!ledger.toggle_favorite(5).await.unwrap());
        assert_eq!(ledger.favorites().await.unwrap(), vec![6]);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_do_not_lose_updates() {
        let ledger = ledger();
        let tasks: Vec<_> = (0..20)
            .map(|id| {
                let ledger = ledger.clone();
                tokio::spawn(async move { ledger.toggle_favorite(id).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let mut favorites = ledger.favorites().await.unwrap();
        favorites.sort();
        assert_eq!(favorites, (0..20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_failed_write_reports_error_and_changes_nothing() {
        let store = Arc::new(FailingStore::new());
        let ledger = FavoritesLedger::new(CacheManager::new(store.clone()));
        ledger.toggle_favorite(1).await.unwrap();

        store.fail_writes(true);
        assert!(ledger.toggle_favorite(1).await.is_err());

        store.fail_writes(false);
        assert!(ledger.is_favorite(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_stale_ids_reported() {
        let ledger = ledger();
        ledger.toggle_favorite(1).await.unwrap();
        ledger.toggle_favorite(42).await.unwrap();

        let known = vec![creature(1, "Griffin"), creature(2, "Basilisk")];
        assert_eq!(ledger.stale_ids(&known).await.unwrap(), vec![42]);
        // Reporting does not prune
        assert_eq!(ledger.favorites().await.unwrap(), vec![1, 42]);
    }
}
