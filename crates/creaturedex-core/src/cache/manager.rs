use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use super::KeyValueStore;
use crate::models::{Creature, CreatureId};

const CREATURES_KEY: &str = "creatures";
const FAVORITES_KEY: &str = "favorites";
const IMAGE_KEY_PREFIX: &str = "image_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    /// Absent when the value was written by a client that stored bare data.
    #[serde(default)]
    pub cached_at: Option<DateTime<Utc>>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Some(Utc::now()),
        }
    }

    fn untimed(data: T) -> Self {
        Self {
            data,
            cached_at: None,
        }
    }

    pub fn age_minutes(&self) -> Option<i64> {
        self.cached_at.map(|at| (Utc::now() - at).num_minutes())
    }

    pub fn age_display(&self) -> String {
        let Some(minutes) = self.age_minutes() else {
            return "unknown".to_string();
        };
        if minutes < 1 {
            // Covers clock skew too
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            let remaining_mins = minutes % 60;
            if remaining_mins >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            let remaining_hours = (minutes % 1440) / 60;
            if remaining_hours >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}

/// Creature list as it may appear in storage.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCreatures {
    Wrapped(CachedData<Vec<Creature>>),
    Bare(Vec<Creature>),
}

/// Typed accessor over the key-value store.
/// Clone is cheap - the store is shared behind an Arc.
#[derive(Clone)]
pub struct CacheManager {
    store: Arc<dyn KeyValueStore>,
}

impl CacheManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn image_key(id: CreatureId) -> String {
        format!("{}{}", IMAGE_KEY_PREFIX, id)
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(contents) = self
            .store
            .get(key)
            .await
            .with_context(|| format!("Failed to read cache key: {}", key))?
        else {
            return Ok(None);
        };

        let value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache key: {}", key))?;
        Ok(Some(value))
    }

    async fn save<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<()> {
        let contents = serde_json::to_string(data)?;
        self.store
            .set(key, &contents)
            .await
            .with_context(|| format!("Failed to write cache key: {}", key))?;
        Ok(())
    }

    // ===== Creatures =====

    pub async fn load_creatures(&self) -> Result<Option<CachedData<Vec<Creature>>>> {
        let stored: Option<StoredCreatures> = self.load(CREATURES_KEY).await?;
        Ok(stored.map(|s| match s {
            StoredCreatures::Wrapped(cached) => cached,
            StoredCreatures::Bare(data) => {
                debug!("Creature cache has no timestamp");
                CachedData::untimed(data)
            }
        }))
    }

    pub async fn save_creatures(&self, creatures: &[Creature]) -> Result<()> {
        self.save(CREATURES_KEY, &CachedData::new(creatures)).await
    }

    // ===== Favorites =====

    /// Load the favorites list; a missing key reads as empty.
    pub async fn load_favorites(&self) -> Result<Vec<CreatureId>> {
        Ok(self.load(FAVORITES_KEY).await?.unwrap_or_default())
    }

    pub async fn save_favorites(&self, favorites: &[CreatureId]) -> Result<()> {
        self.save(FAVORITES_KEY, favorites).await
    }

    // ===== Images =====

    pub async fn load_image(&self, id: CreatureId) -> Result<Option<String>> {
        let key = Self::image_key(id);
        self.store
            .get(&key)
            .await
            .with_context(|| format!("Failed to read cache key: {}", key))
    }

    pub async fn save_image(&self, id: CreatureId, uri: &str) -> Result<()> {
        let key = Self::image_key(id);
        self.store
            .set(&key, uri)
            .await
            .with_context(|| format!("Failed to write cache key: {}", key))
    }

    /// Ids of every creature that has an image reference stored.
    pub async fn image_ids(&self) -> Result<Vec<CreatureId>> {
        let keys = self.store.keys().await.context("Failed to list cache keys")?;
        Ok(keys
            .iter()
            .filter_map(|k| k.strip_prefix(IMAGE_KEY_PREFIX))
            .filter_map(|id| id.parse().ok())
            .collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use chrono::Duration;

    fn manager() -> (Arc<MemoryStore>, CacheManager) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), CacheManager::new(store))
    }

    fn griffin() -> Creature {
        Creature {
            id: 1,
            name: "Griffin".to_string(),
            description: "Half eagle, half lion".to_string(),
            year: 1340,
            latitude: 51.92,
            longitude: 4.48,
        }
    }

    #[test]
    fn test_cached_data_age_display_just_now() {
        let cached = CachedData::new(vec![1, 2, 3]);
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_cached_data_age_display_rounding() {
        let mut cached = CachedData::new(vec![1]);
        cached.cached_at = Some(Utc::now() - Duration::minutes(5));
        assert_eq!(cached.age_display(), "5m ago");

        cached.cached_at = Some(Utc::now() - Duration::minutes(95));
        assert_eq!(cached.age_display(), "2h ago");

        cached.cached_at = Some(Utc::now() - Duration::hours(26));
        assert_eq!(cached.age_display(), "1d ago");
    }

    #[test]
    fn test_cached_data_age_unknown_without_timestamp() {
        let cached = CachedData::untimed(vec![1]);
        assert_eq!(cached.age_minutes(), None);
        assert_eq!(cached.age_display(), "unknown");
    }

    #[tokio::test]
    async fn test_creatures_roundtrip() {
        let (_, cache) = manager();
        assert!(cache.load_creatures().await.unwrap().is_none());

        cache.save_creatures(&[griffin()]).await.unwrap();
        let cached = cache.load_creatures().await.unwrap().unwrap();
        assert_eq!(cached.data, vec![griffin()]);
        assert!(cached.cached_at.is_some());
    }

    #[tokio::test]
    async fn test_creatures_accepts_bare_array() {
        let (store, cache) = manager();
        store
            .set(
                "creatures",
                r#"[{"id":2,"name":"Basilisk","description":"","year":1200,"latitude":1.0,"longitude":2.0}]"#,
            )
            .await
            .unwrap();

        let cached = cache.load_creatures().await.unwrap().unwrap();
        assert_eq!(cached.data.len(), 1);
        assert_eq!(cached.data[0].name, "Basilisk");
        assert!(cached.cached_at.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_creatures_is_error() {
        let (store, cache) = manager();
        store.set("creatures", "{not json").await.unwrap();
        assert!(cache.load_creatures().await.is_err());
    }

    #[tokio::test]
    async fn test_favorites_default_empty() {
        let (store, cache) = manager();
        assert!(cache.load_favorites().await.unwrap().is_empty());

        cache.save_favorites(&[3, 1]).await.unwrap();
        assert_eq!(cache.load_favorites().await.unwrap(), vec![3, 1]);
        // Stored as a bare JSON array
        assert_eq!(store.get("favorites").await.unwrap().as_deref(), Some("[3,1]"));
    }

    #[tokio::test]
    async fn test_images_stored_as_plain_strings() {
        let (store, cache) = manager();
        cache.save_image(4, "file:///photos/4.jpg").await.unwrap();

        assert_eq!(
            store.get("image_4").await.unwrap().as_deref(),
            Some("file:///photos/4.jpg")
        );
        assert_eq!(
            cache.load_image(4).await.unwrap().as_deref(),
            Some("file:///photos/4.jpg")
        );
        assert_eq!(cache.load_image(5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_image_ids() {
        let (_, cache) = manager();
        cache.save_image(4, "a").await.unwrap();
        cache.save_image(9, "b").await.unwrap();
        cache.save_favorites(&[4]).await.unwrap();

        let mut ids = cache.image_ids().await.unwrap();
        ids.sort();
        assert_eq!(ids, vec![4, 9]);
    }
}
