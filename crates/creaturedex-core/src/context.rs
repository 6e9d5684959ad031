//! Dependency wiring for the screen controllers.
//!
//! `AppContext` bundles every service a screen may need. It is built once
//! by the front end and cloned into each controller; all clones share the
//! same store, ledger lock, and theme flag.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::api::{CatalogClient, CatalogSource};
use crate::cache::{CacheManager, FileStore, KeyValueStore};
use crate::capture::PhotoCapture;
use crate::catalog::CatalogFetcher;
use crate::config::Config;
use crate::device::{Devices, LocationProvider};
use crate::favorites::FavoritesLedger;
use crate::gate::BiometricGate;
use crate::images::ImageRegistry;
use crate::notify::Notifier;
use crate::state::AppState;

#[derive(Clone)]
pub struct AppContext {
    pub cache: CacheManager,
    pub catalog: CatalogFetcher,
    pub favorites: FavoritesLedger,
    pub images: ImageRegistry,
    pub gate: BiometricGate,
    pub capture: PhotoCapture,
    pub location: Arc<dyn LocationProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub state: AppState,
}

impl AppContext {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn CatalogSource>,
        devices: Devices,
        notifier: Arc<dyn Notifier>,
        state: AppState,
    ) -> Self {
        let cache = CacheManager::new(store);
        let images = ImageRegistry::new(cache.clone());
        Self {
            catalog: CatalogFetcher::new(source, cache.clone()),
            favorites: FavoritesLedger::new(cache.clone()),
            gate: BiometricGate::new(devices.biometrics, notifier.clone()),
            capture: PhotoCapture::new(devices.camera, images.clone(), notifier.clone()),
            location: devices.location,
            images,
            cache,
            notifier,
            state,
        }
    }

    /// Build a context backed by the on-disk store and the HTTP catalog.
    pub async fn from_config(
        config: &Config,
        devices: Devices,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let store_dir = config.store_dir()?;
        let store = FileStore::open(&store_dir)
            .await
            .with_context(|| format!("Failed to open store at {}", store_dir.display()))?;
        debug!(store_dir = %store_dir.display(), url = config.catalog_url(), "Building app context");

        let client = CatalogClient::new(config.catalog_url(), config.request_timeout_secs())
            .context("Failed to build catalog client")?;

        Ok(Self::new(
            Arc::new(store),
            Arc::new(client),
            devices,
            notifier,
            AppState::new(config.dark_mode),
        ))
    }
}
