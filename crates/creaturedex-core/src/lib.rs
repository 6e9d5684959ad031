//! Creaturedex core - catalog client, local cache, favorites, and device flows.
//!
//! The library holds everything a front end needs to browse the creature
//! catalog offline-first: fetching with cache fallback, the favorites
//! ledger, the per-creature image registry, the biometric gate in front of
//! photo capture, map state, and the screen controllers that tie them
//! together. Rendering and the device SDKs themselves live in the front end.

pub mod api;
pub mod cache;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod context;
pub mod device;
pub mod favorites;
pub mod gate;
pub mod images;
pub mod map;
pub mod models;
pub mod notify;
pub mod screens;
pub mod state;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::{ApiError, CatalogClient, CatalogSource};
pub use cache::{CacheManager, FileStore, KeyValueStore, MemoryStore, StorageError};
pub use capture::{CaptureOutcome, PhotoCapture};
pub use catalog::{CatalogFetcher, CatalogLoad, CatalogOrigin, NO_CREATURES_MESSAGE};
pub use config::Config;
pub use context::AppContext;
pub use device::{DeviceError, Devices, PermissionStatus};
pub use favorites::FavoritesLedger;
pub use gate::{BiometricGate, GateOutcome};
pub use images::ImageRegistry;
pub use map::{MapRegion, Marker, MarkerKind};
pub use models::{Coordinates, Creature, CreatureId};
pub use notify::{Alert, LogNotifier, Notifier, RecordingNotifier};
pub use screens::{DetailScreen, HomeScreen, MapScreen, Route, SettingsScreen};
pub use state::AppState;
