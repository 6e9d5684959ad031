//! End-to-end flows across screens sharing one store.

use std::sync::Arc;

use creaturedex_core::testing::{
    creature, OfflineCatalog, ScriptedBiometrics, ScriptedCamera, ScriptedLocation, StaticCatalog,
};
use creaturedex_core::{
    AppContext, AppState, CacheManager, CatalogOrigin, CatalogSource, Creature, DetailScreen,
    Devices, FileStore, HomeScreen, KeyValueStore, LogNotifier, MapScreen, MemoryStore,
    PermissionStatus, Route,
};

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

fn devices(biometrics: ScriptedBiometrics) -> (Devices, Arc<ScriptedCamera>, Arc<ScriptedLocation>) {
    let camera = Arc::new(ScriptedCamera::returning("file:///cache/ImagePicker/griffin.jpg"));
    let location = Arc::new(ScriptedLocation::new(PermissionStatus::Granted));
    let devices = Devices {
        camera: camera.clone(),
        biometrics: Arc::new(biometrics),
        location: location.clone(),
    };
    (devices, camera, location)
}

fn context(store: Arc<dyn KeyValueStore>, source: Arc<dyn CatalogSource>, devices: Devices) -> AppContext {
    AppContext::new(store, source, devices, Arc::new(LogNotifier), AppState::default())
}

#[tokio::test]
async fn fetch_cache_and_toggle_favorite_twice() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let (devices, _, _) = devices(ScriptedBiometrics::enrolled());
    let ctx = context(store.clone(), Arc::new(StaticCatalog::new(vec![griffin()])), devices);

    let mut home = HomeScreen::new(ctx.clone());
    home.mount().await;
    assert_eq!(home.origin(), Some(CatalogOrigin::Remote));

    // Cache now holds exactly the fetched record
    let cached = CacheManager::new(store).load_creatures().await.unwrap().unwrap();
    assert_eq!(cached.data, vec![griffin()]);

    let Some(Route::Detail(selected)) = home.select(1) else {
        panic!("expected navigation to the detail screen");
    };
    let mut detail = DetailScreen::new(ctx.clone(), selected);
    detail.mount().await;

    detail.toggle_favorite().await;
    assert_eq!(ctx.favorites.favorites().await.unwrap(), vec![1]);

    detail.toggle_favorite().await;
    assert_eq!(ctx.favorites.favorites().await.unwrap(), Vec::<i64>::new());
}

#[tokio::test]
async fn offline_with_existing_cache_shows_cached_list() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).await.unwrap());
    let basilisk = creature(2, "Basilisk");
    CacheManager::new(store.clone())
        .save_creatures(&[basilisk.clone()])
        .await
        .unwrap();

    let (devices, _, _) = devices(ScriptedBiometrics::enrolled());
    let mut home = HomeScreen::new(context(store, Arc::new(OfflineCatalog), devices));
    home.mount().await;

    assert_eq!(home.origin(), Some(CatalogOrigin::Cache));
    assert_eq!(home.visible_creatures(), vec![&basilisk]);
    assert_eq!(home.status_message(), None);
}

#[tokio::test]
async fn capture_without_enrollment_leaves_registry_untouched() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let (devices, camera, _) = devices(ScriptedBiometrics::not_enrolled());
    let ctx = context(store, Arc::new(StaticCatalog::new(vec![griffin()])), devices);
    ctx.images.record(2, "file:///two.jpg").await.unwrap();

    let mut detail = DetailScreen::new(ctx.clone(), griffin());
    detail.mount().await;
    assert_eq!(detail.take_picture().await, None);

    assert_eq!(camera.captures(), 0);
    assert_eq!(ctx.images.image_for(1).await.unwrap(), None);
    assert_eq!(ctx.images.image_for(2).await.unwrap().as_deref(), Some("file:///two.jpg"));
}

#[tokio::test]
async fn captured_photo_appears_on_map_after_focus() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let (devices, _, location) = devices(ScriptedBiometrics::enrolled());
    let ctx = context(
        store,
        Arc::new(StaticCatalog::new(vec![griffin(), creature(2, "Basilisk")])),
        devices,
    );

    let mut map = MapScreen::new(ctx.clone());
    map.mount(None).await;
    map.focus().await;
    assert!(map.markers().iter().all(|m| m.thumbnail.is_none()));

    let mut detail = DetailScreen::new(ctx.clone(), griffin());
    detail.mount().await;
    detail.take_picture().await;
    let Route::Map { selected } = detail.see_on_map() else {
        panic!("expected navigation to the map");
    };

    // Navigating back with a target re-focuses the region and reloads thumbnails
    map.navigate_to(selected.as_ref().unwrap());
    map.focus().await;
    assert_eq!(map.selected(), Some(1));
    let marker = map
        .markers()
        .into_iter()
        .find(|m| m.creature_id == Some(1))
        .unwrap();
    assert_eq!(
        marker.thumbnail.as_deref(),
        Some("file:///cache/ImagePicker/griffin.jpg")
    );

    map.exit();
    assert!(!location.is_watching());
}
