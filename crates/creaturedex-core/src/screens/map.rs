use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::device::{LocationFix, LocationWatch, WatchOptions};
use crate::map::{MapRegion, Marker, RegionAnimation, FOCUS_ANIMATION_MS};
use crate::models::{Coordinates, Creature, CreatureId};

use super::Route;

const LOCATION_DENIED_MESSAGE: &str = "Permission to access location was denied";

pub struct MapScreen {
    ctx: AppContext,
    creatures: Vec<Creature>,
    images: HashMap<CreatureId, String>,
    region: MapRegion,
    pending_animation: Option<RegionAnimation>,
    selected: Option<CreatureId>,
    user_location: Option<LocationFix>,
    error_message: Option<String>,
    watch: Option<LocationWatch>,
}

impl MapScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            creatures: Vec::new(),
            images: HashMap::new(),
            region: MapRegion::default(),
            pending_animation: None,
            selected: None,
            user_location: None,
            error_message: None,
            watch: None,
        }
    }

    /// Load creatures, start watching the device position, and focus the
    /// creature the screen was opened for, if any.
    pub async fn mount(&mut self, selected: Option<Creature>) {
        let load = self.ctx.catalog.fetch_creatures().await;
        self.creatures = load.creatures;
        self.start_location_watch().await;
        if let Some(creature) = selected {
            self.navigate_to(&creature);
        }
    }

    /// Screen regained focus: refresh captured-image thumbnails.
    pub async fn focus(&mut self) {
        if self.creatures.is_empty() {
            return;
        }
        self.images = self.ctx.images.images_for(&self.creatures).await;
        debug!(count = self.images.len(), "Refreshed creature thumbnails");
    }

    /// Release the location subscription when leaving the screen.
    pub fn exit(&mut self) {
        if let Some(watch) = self.watch.take() {
            watch.remove();
            debug!("Stopped watching location");
        }
    }

    async fn start_location_watch(&mut self) {
        let status = match self.ctx.location.request_foreground_permission().await {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Location permission request failed");
                self.error_message = Some(LOCATION_DENIED_MESSAGE.to_string());
                return;
            }
        };
        if !status.is_granted() {
            info!(?status, "Location permission not granted");
            self.error_message = Some(LOCATION_DENIED_MESSAGE.to_string());
            return;
        }

        match self.ctx.location.watch_position(WatchOptions::default()).await {
            Ok(watch) => self.watch = Some(watch),
            Err(e) => warn!(error = %e, "Failed to start location watch"),
        }
    }

    /// Focus the map on `creature`. The region change is handed to the
    /// renderer as a pending animation.
    pub fn navigate_to(&mut self, creature: &Creature) {
        let target = MapRegion::focused_on(creature.coordinates());
        self.region = target;
        self.selected = Some(creature.id);
        self.pending_animation = Some(RegionAnimation {
            target,
            duration_ms: FOCUS_ANIMATION_MS,
        });
    }

    /// Hand the pending animation to the renderer, once.
    pub fn take_animation(&mut self) -> Option<RegionAnimation> {
        self.pending_animation.take()
    }

    /// Apply every location fix delivered since the last call.
    pub fn poll_location(&mut self) -> Option<LocationFix> {
        if let Some(fix) = self.watch.as_mut().and_then(|w| w.latest()) {
            self.user_location = Some(fix);
        }
        self.user_location
    }

    /// Wait for the next location fix and apply it.
    pub async fn next_location(&mut self) -> Option<LocationFix> {
        let fix = self.watch.as_mut()?.next().await?;
        self.user_location = Some(fix);
        Some(fix)
    }

    pub fn region(&self) -> MapRegion {
        self.region
    }

    pub fn selected(&self) -> Option<CreatureId> {
        self.selected
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_watching_location(&self) -> bool {
        self.watch.is_some()
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn markers(&self) -> Vec<Marker> {
        let mut markers: Vec<Marker> = self
            .creatures
            .iter()
            .map(|c| Marker::for_creature(c, self.images.get(&c.id).cloned()))
            .collect();
        if let Some(fix) = self.user_location {
            markers.push(Marker::for_user(Coordinates {
                latitude: fix.latitude,
                longitude: fix.longitude,
            }));
        }
        markers
    }

    pub fn press_marker(&self, id: CreatureId) -> Option<Route> {
        self.creatures
            .iter()
            .find(|c| c.id == id)
            .map(|c| Route::Detail(c.clone()))
    }
}

impl Drop for MapScreen {
    fn drop(&mut self) {
        self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::device::{Devices, FallbackBiometrics, FallbackCamera, PermissionStatus};
    use crate::map::{MarkerKind, FOCUS_DELTA};
    use crate::notify::LogNotifier;
    use crate::state::AppState;
    use crate::testing::{creature, ScriptedLocation, StaticCatalog};
    use std::sync::Arc;

    fn context(location: Arc<ScriptedLocation>) -> AppContext {
        let catalog = Arc::new(StaticCatalog::new(vec![
            creature(1, "Griffin"),
            creature(2, "Basilisk"),
        ]));
        context_with(location, catalog)
    }

    fn context_with(location: Arc<ScriptedLocation>, catalog: Arc<StaticCatalog>) -> AppContext {
        let devices = Devices {
            camera: Arc::new(FallbackCamera),
            biometrics: Arc::new(FallbackBiometrics),
            location,
        };
        AppContext::new(
            Arc::new(MemoryStore::new()),
            catalog,
            devices,
            Arc::new(LogNotifier),
            AppState::default(),
        )
    }

    fn fix() -> LocationFix {
        LocationFix {
            latitude: 51.91,
            longitude: 4.47,
            accuracy: Some(5.0),
        }
    }

    #[tokio::test]
    async fn test_default_region_without_selection() {
        let location = Arc::new(ScriptedLocation::new(PermissionStatus::Granted));
        let mut screen = MapScreen::new(context(location));
        screen.mount(None).await;

        assert_eq!(screen.region(), MapRegion::default());
        assert_eq!(screen.take_animation(), None);
        assert_eq!(screen.selected(), None);
    }

    #[tokio::test]
    async fn test_selection_animates_to_creature() {
        let location = Arc::new(ScriptedLocation::new(PermissionStatus::Granted));
        let mut screen = MapScreen::new(context(location));
        let target = creature(2, "Basilisk");
        screen.mount(Some(target.clone())).await;

        let animation = screen.take_animation().expect("expected an animation");
        assert_eq!(animation.duration_ms, 1000);
        assert_eq!(animation.target.latitude, target.latitude);
        assert_eq!(animation.target.latitude_delta, FOCUS_DELTA);
        assert_eq!(screen.region(), animation.target);
        assert_eq!(screen.selected(), Some(2));
        // Consumed once
        assert_eq!(screen.take_animation(), None);
    }

    #[tokio::test]
    async fn test_markers_include_user_location() {
        let location = Arc::new(ScriptedLocation::new(PermissionStatus::Granted));
        let mut screen = MapScreen::new(context(location.clone()));
        screen.mount(None).await;
        assert_eq!(screen.markers().len(), 2);

        assert!(location.push(fix()));
        assert_eq!(screen.poll_location(), Some(fix()));

        let markers = screen.markers();
        assert_eq!(markers.len(), 3);
        let user = markers.last().unwrap();
        assert_eq!(user.kind, MarkerKind::User);
        assert_eq!(user.title, "You are here");
    }

    #[tokio::test]
    async fn test_next_location_waits_for_fix() {
        let location = Arc::new(ScriptedLocation::new(PermissionStatus::Granted));
        let mut screen = MapScreen::new(context(location.clone()));
        screen.mount(None).await;

        location.push(fix());
        assert_eq!(screen.next_location().await, Some(fix()));
    }

    #[tokio::test]
    async fn test_location_denied_sets_message() {
        let location = Arc::new(ScriptedLocation::new(PermissionStatus::Denied));
        let mut screen = MapScreen::new(context(location.clone()));
        screen.mount(None).await;

        assert_eq!(screen.error_message(), Some("Permission to access location was denied"));
        assert!(!screen.is_watching_location());
        assert_eq!(location.watches(), 0);
        // Creature markers still show
        assert_eq!(screen.markers().len(), 2);
    }

    #[tokio::test]
    async fn test_exit_releases_watch() {
        let location = Arc::new(ScriptedLocation::new(PermissionStatus::Granted));
        let mut screen = MapScreen::new(context(location.clone()));
        screen.mount(None).await;
        assert!(location.is_watching());

        screen.exit();
        assert!(!location.is_watching());
        assert!(!screen.is_watching_location());
    }

    #[tokio::test]
    async fn test_drop_releases_watch() {
        let location = Arc::new(ScriptedLocation::new(PermissionStatus::Granted));
        {
            let mut screen = MapScreen::new(context(location.clone()));
            screen.mount(None).await;
            assert!(location.is_watching());
        }
        assert!(!location.is_watching());
    }

    #[tokio::test]
    async fn test_focus_refreshes_thumbnails() {
        let location = Arc::new(ScriptedLocation::new(PermissionStatus::Granted));
        let ctx = context(location);
        let mut screen = MapScreen::new(ctx.clone());
        screen.mount(None).await;
        screen.focus().await;
        assert!(screen.markers().iter().all(|m| m.thumbnail.is_none()));

        ctx.images.record(1, "file:///griffin.jpg").await.unwrap();
        screen.focus().await;

        let griffin = screen
            .markers()
            .into_iter()
            .find(|m| m.creature_id == Some(1))
            .unwrap();
        assert_eq!(griffin.thumbnail.as_deref(), Some("file:///griffin.jpg"));
    }

    #[tokio::test]
    async fn test_press_marker_navigates() {
        let location = Arc::new(ScriptedLocation::new(PermissionStatus::Granted));
        let mut screen = MapScreen::new(context(location));
        screen.mount(None).await;
        assert_eq!(screen.press_marker(1), Some(Route::Detail(creature(1, "Griffin"))));
        assert_eq!(screen.press_marker(9), None);
    }

    #[tokio::test]
    async fn test_focusing_a_creature_fetches_once() {
        let location = Arc::new(ScriptedLocation::new(PermissionStatus::Granted));
        let catalog = Arc::new(StaticCatalog::new(vec![creature(1, "Griffin")]));
        let mut screen = MapScreen::new(context_with(location, catalog.clone()));

        screen.mount(None).await;
        let griffin = screen.creatures()[0].clone();
        screen.navigate_to(&griffin);
        screen.focus().await;
        screen.focus().await;

        assert_eq!(screen.selected(), Some(1));
        assert_eq!(catalog.calls(), 1);
    }
}
