//! Map region and marker types.

use serde::{Deserialize, Serialize};

use crate::models::{Coordinates, Creature, CreatureId};

/// Center of the region shown when no creature is selected.
pub const DEFAULT_LATITUDE: f64 = 51.917319;
pub const DEFAULT_LONGITUDE: f64 = 4.484609;
/// Span of the default region in degrees.
pub const DEFAULT_DELTA: f64 = 0.045;
/// Span when zoomed onto a single creature.
pub const FOCUS_DELTA: f64 = 0.005;
/// Duration of the pan/zoom onto a selected creature.
pub const FOCUS_ANIMATION_MS: u64 = 1000;

pub const USER_MARKER_TITLE: &str = "You are here";

/// A visible map rectangle: a center plus latitude/longitude spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn focused_on(coordinates: Coordinates) -> Self {
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            latitude_delta: FOCUS_DELTA,
            longitude_delta: FOCUS_DELTA,
        }
    }

    pub fn contains(&self, coordinates: Coordinates) -> bool {
        (coordinates.latitude - self.latitude).abs() <= self.latitude_delta / 2.0
            && (coordinates.longitude - self.longitude).abs() <= self.longitude_delta / 2.0
    }
}

impl Default for MapRegion {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            latitude_delta: DEFAULT_DELTA,
            longitude_delta: DEFAULT_DELTA,
        }
    }
}

/// A region change the renderer should animate to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionAnimation {
    pub target: MapRegion,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum MarkerKind {
    /// Red pin for a catalog entry.
    Creature,
    /// Purple pin for the device position.
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Marker {
    pub kind: MarkerKind,
    pub creature_id: Option<CreatureId>,
    pub title: String,
    pub coordinates: Coordinates,
    /// Captured photo shown inside the pin.
    pub thumbnail: Option<String>,
}

impl Marker {
    pub fn for_creature(creature: &Creature, thumbnail: Option<String>) -> Self {
        Self {
            kind: MarkerKind::Creature,
            creature_id: Some(creature.id),
            title: creature.name.clone(),
            coordinates: creature.coordinates(),
            thumbnail,
        }
    }

    pub fn for_user(coordinates: Coordinates) -> Self {
        Self {
            kind: MarkerKind::User,
            creature_id: None,
            title: USER_MARKER_TITLE.to_string(),
            coordinates,
            thumbnail: None,
        }
    }

    pub fn color(&self) -> &'static str {
        match self.kind {
            MarkerKind::Creature => "red",
            MarkerKind::User => "purple",
        }
    }
}
