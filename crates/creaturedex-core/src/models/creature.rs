use serde::{Deserialize, Serialize};

/// Identifier of a creature in the remote catalog.
pub type CreatureId = i64;

/// A catalog record as served by the remote endpoint.
///
/// Unknown fields are ignored on read, so the catalog can grow without a
/// cache migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Creature {
    pub id: CreatureId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Creature {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Caption shown under the description on the detail screen.
    pub fn first_spotted_display(&self) -> String {
        format!("First Spotted: {}", self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
