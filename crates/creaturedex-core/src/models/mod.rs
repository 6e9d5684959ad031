//! Data models for catalog entities.
//!
//! This module contains the data structures shared by every screen:
//!
//! - `Creature`: a catalog record with identity, text, and coordinates
//! - `CreatureId`: the identifier used by favorites and the image registry
//! - `Coordinates`: a latitude/longitude pair

pub mod creature;

pub use creature::{Coordinates, Creature, CreatureId};
