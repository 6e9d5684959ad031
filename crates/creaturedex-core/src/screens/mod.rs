//! Screen controllers.
//!
//! Each controller holds the view state of one screen and composes the
//! services from `AppContext`. None of them owns canonical data: they read
//! the store when mounted or focused and write through it on user actions.
//!
//! - `HomeScreen`: catalog list with a favorites filter
//! - `DetailScreen`: one creature, favorite toggle, gated photo capture
//! - `MapScreen`: creature markers, live user position, focus animation
//! - `SettingsScreen`: dark mode switch

pub mod detail;
pub mod home;
pub mod map;
pub mod settings;

pub use detail::DetailScreen;
pub use home::{CreatureRow, HomeScreen};
pub use map::MapScreen;
pub use settings::SettingsScreen;

use crate::models::Creature;

/// Navigation target. Payloads travel by value.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Detail(Creature),
    Map { selected: Option<Creature> },
    Settings,
    Back,
}
