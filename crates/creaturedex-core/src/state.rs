//! Application-wide state shared by the screens.
//!
//! Holds the dark-mode flag. Screens receive an `AppState` when they are
//! built and may subscribe to be told when the flag changes.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

/// Clone is cheap - every clone observes and updates the same flag.
#[derive(Clone)]
pub struct AppState {
    dark_mode: Arc<watch::Sender<bool>>,
}

impl AppState {
    pub fn new(dark_mode: bool) -> Self {
        let (tx, _rx) = watch::channel(dark_mode);
        Self {
            dark_mode: Arc::new(tx),
        }
    }

    pub fn is_dark_mode(&self) -> bool {
        *self.dark_mode.borrow()
    }

    /// Set the flag. Subscribers are only notified when the value changes.
    pub fn set_dark_mode(&self, enabled: bool) {
        let changed = self.dark_mode.send_if_modified(|current| {
            if *current == enabled {
                false
            } else {
                *current = enabled;
                true
            }
        });
        if changed {
            debug!(dark_mode = enabled, "Theme changed");
        }
    }

    /// Flip the flag and return the new value.
    pub fn toggle_theme(&self) -> bool {
        self.dark_mode.send_modify(|current| *current = !*current);
        let enabled = self.is_dark_mode();
        debug!(dark_mode = enabled, "Theme toggled");
        enabled
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.dark_mode.subscribe()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_theme() {
        let state = AppState::default();
        assert!(!state.is_dark_mode());
        assert!(state.toggle_theme());
        assert!(state.is_dark_mode());
        assert!(!state.toggle_theme());
    }

    #[test]
    fn test_clones_share_flag() {
        let state = AppState::new(false);
        let other = state.clone();
        other.set_dark_mode(true);
        assert!(state.is_dark_mode());
    }

    #[tokio::test]
    async fn test_subscribers_notified_on_change() {
        let state = AppState::new(false);
        let mut rx = state.subscribe();

        state.toggle_theme();
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());
    }

    #[test]
    fn test_set_same_value_does_not_notify() {
        let state = AppState::new(true);
        let rx = state.subscribe();

        state.set_dark_mode(true);
        assert!(!rx.has_changed().unwrap());

        state.set_dark_mode(false);
        assert!(rx.has_changed().unwrap());
    }
}
