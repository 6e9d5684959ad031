use crate::state::AppState;

pub const DARK_MODE_LABEL: &str = "Dark Mode";

pub struct SettingsScreen {
    state: AppState,
}

impl SettingsScreen {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn dark_mode_label(&self) -> &'static str {
        DARK_MODE_LABEL
    }

    pub fn is_dark_mode(&self) -> bool {
        self.state.is_dark_mode()
    }

    /// Flip the switch and return its new position.
    pub fn toggle_dark_mode(&self) -> bool {
        self.state.toggle_theme()
    }
}
