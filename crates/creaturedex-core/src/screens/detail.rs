use tracing::{error, warn};

use crate::capture::CaptureOutcome;
use crate::context::AppContext;
use crate::models::Creature;
use crate::notify::Alert;

use super::Route;

const NO_PICTURE_TEXT: &str = "No picture taken yet";

pub struct DetailScreen {
    ctx: AppContext,
    creature: Creature,
    is_favorite: bool,
    image_uri: Option<String>,
    biometric_supported: bool,
}

impl DetailScreen {
    pub fn new(ctx: AppContext, creature: Creature) -> Self {
        Self {
            ctx,
            creature,
            is_favorite: false,
            image_uri: None,
            biometric_supported: false,
        }
    }

    /// Load favorite status, the stored picture, and biometric support.
    /// Each part degrades independently when it fails.
    pub async fn mount(&mut self) {
        let id = self.creature.id;
        let (favorite, image, supported) = tokio::join!(
            self.ctx.favorites.is_favorite(id),
            self.ctx.images.image_for(id),
            self.ctx.gate.is_supported(),
        );

        match favorite {
            Ok(favorite) => self.is_favorite = favorite,
            Err(e) => error!(creature_id = id, error = %e, "Error loading favorite status"),
        }
        match image {
            Ok(image) => self.image_uri = image,
            Err(e) => error!(creature_id = id, error = %e, "Error loading image"),
        }
        self.biometric_supported = supported;
    }

    pub fn creature(&self) -> &Creature {
        &self.creature
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn image_uri(&self) -> Option<&str> {
        self.image_uri.as_deref()
    }

    /// Text shown in place of the picture when there is none.
    pub fn image_placeholder(&self) -> Option<&'static str> {
        if self.image_uri.is_none() {
            Some(NO_PICTURE_TEXT)
        } else {
            None
        }
    }

    pub fn picture_button_label(&self) -> &'static str {
        if self.biometric_supported {
            "Take Picture"
        } else {
            "Biometric Unavailable"
        }
    }

    pub fn can_take_picture(&self) -> bool {
        self.biometric_supported
    }

    /// Toggle the favorite flag. The view only changes once the ledger has
    /// persisted the new state; on failure it keeps showing the old one.
    pub async fn toggle_favorite(&mut self) -> bool {
        match self.ctx.favorites.toggle_favorite(self.creature.id).await {
            Ok(now_favorite) => self.is_favorite = now_favorite,
            Err(e) => {
                error!(creature_id = self.creature.id, error = %e, "Error saving favorite status");
                self.ctx.notifier.alert(Alert::new(
                    "Error",
                    "Could not update favorites. Please try again.",
                ));
            }
        }
        self.is_favorite
    }

    /// Authenticate, then capture and store a picture for this creature.
    /// Returns the outcome when the gate let the capture run.
    pub async fn take_picture(&mut self) -> Option<CaptureOutcome> {
        if !self.biometric_supported {
            warn!(creature_id = self.creature.id, "Picture requested without biometric support");
        }

        let capture = self.ctx.capture.clone();
        let id = self.creature.id;
        let result = self.ctx.gate.guard(|| async move { capture.capture_for(id).await }).await?;

        match result {
            Ok(outcome) => {
                if let CaptureOutcome::Saved { ref uri } = outcome {
                    self.image_uri = Some(uri.clone());
                }
                Some(outcome)
            }
            Err(e) => {
                error!(creature_id = id, error = %e, "Picture capture failed");
                None
            }
        }
    }

    pub fn see_on_map(&self) -> Route {
        Route::Map {
            selected: Some(self.creature.clone()),
        }
    }

    pub fn go_back(&self) -> Route {
        Route::Back
    }
}
