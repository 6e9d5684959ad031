//! Photo capture flow: camera permission, capture, and registry write.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::device::{Camera, CaptureOptions};
use crate::images::ImageRegistry;
use crate::models::CreatureId;
use crate::notify::{Alert, Notifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The photo was taken and its reference stored for the creature.
    Saved { uri: String },
    /// The user closed the camera without a photo.
    Cancelled,
    PermissionDenied,
}

#[derive(Clone)]
pub struct PhotoCapture {
    camera: Arc<dyn Camera>,
    images: ImageRegistry,
    notifier: Arc<dyn Notifier>,
    options: CaptureOptions,
}

impl PhotoCapture {
    pub fn new(camera: Arc<dyn Camera>, images: ImageRegistry, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            camera,
            images,
            notifier,
            options: CaptureOptions::default(),
        }
    }

    /// Take a picture and remember it for `id`. Any other creature's entry
    /// is left alone.
    pub async fn capture_for(&self, id: CreatureId) -> Result<CaptureOutcome> {
        let status = self
            .camera
            .request_permission()
            .await
            .context("Failed to request camera permission")?;
        if !status.is_granted() {
            info!(?status, "Camera permission not granted");
            self.notifier.alert(Alert::new(
                "Camera Permission",
                "Camera permission is required to take a picture.",
            ));
            return Ok(CaptureOutcome::PermissionDenied);
        }

        let result = self
            .camera
            .capture(&self.options)
            .await
            .context("Camera capture failed")?;
        let Some(asset) = result.first_asset() else {
            info!(creature_id = id, "Capture cancelled");
            return Ok(CaptureOutcome::Cancelled);
        };

        if let Err(e) = self.images.record(id, &asset.uri).await {
            error!(creature_id = id, error = %e, "Error saving image");
            self.notifier.alert(Alert::new("Error", "The picture could not be saved."));
            return Err(e);
        }

        Ok(CaptureOutcome::Saved {
            uri: asset.uri.clone(),
        })
    }
}
