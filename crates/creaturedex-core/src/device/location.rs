use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::{DeviceError, PermissionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters, when the platform reports one.
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationAccuracy {
    Lowest,
    Low,
    Balanced,
    High,
    Highest,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatchOptions {
    pub accuracy: LocationAccuracy,
    /// Minimum movement in meters between two updates.
    pub distance_interval_m: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            accuracy: LocationAccuracy::High,
            distance_interval_m: 10.0,
        }
    }
}

/// A live position subscription.
///
/// Providers push fixes into the channel; dropping the watch (or calling
/// `remove`) closes it, which is the provider's signal to stop watching.
#[derive(Debug)]
pub struct LocationWatch {
    updates: mpsc::Receiver<LocationFix>,
}

impl LocationWatch {
    pub fn new(updates: mpsc::Receiver<LocationFix>) -> Self {
        Self { updates }
    }

    /// Wait for the next fix. `None` once the provider has stopped.
    pub async fn next(&mut self) -> Option<LocationFix> {
        self.updates.recv().await
    }

    /// Drain every fix delivered so far and return the most recent one.
    pub fn latest(&mut self) -> Option<LocationFix> {
        let mut latest = None;
        while let Ok(fix) = self.updates.try_recv() {
            latest = Some(fix);
        }
        latest
    }

    pub fn remove(mut self) {
        self.updates.close();
    }
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus, DeviceError>;

    async fn watch_position(&self, options: WatchOptions) -> Result<LocationWatch, DeviceError>;
}

/// Provider for platforms without location services.
#[derive(Debug, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus, DeviceError> {
        Ok(PermissionStatus::Denied)
    }

    async fn watch_position(&self, _options: WatchOptions) -> Result<LocationWatch, DeviceError> {
        Err(DeviceError::Unavailable("no location services on this platform".to_string()))
    }
}
