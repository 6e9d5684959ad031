//! Device capability boundary.
//!
//! The camera, location services, and biometric hardware are external
//! collaborators. This module only defines the seams through which the
//! flows talk to them, plus no-hardware fallbacks so a front end without
//! sensors (a terminal, a test) can still be wired up.

pub mod biometric;
pub mod camera;
pub mod location;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use biometric::{AuthenticateOptions, AuthenticationResult, BiometricAuthenticator, FallbackBiometrics};
pub use camera::{Camera, CaptureOptions, CaptureResult, CapturedAsset, FallbackCamera};
pub use location::{
    LocationAccuracy, LocationFix, LocationProvider, LocationWatch, NoLocation, WatchOptions,
};

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Device capability unavailable: {0}")]
    Unavailable(String),

    #[error("Device call failed: {0}")]
    Failed(String),
}

/// The set of device capabilities a front end provides.
#[derive(Clone)]
pub struct Devices {
    pub camera: Arc<dyn Camera>,
    pub biometrics: Arc<dyn BiometricAuthenticator>,
    pub location: Arc<dyn LocationProvider>,
}

impl Devices {
    /// A device with no camera, no biometric sensor, and no location services.
    pub fn headless() -> Self {
        Self {
            camera: Arc::new(FallbackCamera),
            biometrics: Arc::new(FallbackBiometrics),
            location: Arc::new(NoLocation),
        }
    }
}
