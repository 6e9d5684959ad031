//! Terminal stand-ins for the device capabilities.
//!
//! A terminal has no camera or biometric sensor. The camera is replaced by
//! an image file given on the command line, and biometrics by a PIN typed
//! at a hidden prompt.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use creaturedex_core::device::{
    AuthenticateOptions, AuthenticationResult, BiometricAuthenticator, Camera, CaptureOptions,
    CaptureResult, CapturedAsset, NoLocation,
};
use creaturedex_core::notify::{Alert, Notifier};
use creaturedex_core::{DeviceError, Devices, PermissionStatus};
use tracing::debug;

/// "Camera" that captures an existing image file.
pub struct FileCamera {
    path: Option<PathBuf>,
}

impl FileCamera {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl Camera for FileCamera {
    async fn request_permission(&self) -> Result<PermissionStatus, DeviceError> {
        Ok(if self.path.is_some() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        })
    }

    async fn capture(&self, options: &CaptureOptions) -> Result<CaptureResult, DeviceError> {
        let Some(ref path) = self.path else {
            return Ok(CaptureResult::Cancelled);
        };
        let absolute = tokio::fs::canonicalize(path)
            .await
            .map_err(|e| DeviceError::Failed(format!("{}: {}", path.display(), e)))?;
        debug!(path = %absolute.display(), ?options, "Captured image file");
        Ok(CaptureResult::Captured(vec![CapturedAsset::new(format!(
            "file://{}",
            absolute.display()
        ))]))
    }
}

/// Biometric stand-in that asks for the configured capture PIN.
/// Without a configured PIN it reports nothing enrolled.
pub struct PinAuthenticator {
    pin: Option<String>,
}

impl PinAuthenticator {
    pub fn new(pin: Option<String>) -> Self {
        Self { pin }
    }
}

#[async_trait]
impl BiometricAuthenticator for PinAuthenticator {
    async fn has_hardware(&self) -> Result<bool, DeviceError> {
        Ok(true)
    }

    async fn is_enrolled(&self) -> Result<bool, DeviceError> {
        Ok(self.pin.as_deref().is_some_and(|p| !p.is_empty()))
    }

    async fn authenticate(
        &self,
        options: &AuthenticateOptions,
    ) -> Result<AuthenticationResult, DeviceError> {
        let Some(expected) = self.pin.clone() else {
            return Ok(AuthenticationResult::failure("no PIN configured"));
        };
        let prompt = format!("{} (PIN): ", options.prompt_message);
        let entered = tokio::task::spawn_blocking(move || rpassword::prompt_password(prompt))
            .await
            .map_err(|e| DeviceError::Failed(e.to_string()))?
            .map_err(|e| DeviceError::Failed(e.to_string()))?;

        if entered.trim() == expected {
            Ok(AuthenticationResult::success())
        } else {
            Ok(AuthenticationResult::failure("PIN mismatch"))
        }
    }
}

/// Prints alerts to stderr.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, alert: Alert) {
        eprintln!("{}: {}", alert.title, alert.message);
    }
}

pub fn terminal_devices(photo: Option<PathBuf>, pin: Option<String>) -> Devices {
    Devices {
        camera: Arc::new(FileCamera::new(photo)),
        biometrics: Arc::new(PinAuthenticator::new(pin)),
        location: Arc::new(NoLocation),
    }
}
