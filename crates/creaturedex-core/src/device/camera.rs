use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{DeviceError, PermissionStatus};

/// Options passed to the camera when taking a picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureOptions {
    pub allows_editing: bool,
    /// Crop aspect as (width, height).
    pub aspect: (u32, u32),
    /// Compression quality from 0.0 to 1.0.
    pub quality: f32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            allows_editing: true,
            aspect: (4, 3),
            quality: 1.0,
        }
    }
}

/// A photo produced by the camera. The uri points at device-managed storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedAsset {
    pub uri: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl CapturedAsset {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            width: None,
            height: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureResult {
    Cancelled,
    Captured(Vec<CapturedAsset>),
}

impl CaptureResult {
    /// The first captured asset, if the user did not cancel.
    pub fn first_asset(&self) -> Option<&CapturedAsset> {
        match self {
            CaptureResult::Cancelled => None,
            CaptureResult::Captured(assets) => assets.first(),
        }
    }
}

#[async_trait]
pub trait Camera: Send + Sync {
    async fn request_permission(&self) -> Result<PermissionStatus, DeviceError>;

    async fn capture(&self, options: &CaptureOptions) -> Result<CaptureResult, DeviceError>;
}

/// Camera for platforms without one: permission is always denied.
#[derive(Debug, Default)]
pub struct FallbackCamera;

#[async_trait]
impl Camera for FallbackCamera {
    async fn request_permission(&self) -> Result<PermissionStatus, DeviceError> {
        Ok(PermissionStatus::Denied)
    }

    async fn capture(&self, _options: &CaptureOptions) -> Result<CaptureResult, DeviceError> {
        Err(DeviceError::Unavailable("no camera on this platform".to_string()))
    }
}
