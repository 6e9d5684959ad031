use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::DeviceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticateOptions {
    pub prompt_message: String,
    /// When false the platform may offer its passcode as a fallback.
    pub disable_device_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationResult {
    pub success: bool,
    /// Platform reason on failure (user cancel, lockout, ...).
    pub error: Option<String>,
}

impl AuthenticationResult {
    pub fn success() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
        }
    }
}

#[async_trait]
pub trait BiometricAuthenticator: Send + Sync {
    async fn has_hardware(&self) -> Result<bool, DeviceError>;

    async fn is_enrolled(&self) -> Result<bool, DeviceError>;

    async fn authenticate(
        &self,
        options: &AuthenticateOptions,
    ) -> Result<AuthenticationResult, DeviceError>;
}

/// Authenticator for platforms without biometric hardware.
///
/// Reports no hardware and no enrollment, so the gate short-circuits before
/// ever prompting.
#[derive(Debug, Default)]
pub struct FallbackBiometrics;

#[async_trait]
impl BiometricAuthenticator for FallbackBiometrics {
    async fn has_hardware(&self) -> Result<bool, DeviceError> {
        Ok(false)
    }

    async fn is_enrolled(&self) -> Result<bool, DeviceError> {
        Ok(false)
    }

    async fn authenticate(
        &self,
        _options: &AuthenticateOptions,
    ) -> Result<AuthenticationResult, DeviceError> {
        Ok(AuthenticationResult::failure(
            "biometric authentication not available on this platform",
        ))
    }
}
