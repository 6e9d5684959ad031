//! One-shot biometric gate in front of sensitive actions.
//!
//! Every call re-authenticates; there is no session. The continuation only
//! runs after the authenticator reports success.

use std::future::Future;
use std::sync::Arc;

use tracing::{error, info};

use crate::device::{AuthenticateOptions, BiometricAuthenticator};
use crate::notify::{Alert, Notifier};

const AUTH_PROMPT: &str = "Verify your identity to take a picture";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Authenticated,
    /// No biometric hardware; the authenticator was never prompted.
    Unsupported,
    /// Hardware present but nothing enrolled; the authenticator was never prompted.
    NotEnrolled,
    /// The user did not pass authentication.
    Failed,
    /// The platform reported an unexpected error.
    Error(String),
}

impl GateOutcome {
    pub fn is_authenticated(&self) -> bool {
        *self == GateOutcome::Authenticated
    }
}

#[derive(Clone)]
pub struct BiometricGate {
    authenticator: Arc<dyn BiometricAuthenticator>,
    notifier: Arc<dyn Notifier>,
}

impl BiometricGate {
    pub fn new(authenticator: Arc<dyn BiometricAuthenticator>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            authenticator,
            notifier,
        }
    }

    /// Whether the device has biometric hardware. Errors read as unsupported.
    pub async fn is_supported(&self) -> bool {
        match self.authenticator.has_hardware().await {
            Ok(supported) => supported,
            Err(e) => {
                error!(error = %e, "Error checking biometric support");
                false
            }
        }
    }

    pub async fn authenticate(&self) -> GateOutcome {
        let outcome = self.check().await;
        match &outcome {
            GateOutcome::Authenticated => {}
            GateOutcome::Unsupported => self.notifier.alert(Alert::new(
                "Biometrics Unavailable",
                "This device does not support biometric authentication",
            )),
            GateOutcome::NotEnrolled => self.notifier.alert(Alert::new(
                "Biometrics Not Set Up",
                "Please set up biometric authentication in your device settings to use this feature",
            )),
            GateOutcome::Failed => self.notifier.alert(Alert::new(
                "Authentication Failed",
                "Could not verify your identity. Please try again.",
            )),
            GateOutcome::Error(_) => self.notifier.alert(Alert::new(
                "Error",
                "Authentication failed unexpectedly. Please try again.",
            )),
        }
        outcome
    }

    async fn check(&self) -> GateOutcome {
        match self.authenticator.has_hardware().await {
            Ok(true) => {}
            Ok(false) => {
                info!("No biometric hardware, skipping authentication");
                return GateOutcome::Unsupported;
            }
            Err(e) => {
                error!(error = %e, "Authentication error");
                return GateOutcome::Error(e.to_string());
            }
        }

        match self.authenticator.is_enrolled().await {
            Ok(true) => {}
            Ok(false) => {
                info!("No biometrics enrolled, skipping authentication");
                return GateOutcome::NotEnrolled;
            }
            Err(e) => {
                error!(error = %e, "Authentication error");
                return GateOutcome::Error(e.to_string());
            }
        }

        let options = AuthenticateOptions {
            prompt_message: AUTH_PROMPT.to_string(),
            disable_device_fallback: false,
        };
        match self.authenticator.authenticate(&options).await {
            Ok(result) if result.success => GateOutcome::Authenticated,
            Ok(result) => {
                info!(reason = ?result.error, "Biometric authentication failed");
                GateOutcome::Failed
            }
            Err(e) => {
                error!(error = %e, "Authentication error");
                GateOutcome::Error(e.to_string())
            }
        }
    }

    /// Authenticate, then run `action`. Returns `None` without running it
    /// when authentication does not succeed.
    pub async fn guard<F, Fut, T>(&self, action: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if self.authenticate().await.is_authenticated() {
            Some(action().await)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::testing::ScriptedBiometrics;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn gate(biometrics: Arc<ScriptedBiometrics>) -> (BiometricGate, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (BiometricGate::new(biometrics, notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn test_success_runs_continuation() {
        let biometrics = Arc::new(ScriptedBiometrics::enrolled());
        let (gate, notifier) = gate(biometrics.clone());

        let result = gate.guard(|| async { 42 }).await;
        assert_eq!(result, Some(42));
        assert_eq!(biometrics.prompts(), vec![AUTH_PROMPT.to_string()]);
        assert!(notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_not_enrolled_never_prompts() {
        let biometrics = Arc::new(ScriptedBiometrics::not_enrolled());
        let (gate, notifier) = gate(biometrics.clone());
        let ran = AtomicBool::new(false);

        let result = gate.guard(|| async { ran.store(true, Ordering::SeqCst) }).await;

        assert_eq!(result, None);
        assert!(!ran.load(Ordering::SeqCst));
        assert!(biometrics.prompts().is_empty());
        assert_eq!(notifier.titles(), vec!["Biometrics Not Set Up".to_string()]);
    }

    #[tokio::test]
    async fn test_no_hardware_never_prompts() {
        let biometrics = Arc::new(ScriptedBiometrics::no_hardware());
        let (gate, notifier) = gate(biometrics.clone());

        assert_eq!(gate.authenticate().await, GateOutcome::Unsupported);
        assert!(!gate.is_supported().await);
        assert!(biometrics.prompts().is_empty());
        assert_eq!(notifier.titles(), vec!["Biometrics Unavailable".to_string()]);
    }

    #[tokio::test]
    async fn test_rejected_authentication_alerts() {
        let biometrics = Arc::new(ScriptedBiometrics::rejecting());
        let (gate, notifier) = gate(biometrics);

        assert_eq!(gate.guard(|| async {}).await, None);
        assert_eq!(notifier.titles(), vec!["Authentication Failed".to_string()]);
    }

    #[tokio::test]
    async fn test_platform_error_alerts() {
        let biometrics = Arc::new(ScriptedBiometrics::erroring());
        let (gate, notifier) = gate(biometrics);

        assert!(matches!(gate.authenticate().await, GateOutcome::Error(_)));
        assert_eq!(notifier.titles(), vec!["Error".to_string()]);
    }

    #[tokio::test]
    async fn test_every_call_reauthenticates() {
        let biometrics = Arc::new(ScriptedBiometrics::enrolled());
        let (gate, _) = gate(biometrics.clone());

        gate.guard(|| async {}).await;
        gate.guard(|| async {}).await;
        assert_eq!(biometrics.prompts().len(), 2);
    }
}
