//! Test doubles for the store, the catalog, and device capabilities.
//!
//! Compiled for unit tests and behind the `testing` feature for
//! integration tests and downstream front ends.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::api::{ApiError, CatalogSource};
use crate::cache::{KeyValueStore, MemoryStore, StorageError};
use crate::device::{
    AuthenticateOptions, AuthenticationResult, BiometricAuthenticator, Camera, CaptureOptions,
    CaptureResult, CapturedAsset, DeviceError, LocationFix, LocationProvider, LocationWatch,
    PermissionStatus, WatchOptions,
};
use crate::models::{Creature, CreatureId};

/// A creature near the default map region.
pub fn creature(id: CreatureId, name: &str) -> Creature {
    Creature {
        id,
        name: name.to_string(),
        description: format!("{} description", name),
        year: 1500 + id,
        latitude: 51.9 + id as f64 * 0.001,
        longitude: 4.48,
    }
}

// ============================================================================
// Catalog sources
// ============================================================================

/// Source that always serves the same list.
pub struct StaticCatalog {
    creatures: Vec<Creature>,
    calls: AtomicUsize,
}

impl StaticCatalog {
    pub fn new(creatures: Vec<Creature>) -> Self {
        Self {
            creatures,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_creatures(&self) -> Result<Vec<Creature>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.creatures.clone())
    }
}

/// Source that behaves like a device without connectivity.
pub struct OfflineCatalog;

#[async_trait]
impl CatalogSource for OfflineCatalog {
    async fn fetch_creatures(&self) -> Result<Vec<Creature>, ApiError> {
        Err(ApiError::Offline("network unreachable".to_string()))
    }
}

// ============================================================================
// Storage
// ============================================================================

/// In-memory store whose reads and writes can be made to fail.
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<(), StorageError> {
        if flag.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::check(&self.fail_reads)?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::check(&self.fail_writes)?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::check(&self.fail_writes)?;
        self.inner.remove(key).await
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        Self::check(&self.fail_reads)?;
        self.inner.keys().await
    }
}

// ============================================================================
// Camera
// ============================================================================

pub struct ScriptedCamera {
    permission: PermissionStatus,
    result: CaptureResult,
    captures: AtomicUsize,
}

impl ScriptedCamera {
    /// Camera with permission granted that returns one photo at `uri`.
    pub fn returning(uri: &str) -> Self {
        Self::with_result(CaptureResult::Captured(vec![CapturedAsset::new(uri)]))
    }

    pub fn with_result(result: CaptureResult) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            result,
            captures: AtomicUsize::new(0),
        }
    }

    pub fn with_permission(permission: PermissionStatus) -> Self {
        Self {
            permission,
            result: CaptureResult::Cancelled,
            captures: AtomicUsize::new(0),
        }
    }

    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Camera for ScriptedCamera {
    async fn request_permission(&self) -> Result<PermissionStatus, DeviceError> {
        Ok(self.permission)
    }

    async fn capture(&self, _options: &CaptureOptions) -> Result<CaptureResult, DeviceError> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}

// ============================================================================
// Biometrics
// ============================================================================

#[derive(Clone, Copy)]
enum AuthScript {
    Accept,
    Reject,
    Error,
}

pub struct ScriptedBiometrics {
    hardware: bool,
    enrolled: bool,
    script: AuthScript,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBiometrics {
    fn new(hardware: bool, enrolled: bool, script: AuthScript) -> Self {
        Self {
            hardware,
            enrolled,
            script,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn enrolled() -> Self {
        Self::new(true, true, AuthScript::Accept)
    }

    pub fn not_enrolled() -> Self {
        Self::new(true, false, AuthScript::Accept)
    }

    pub fn no_hardware() -> Self {
        Self::new(false, false, AuthScript::Accept)
    }

    pub fn rejecting() -> Self {
        Self::new(true, true, AuthScript::Reject)
    }

    pub fn erroring() -> Self {
        Self::new(true, true, AuthScript::Error)
    }

    /// Prompt messages shown so far, one per authentication attempt.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl BiometricAuthenticator for ScriptedBiometrics {
    async fn has_hardware(&self) -> Result<bool, DeviceError> {
        Ok(self.hardware)
    }

    async fn is_enrolled(&self) -> Result<bool, DeviceError> {
        Ok(self.enrolled)
    }

    async fn authenticate(
        &self,
        options: &AuthenticateOptions,
    ) -> Result<AuthenticationResult, DeviceError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(options.prompt_message.clone());
        }
        match self.script {
            AuthScript::Accept => Ok(AuthenticationResult::success()),
            AuthScript::Reject => Ok(AuthenticationResult::failure("user_cancel")),
            AuthScript::Error => Err(DeviceError::Failed("sensor error".to_string())),
        }
    }
}

// ============================================================================
// Location
// ============================================================================

/// Location provider driven by the test through `push`.
pub struct ScriptedLocation {
    permission: PermissionStatus,
    sender: Mutex<Option<mpsc::Sender<LocationFix>>>,
    watches: AtomicUsize,
}

impl ScriptedLocation {
    pub fn new(permission: PermissionStatus) -> Self {
        Self {
            permission,
            sender: Mutex::new(None),
            watches: AtomicUsize::new(0),
        }
    }

    /// Deliver a fix to the active watch. Returns false when nobody is watching.
    pub fn push(&self, fix: LocationFix) -> bool {
        let guard = match self.sender.lock() {
            Ok(guard) => guard,
            Err(_) => return false,
        };
        guard.as_ref().map(|tx| tx.try_send(fix).is_ok()).unwrap_or(false)
    }

    /// Whether a watch was started and has not been released.
    pub fn is_watching(&self) -> bool {
        self.sender
            .lock()
            .map(|guard| guard.as_ref().map(|tx| !tx.is_closed()).unwrap_or(false))
            .unwrap_or(false)
    }

    pub fn watches(&self) -> usize {
        self.watches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for ScriptedLocation {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus, DeviceError> {
        Ok(self.permission)
    }

    async fn watch_position(&self, _options: WatchOptions) -> Result<LocationWatch, DeviceError> {
        let (tx, rx) = mpsc::channel(16);
        if let Ok(mut sender) = self.sender.lock() {
            *sender = Some(tx);
        }
        self.watches.fetch_add(1, Ordering::SeqCst);
        Ok(LocationWatch::new(rx))
    }
}
