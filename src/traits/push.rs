//! Device notification SDK trait abstraction.
//!
//! Covers what push registration needs from the platform: permission
//! get/request, idempotent channel creation, token issuance scoped to a
//! project id, and a physical-device check.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Operating system the client runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevicePlatform {
    Android,
    Ios,
    Desktop,
}

impl DevicePlatform {
    /// Only Android requires notification channels to exist before delivery.
    pub fn uses_channels(&self) -> bool {
        matches!(self, DevicePlatform::Android)
    }
}

/// Notification permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Importance of a notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelImportance {
    Default,
    High,
    Max,
}

/// Platform notification channel setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannelConfig {
    pub id: String,
    pub name: String,
    pub importance: ChannelImportance,
    /// Vibration pattern in milliseconds, alternating pause and buzz.
    pub vibration_pattern: Vec<u64>,
    pub light_color: String,
}

impl Default for NotificationChannelConfig {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            name: "Default".to_string(),
            importance: ChannelImportance::Max,
            vibration_pattern: vec![0, 250, 250, 250],
            light_color: "#FF231F7C".to_string(),
        }
    }
}

/// Opaque push token issued by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PushToken(String);

impl PushToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PushToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors from the device notification SDK.
#[derive(Debug, Clone, Error)]
pub enum PushError {
    #[error("Failed to set up notification channel '{channel}': {message}")]
    Channel { channel: String, message: String },

    #[error("Failed to query notification permission: {0}")]
    Permission(String),

    #[error("Failed to obtain push token: {0}")]
    Token(String),
}

/// Trait for the platform notification SDK.
#[async_trait]
pub trait PushPlatform: Send + Sync {
    /// The platform this client runs on.
    fn platform(&self) -> DevicePlatform;

    /// Whether the runtime is a physical device (not a simulator/emulator).
    fn is_physical_device(&self) -> bool;

    /// Create the channel if it does not exist. Safe to repeat.
    async fn ensure_channel(&self, config: &NotificationChannelConfig) -> Result<(), PushError>;

    /// Current permission state, without prompting.
    async fn permission_status(&self) -> Result<PermissionStatus, PushError>;

    /// Prompt the user for permission.
    async fn request_permission(&self) -> Result<PermissionStatus, PushError>;

    /// Issue a push token scoped to `project_id`.
    async fn device_token(&self, project_id: &str) -> Result<PushToken, PushError>;
}
