//! Mock device notification SDK for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::traits::{
    DevicePlatform, NotificationChannelConfig, PermissionStatus, PushError, PushPlatform,
    PushToken,
};

/// Configurable push platform double.
///
/// Defaults to a physical Android device with permission already granted,
/// issuing the token `ExponentPushToken[mock]`.
#[derive(Debug, Clone)]
pub struct MockPushPlatform {
    platform: DevicePlatform,
    physical: bool,
    status: Arc<Mutex<PermissionStatus>>,
    request_result: Arc<Mutex<PermissionStatus>>,
    token_result: Arc<Mutex<Result<PushToken, PushError>>>,
    token_gate: Arc<Mutex<Option<Arc<Notify>>>>,
    channels_created: Arc<Mutex<Vec<String>>>,
    permission_requests: Arc<Mutex<usize>>,
    token_requests: Arc<Mutex<Vec<String>>>,
}

impl MockPushPlatform {
    pub fn new() -> Self {
        Self::with_platform(DevicePlatform::Android, true)
    }

    pub fn with_platform(platform: DevicePlatform, physical: bool) -> Self {
        Self {
            platform,
            physical,
            status: Arc::new(Mutex::new(PermissionStatus::Granted)),
            request_result: Arc::new(Mutex::new(PermissionStatus::Granted)),
            token_result: Arc::new(Mutex::new(Ok(PushToken::new("ExponentPushToken[mock]")))),
            token_gate: Arc::new(Mutex::new(None)),
            channels_created: Arc::new(Mutex::new(Vec::new())),
            permission_requests: Arc::new(Mutex::new(0)),
            token_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the current permission and what a prompt would return.
    pub fn set_permission(&self, current: PermissionStatus, after_request: PermissionStatus) {
        *self.status.lock().unwrap() = current;
        *self.request_result.lock().unwrap() = after_request;
    }

    pub fn set_token_result(&self, result: Result<PushToken, PushError>) {
        *self.token_result.lock().unwrap() = result;
    }

    /// Hold token issuance until the returned gate is notified.
    pub fn gate_token(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.token_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn channels_created(&self) -> Vec<String> {
        self.channels_created.lock().unwrap().clone()
    }

    pub fn permission_requests(&self) -> usize {
        *self.permission_requests.lock().unwrap()
    }

    /// Project ids tokens were requested for.
    pub fn token_requests(&self) -> Vec<String> {
        self.token_requests.lock().unwrap().clone()
    }
}

impl Default for MockPushPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushPlatform for MockPushPlatform {
    fn platform(&self) -> DevicePlatform {
        self.platform
    }

    fn is_physical_device(&self) -> bool {
        self.physical
    }

    async fn ensure_channel(&self, config: &NotificationChannelConfig) -> Result<(), PushError> {
        self.channels_created.lock().unwrap().push(config.id.clone());
        Ok(())
    }

    async fn permission_status(&self) -> Result<PermissionStatus, PushError> {
        Ok(*self.status.lock().unwrap())
    }

    async fn request_permission(&self) -> Result<PermissionStatus, PushError> {
        *self.permission_requests.lock().unwrap() += 1;
        let granted = *self.request_result.lock().unwrap();
        *self.status.lock().unwrap() = granted;
        Ok(granted)
    }

    async fn device_token(&self, project_id: &str) -> Result<PushToken, PushError> {
        self.token_requests
            .lock()
            .unwrap()
            .push(project_id.to_string());

        let gate = self.token_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.token_result.lock().unwrap().clone()
    }
}
