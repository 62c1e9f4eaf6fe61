//! Registers the device push token whenever a user signs in.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::auth::{ApiClient, ApiError, SessionTransition, TransitionReceiver};
use crate::traits::{NotificationChannelConfig, PushError, PushPlatform};

/// Registrar settings.
#[derive(Debug, Clone)]
pub struct RegistrarConfig {
    /// Project the push token is scoped to.
    pub project_id: String,
    /// Channel created on platforms that use channels.
    pub channel: NotificationChannelConfig,
    /// Also register when a stored session is restored at startup.
    pub register_on_restore: bool,
}

impl RegistrarConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            channel: NotificationChannelConfig::default(),
            register_on_restore: false,
        }
    }

    pub fn with_channel(mut self, channel: NotificationChannelConfig) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_register_on_restore(mut self, enabled: bool) -> Self {
        self.register_on_restore = enabled;
        self
    }
}

/// Why a registration attempt stopped without uploading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Simulators and emulators cannot receive pushes.
    NotPhysicalDevice,
    PermissionDenied,
    /// The session the attempt started for is no longer bound.
    StaleSession,
}

/// Result of handling one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    Skipped(SkipReason),
    Failed(String),
    /// The transition does not call for registration.
    Ignored,
}

#[derive(Debug, Error)]
enum RegistrationError {
    #[error(transparent)]
    Push(#[from] PushError),
    #[error("token upload failed: {0}")]
    Upload(#[from] ApiError),
}

/// Uploads push tokens for newly signed-in users.
pub struct NotificationRegistrar {
    push: Arc<dyn PushPlatform>,
    api: ApiClient,
    config: RegistrarConfig,
    configured_channels: Mutex<HashSet<String>>,
}

impl std::fmt::Debug for NotificationRegistrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationRegistrar")
            .field("config", &self.config)
            .finish()
    }
}

impl NotificationRegistrar {
    /// `api` must share the controller's binder; its bound id decides
    /// whether an attempt is still current.
    pub fn new(push: Arc<dyn PushPlatform>, api: ApiClient, config: RegistrarConfig) -> Self {
        Self {
            push,
            api,
            config,
            configured_channels: Mutex::new(HashSet::new()),
        }
    }

    pub fn config(&self) -> &RegistrarConfig {
        &self.config
    }

    /// React to one transition. At most one attempt per call, never retried.
    pub async fn handle(&self, transition: &SessionTransition) -> RegistrationOutcome {
        let wanted = transition.is_sign_in()
            || (transition.is_restore() && self.config.register_on_restore);
        let session = match transition.session() {
            Some(session) if wanted => session,
            _ => return RegistrationOutcome::Ignored,
        };

        match self.register(&session.id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(user_id = %session.id, "Push registration failed: {}", e);
                RegistrationOutcome::Failed(e.to_string())
            }
        }
    }

    async fn register(&self, user_id: &str) -> Result<RegistrationOutcome, RegistrationError> {
        self.ensure_channel().await?;

        if !self.push.is_physical_device() {
            tracing::debug!("Skipping push registration: not a physical device");
            return Ok(RegistrationOutcome::Skipped(SkipReason::NotPhysicalDevice));
        }

        let mut status = self.push.permission_status().await?;
        if !status.is_granted() {
            status = self.push.request_permission().await?;
        }
        if !status.is_granted() {
            tracing::debug!(?status, "Skipping push registration: permission not granted");
            return Ok(RegistrationOutcome::Skipped(SkipReason::PermissionDenied));
        }

        let token = self.push.device_token(&self.config.project_id).await?;

        if !self.api.binder().is_bound_to(user_id) {
            tracing::debug!(user_id, "Skipping push upload: session changed");
            return Ok(RegistrationOutcome::Skipped(SkipReason::StaleSession));
        }

        self.api.register_push_token(&token, user_id).await?;
        tracing::info!(user_id, "Registered push token");
        Ok(RegistrationOutcome::Registered)
    }

    /// Create the channel once per process per channel id.
    async fn ensure_channel(&self) -> Result<(), PushError> {
        if !self.push.platform().uses_channels() {
            return Ok(());
        }

        let id = &self.config.channel.id;
        if self.channel_configured(id) {
            return Ok(());
        }

        self.push.ensure_channel(&self.config.channel).await?;
        self.configured_channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone());
        tracing::debug!(channel = %id, "Notification channel ready");
        Ok(())
    }

    fn channel_configured(&self, id: &str) -> bool {
        self.configured_channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }

    /// Handle transitions from `rx` on a background task until the
    /// controller is dropped.
    pub fn spawn(self: Arc<Self>, mut rx: TransitionReceiver) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(transition) => {
                        let outcome = self.handle(&transition).await;
                        tracing::debug!(sequence = transition.sequence, ?outcome, "Handled transition");
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("Push registrar lagged, missed {} transitions", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}
