//! Wiring for the session core.
//!
//! Assembles the store, HTTP transport, API client, session controller and
//! push registrar from a [`ClientConfig`] plus the platform SDKs.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::config::ClientConfig;
use crate::adapters::{FileSessionStore, ReqwestHttpClient};
use crate::auth::{ApiClient, SessionController};
use crate::error::ConfigError;
use crate::notifications::{NotificationRegistrar, RegistrarConfig};
use crate::traits::{GoogleSignInSdk, HttpClient, PushPlatform, SessionStore};

/// How long shutdown waits for the registrar to drain.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// The assembled session core.
pub struct ClientServices {
    pub controller: Arc<SessionController>,
    pub api: ApiClient,
    pub registrar: Option<Arc<NotificationRegistrar>>,
    registrar_handle: Option<JoinHandle<()>>,
}

impl ClientServices {
    /// Build with the production store and HTTP transport.
    ///
    /// Must be called inside a tokio runtime.
    pub fn build(
        config: &ClientConfig,
        google: Arc<dyn GoogleSignInSdk>,
        push: Arc<dyn PushPlatform>,
    ) -> Result<Self, ConfigError> {
        let data_dir = config.resolve_data_dir()?;
        let store = FileSessionStore::in_dir(&data_dir);
        tracing::debug!("Session record at {}", store.path().display());

        let http = ReqwestHttpClient::with_timeout(config.request_timeout())
            .map_err(|e| ConfigError::Http(e.to_string()))?;

        Self::with_parts(config, Arc::new(store), Arc::new(http), google, push)
    }

    /// Build from explicit parts. The registrar subscribes before anything
    /// can publish, so it sees the bootstrap transition.
    ///
    /// Must be called inside a tokio runtime.
    pub fn with_parts(
        config: &ClientConfig,
        store: Arc<dyn SessionStore>,
        http: Arc<dyn HttpClient>,
        google: Arc<dyn GoogleSignInSdk>,
        push: Arc<dyn PushPlatform>,
    ) -> Result<Self, ConfigError> {
        let api = ApiClient::new(config.api_base_url.as_str(), http);
        let controller = Arc::new(
            SessionController::builder()
                .store(store)
                .api(api.clone())
                .google(google)
                .build()?,
        );

        let (registrar, registrar_handle) = match &config.push_project_id {
            Some(project_id) => {
                let registrar = Arc::new(NotificationRegistrar::new(
                    push,
                    api.clone(),
                    RegistrarConfig::new(project_id.as_str())
                        .with_register_on_restore(config.register_on_restore),
                ));
                let handle = registrar.clone().spawn(controller.subscribe());
                (Some(registrar), Some(handle))
            }
            None => {
                tracing::debug!("Push registration disabled: no project id configured");
                (None, None)
            }
        };

        Ok(Self {
            controller,
            api,
            registrar,
            registrar_handle,
        })
    }

    /// Run the one-time session restore.
    pub async fn start(&self) {
        self.controller.bootstrap().await;
    }

    /// Drop the controller and wait briefly for the registrar to finish
    /// its current attempt.
    pub async fn shutdown(self) {
        let ClientServices {
            controller,
            registrar_handle,
            ..
        } = self;
        drop(controller);

        let Some(mut handle) = registrar_handle else {
            return;
        };
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, &mut handle).await {
            Ok(Ok(())) => tracing::debug!("Push registrar stopped"),
            Ok(Err(e)) => tracing::warn!("Push registrar task failed: {}", e),
            Err(_) => {
                tracing::warn!("Push registrar did not stop in time; aborting");
                handle.abort();
            }
        }
    }
}
