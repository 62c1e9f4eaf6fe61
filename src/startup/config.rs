//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::file_session_store::DATA_DIR;
use crate::auth::DEFAULT_API_URL;
use crate::error::ConfigError;

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "SPLITPAY_API_URL";
pub const ENV_PUSH_PROJECT_ID: &str = "SPLITPAY_PUSH_PROJECT_ID";
pub const ENV_DATA_DIR: &str = "SPLITPAY_DATA_DIR";
pub const ENV_REQUEST_TIMEOUT: &str = "SPLITPAY_REQUEST_TIMEOUT";

/// Configuration for the session core.
///
/// Use the builder pattern to customize it.
///
/// # Example
///
/// ```ignore
/// use splitpay::startup::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_api_base_url("http://localhost:4000")
///     .with_push_project_id("splitpay-dev");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Splitpay API
    pub api_base_url: String,
    /// Project id push tokens are scoped to; registration is off without one
    pub push_project_id: Option<String>,
    /// Where the session record lives (default: ~/.splitpay)
    pub data_dir: Option<PathBuf>,
    /// Per-request timeout (default: 30)
    pub request_timeout_secs: u64,
    /// Register a push token when a stored session is restored
    pub register_on_restore: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            push_project_id: None,
            data_dir: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            register_on_restore: false,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_push_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.push_project_id = Some(project_id.into());
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_register_on_restore(mut self, enabled: bool) -> Self {
        self.register_on_restore = enabled;
        self
    }

    /// Defaults overridden by `SPLITPAY_*` environment variables.
    /// Empty values are ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = env_value(ENV_API_URL) {
            config = config.with_api_base_url(url);
        }
        if let Some(project_id) = env_value(ENV_PUSH_PROJECT_ID) {
            config = config.with_push_project_id(project_id);
        }
        if let Some(dir) = env_value(ENV_DATA_DIR) {
            config = config.with_data_dir(dir);
        }
        if let Some(raw) = env_value(ENV_REQUEST_TIMEOUT) {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidEnv {
                    name: ENV_REQUEST_TIMEOUT,
                    value: raw,
                })?;
            config = config.with_request_timeout_secs(secs);
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The configured data dir, or `~/.splitpay`.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(DATA_DIR))
                .ok_or(ConfigError::NoDataDir),
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
