//! Environment-driven client configuration.
//!
//! These tests mutate process environment variables, so each one runs
//! under `#[serial]`.

use std::path::PathBuf;
use std::time::Duration;

use serial_test::serial;
use splitpay::auth::DEFAULT_API_URL;
use splitpay::error::ConfigError;
use splitpay::startup::config::{
    ENV_API_URL, ENV_DATA_DIR, ENV_PUSH_PROJECT_ID, ENV_REQUEST_TIMEOUT,
};
use splitpay::startup::ClientConfig;

const ALL_VARS: [&str; 4] = [
    ENV_API_URL,
    ENV_PUSH_PROJECT_ID,
    ENV_DATA_DIR,
    ENV_REQUEST_TIMEOUT,
];

/// Clears every `SPLITPAY_*` variable on creation and again on drop.
struct EnvGuard;

impl EnvGuard {
    fn new() -> Self {
        clear_env();
        EnvGuard
    }

    fn set(&self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        clear_env();
    }
}

fn clear_env() {
    for name in ALL_VARS {
        std::env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    let _env = EnvGuard::new();

    let config = ClientConfig::from_env().unwrap();

    assert_eq!(config.api_base_url, DEFAULT_API_URL);
    assert!(config.push_project_id.is_none());
    assert!(config.data_dir.is_none());
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
}

#[test]
#[serial]
fn test_from_env_overrides() {
    let env = EnvGuard::new();
    env.set(ENV_API_URL, "http://localhost:4000");
    env.set(ENV_PUSH_PROJECT_ID, "splitpay-dev");
    env.set(ENV_DATA_DIR, "/tmp/splitpay-test");
    env.set(ENV_REQUEST_TIMEOUT, "7");

    let config = ClientConfig::from_env().unwrap();

    assert_eq!(config.api_base_url, "http://localhost:4000");
    assert_eq!(config.push_project_id.as_deref(), Some("splitpay-dev"));
    assert_eq!(
        config.resolve_data_dir().unwrap(),
        PathBuf::from("/tmp/splitpay-test")
    );
    assert_eq!(config.request_timeout(), Duration::from_secs(7));
}

#[test]
#[serial]
fn test_from_env_ignores_blank_values() {
    let env = EnvGuard::new();
    env.set(ENV_API_URL, "");
    env.set(ENV_PUSH_PROJECT_ID, "   ");
    env.set(ENV_REQUEST_TIMEOUT, "");

    let config = ClientConfig::from_env().unwrap();

    assert_eq!(config.api_base_url, DEFAULT_API_URL);
    assert!(config.push_project_id.is_none());
    assert_eq!(config.request_timeout_secs, 30);
}

#[test]
#[serial]
fn test_from_env_rejects_bad_timeout() {
    let env = EnvGuard::new();

    for bad in ["soon", "0", "-5"] {
        env.set(ENV_REQUEST_TIMEOUT, bad);
        match ClientConfig::from_env() {
            Err(ConfigError::InvalidEnv { name, value }) => {
                assert_eq!(name, ENV_REQUEST_TIMEOUT);
                assert_eq!(value, bad);
            }
            other => panic!("expected InvalidEnv for {:?}, got {:?}", bad, other),
        }
    }
}
