//! Error types for the session core.
//!
//! - [`AuthFailure`] / [`FailureKind`] / [`ProviderReason`]: the failure
//!   taxonomy carried by every `AuthResult`
//! - [`ConfigError`]: wiring and configuration problems, raised at the call
//!   site that assembles the core
//!
//! Seam-specific errors (`HttpError`, `StoreError`, `GoogleSdkError`,
//! `PushError`) live next to their traits in `crate::traits`, and
//! `ApiError` next to the API client.

mod auth;
mod config;

pub use auth::{AuthFailure, FailureKind, ProviderReason};
pub use config::ConfigError;
