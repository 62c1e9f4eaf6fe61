//! Google sign-in SDK trait abstraction.
//!
//! Models the OS-level Google sign-in flow: an availability check, an
//! interactive sign-in that yields an ID token, and a fixed error-code
//! vocabulary for cancellation, re-entrancy and missing services.

use async_trait::async_trait;
use thiserror::Error;

/// Error codes reported by the platform sign-in SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoogleErrorCode {
    /// The user dismissed the account picker.
    SignInCancelled,
    /// Another sign-in flow is already running.
    InProgress,
    /// Play Services (or the platform equivalent) are missing or outdated.
    PlayServicesNotAvailable,
    /// Anything else the SDK reports, kept verbatim for logging.
    Other(String),
}

/// An error surfaced by the platform sign-in SDK.
#[derive(Debug, Clone, Error)]
#[error("Google sign-in SDK error ({code:?}): {message}")]
pub struct GoogleSdkError {
    pub code: GoogleErrorCode,
    pub message: String,
}

impl GoogleSdkError {
    pub fn new(code: GoogleErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(GoogleErrorCode::SignInCancelled, "user cancelled the sign-in flow")
    }

    pub fn in_progress() -> Self {
        Self::new(GoogleErrorCode::InProgress, "sign-in already in progress")
    }

    pub fn services_unavailable() -> Self {
        Self::new(
            GoogleErrorCode::PlayServicesNotAvailable,
            "play services not available or outdated",
        )
    }
}

/// Result of a completed interactive sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoogleAccount {
    /// ID token to exchange with the server. The SDK may omit it when the
    /// app is misconfigured.
    pub id_token: Option<String>,
    /// Email of the chosen account, for logging only.
    pub email: Option<String>,
}

/// Trait for the platform Google sign-in SDK.
#[async_trait]
pub trait GoogleSignInSdk: Send + Sync {
    /// Confirm that the platform sign-in services are usable.
    async fn check_availability(&self) -> Result<(), GoogleSdkError>;

    /// Run the interactive sign-in flow.
    async fn sign_in(&self) -> Result<GoogleAccount, GoogleSdkError>;

    /// Forget the signed-in account so the next sign-in shows the picker.
    async fn sign_out(&self) -> Result<(), GoogleSdkError>;
}
