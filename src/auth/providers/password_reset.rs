//! Forgot-password requests.
//!
//! 2xx and 4xx answers both count as success so the result never reveals
//! whether an address is registered. Server errors and transport failures
//! are reported.

use super::validate_email;
use crate::auth::api::{ApiClient, ApiError};
use crate::auth::result::AuthResult;
use crate::error::AuthFailure;

/// Shown when the reset request could not be delivered.
pub const RESET_FAILED_MESSAGE: &str = "Unable to send reset email. Please try again.";

#[derive(Debug, Clone)]
pub struct PasswordResetProvider {
    api: ApiClient,
}

impl PasswordResetProvider {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn request_reset(&self, email: &str) -> AuthResult {
        if let Err(failure) = validate_email(email) {
            return failure.into();
        }

        match self.api.forgot_password(email.trim()).await {
            Ok(()) => AuthResult::Success,
            Err(ApiError::Rejected { status, .. }) if status < 500 => {
                tracing::debug!(status, "Reset request answered with a client error");
                AuthResult::Success
            }
            Err(ApiError::InvalidResponse(_)) => AuthResult::Success,
            Err(ApiError::Transport(e)) => {
                tracing::warn!("Reset request failed: {}", e);
                AuthFailure::transport(RESET_FAILED_MESSAGE).into()
            }
            Err(e @ ApiError::Rejected { .. }) => {
                tracing::warn!("Reset request failed: {}", e);
                AuthFailure::rejected(RESET_FAILED_MESSAGE).into()
            }
        }
    }
}
