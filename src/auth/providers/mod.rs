//! Identity provider adapters.
//!
//! Each adapter validates input, talks to one identity source and
//! normalizes whatever comes back into a [`Session`] or an [`AuthFailure`].
//! None of them touch session state; the controller does that.
//!
//! [`Session`]: crate::auth::Session

mod google;
mod password;
mod password_reset;
mod sign_up;

pub use google::{GoogleProvider, NO_ID_TOKEN_MESSAGE};
pub use password::PasswordProvider;
pub use password_reset::{PasswordResetProvider, RESET_FAILED_MESSAGE};
pub use sign_up::{SignUpProfile, SignUpProvider};

use super::api::ApiError;
use crate::error::AuthFailure;

/// Shown when a request never reached the server.
pub const TRANSPORT_MESSAGE: &str = "Unable to reach the server. Please try again.";

/// Reject an email before any network call.
pub(crate) fn validate_email(email: &str) -> Result<(), AuthFailure> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthFailure::validation("Email is required"));
    }
    if !email.contains('@') {
        return Err(AuthFailure::validation("Please enter a valid email address"));
    }
    Ok(())
}

pub(crate) fn validate_password(password: &str) -> Result<(), AuthFailure> {
    if password.is_empty() {
        return Err(AuthFailure::validation("Password is required"));
    }
    Ok(())
}

/// Map an API error onto the failure taxonomy.
///
/// Rejections surface the server's message when it sent one; malformed
/// success bodies count as rejections with the endpoint default.
pub(crate) fn api_failure(err: ApiError, default_message: &str) -> AuthFailure {
    match err {
        ApiError::Transport(e) => {
            tracing::warn!("Auth request failed before reaching the server: {}", e);
            AuthFailure::transport(TRANSPORT_MESSAGE)
        }
        ApiError::Rejected { status, message } => {
            tracing::debug!(status, "Auth request rejected");
            AuthFailure::rejected(message.unwrap_or_else(|| default_message.to_string()))
        }
        ApiError::InvalidResponse(reason) => {
            tracing::warn!("Auth response unusable: {}", reason);
            AuthFailure::rejected(default_message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::traits::HttpError;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert_eq!(
            validate_email("   ").unwrap_err().kind,
            FailureKind::Validation
        );
        assert_eq!(
            validate_email("nobody").unwrap_err().message,
            "Please enter a valid email address"
        );
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("x").is_ok());
        assert_eq!(validate_password("").unwrap_err().message, "Password is required");
    }

    #[test]
    fn test_api_failure_mapping() {
        let failure = api_failure(
            ApiError::Rejected {
                status: 401,
                message: Some("Invalid credentials".to_string()),
            },
            "Login failed",
        );
        assert_eq!(failure.kind, FailureKind::CredentialRejected);
        assert_eq!(failure.message, "Invalid credentials");

        let failure = api_failure(
            ApiError::Rejected {
                status: 500,
                message: None,
            },
            "Login failed",
        );
        assert_eq!(failure.message, "Login failed");

        let failure = api_failure(
            ApiError::InvalidResponse("no user".to_string()),
            "Login failed",
        );
        assert_eq!(failure.kind, FailureKind::CredentialRejected);
        assert_eq!(failure.message, "Login failed");

        let failure = api_failure(
            ApiError::Transport(HttpError::Timeout("30s".to_string())),
            "Login failed",
        );
        assert_eq!(failure.kind, FailureKind::Transport);
        assert_eq!(failure.message, TRANSPORT_MESSAGE);
    }
}
