//! Authentication failure types.
//!
//! Every identity-establishing operation reports failure as an
//! [`AuthFailure`]: a [`FailureKind`] for handling decisions plus the
//! message shown to the user.

use std::fmt;

/// Fixed vocabulary for outcomes of the OS-level sign-in flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderReason {
    Cancelled,
    AlreadyInProgress,
    ServicesUnavailable,
    GenericFailure,
}

impl ProviderReason {
    /// Stable machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderReason::Cancelled => "cancelled",
            ProviderReason::AlreadyInProgress => "already-in-progress",
            ProviderReason::ServicesUnavailable => "services-unavailable",
            ProviderReason::GenericFailure => "generic-failure",
        }
    }

    /// Message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ProviderReason::Cancelled => "Sign in cancelled",
            ProviderReason::AlreadyInProgress => "Sign in already in progress",
            ProviderReason::ServicesUnavailable => "Google Play Services not available",
            ProviderReason::GenericFailure => "Google sign in failed",
        }
    }
}

/// Classification of an authentication failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Input rejected before any network call.
    Validation,
    /// The server declined the credentials or request.
    CredentialRejected,
    /// The OS-level sign-in flow did not produce a token.
    Provider(ProviderReason),
    /// The request never got a response.
    Transport,
    /// The session record could not be written; nothing was applied.
    Persistence,
    /// Another identity-establishing operation is in flight.
    InProgress,
    /// A sign-out completed while this operation was in flight.
    Interrupted,
}

impl FailureKind {
    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FailureKind::Validation => "E_AUTH_VALIDATION",
            FailureKind::CredentialRejected => "E_AUTH_REJECTED",
            FailureKind::Provider(ProviderReason::Cancelled) => "E_AUTH_PROVIDER_CANCELLED",
            FailureKind::Provider(ProviderReason::AlreadyInProgress) => "E_AUTH_PROVIDER_BUSY",
            FailureKind::Provider(ProviderReason::ServicesUnavailable) => {
                "E_AUTH_PROVIDER_UNAVAILABLE"
            }
            FailureKind::Provider(ProviderReason::GenericFailure) => "E_AUTH_PROVIDER",
            FailureKind::Transport => "E_AUTH_TRANSPORT",
            FailureKind::Persistence => "E_AUTH_PERSIST",
            FailureKind::InProgress => "E_AUTH_IN_PROGRESS",
            FailureKind::Interrupted => "E_AUTH_INTERRUPTED",
        }
    }
}

/// A failed authentication operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl AuthFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Validation, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(FailureKind::CredentialRejected, message)
    }

    pub fn provider(reason: ProviderReason) -> Self {
        Self::new(FailureKind::Provider(reason), reason.user_message())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Transport, message)
    }

    pub fn persistence() -> Self {
        Self::new(
            FailureKind::Persistence,
            "Could not save your session. Please try again.",
        )
    }

    pub fn in_progress() -> Self {
        Self::new(FailureKind::InProgress, "Sign in already in progress")
    }

    pub fn interrupted() -> Self {
        Self::new(FailureKind::Interrupted, "Sign in interrupted by sign out")
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AuthFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_reason_vocabulary() {
        assert_eq!(ProviderReason::Cancelled.as_str(), "cancelled");
        assert_eq!(ProviderReason::AlreadyInProgress.as_str(), "already-in-progress");
        assert_eq!(ProviderReason::ServicesUnavailable.as_str(), "services-unavailable");
        assert_eq!(ProviderReason::GenericFailure.as_str(), "generic-failure");
    }

    #[test]
    fn test_provider_failure_message() {
        let failure = AuthFailure::provider(ProviderReason::Cancelled);
        assert_eq!(failure.message, "Sign in cancelled");
        assert_eq!(failure.to_string(), "Sign in cancelled");
        assert_eq!(failure.error_code(), "E_AUTH_PROVIDER_CANCELLED");
    }

    #[test]
    fn test_in_progress_matches_provider_wording() {
        assert_eq!(
            AuthFailure::in_progress().message,
            ProviderReason::AlreadyInProgress.user_message()
        );
    }
}
