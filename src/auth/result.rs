//! The uniform outcome of identity-establishing operations.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::{AuthFailure, FailureKind};

/// Outcome of `sign_in`, `sign_in_with_google`, `sign_up` and
/// `forgot_password`. Failures are values, never panics.
///
/// Serializes to `{"success":true}` or `{"success":false,"error":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Success,
    Failure(AuthFailure),
}

impl AuthResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthResult::Success)
    }

    /// The user-facing error message, if this is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            AuthResult::Success => None,
            AuthResult::Failure(failure) => Some(&failure.message),
        }
    }

    pub fn failure(&self) -> Option<&AuthFailure> {
        match self {
            AuthResult::Success => None,
            AuthResult::Failure(failure) => Some(failure),
        }
    }

    pub fn kind(&self) -> Option<FailureKind> {
        self.failure().map(|f| f.kind)
    }
}

impl From<AuthFailure> for AuthResult {
    fn from(failure: AuthFailure) -> Self {
        AuthResult::Failure(failure)
    }
}

impl<T> From<Result<T, AuthFailure>> for AuthResult {
    fn from(result: Result<T, AuthFailure>) -> Self {
        match result {
            Ok(_) => AuthResult::Success,
            Err(failure) => AuthResult::Failure(failure),
        }
    }
}

impl Serialize for AuthResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AuthResult::Success => {
                let mut state = serializer.serialize_struct("AuthResult", 1)?;
                state.serialize_field("success", &true)?;
                state.end()
            }
            AuthResult::Failure(failure) => {
                let mut state = serializer.serialize_struct("AuthResult", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", &failure.message)?;
                state.end()
            }
        }
    }
}
