//! Account registration.

use serde::{Deserialize, Serialize};

use super::{api_failure, validate_email, validate_password};
use crate::auth::api::{ApiClient, RegisterRequest};
use crate::auth::session::Session;
use crate::error::AuthFailure;

const DEFAULT_MESSAGE: &str = "Registration failed";

/// Everything the user submits on the sign-up form.
///
/// `phone` and `upi_id` may be empty; they are sent as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpProfile {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub upi_id: String,
}

impl SignUpProfile {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_upi_id(mut self, upi_id: impl Into<String>) -> Self {
        self.upi_id = upi_id.into();
        self
    }
}

/// Registers new accounts.
#[derive(Debug, Clone)]
pub struct SignUpProvider {
    api: ApiClient,
}

impl SignUpProvider {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Register and build the session from the returned id plus the
    /// submitted name and email.
    pub async fn register(&self, profile: &SignUpProfile) -> Result<Session, AuthFailure> {
        if profile.name.trim().is_empty() {
            return Err(AuthFailure::validation("Name is required"));
        }
        validate_email(&profile.email)?;
        validate_password(&profile.password)?;

        let name = profile.name.trim();
        let email = profile.email.trim();
        let request = RegisterRequest {
            name,
            email,
            password: &profile.password,
            phone: &profile.phone,
            upi_id: &profile.upi_id,
        };

        let user_id = self
            .api
            .register(&request)
            .await
            .map_err(|e| api_failure(e, DEFAULT_MESSAGE))?;

        let session = Session::new(user_id, name, email);
        if !session.is_valid() {
            tracing::warn!("Registration response carried an empty user id");
            return Err(AuthFailure::rejected(DEFAULT_MESSAGE));
        }
        Ok(session)
    }
}
