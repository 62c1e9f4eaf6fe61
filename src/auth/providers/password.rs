//! Email and password sign-in.

use super::{api_failure, validate_email, validate_password};
use crate::auth::api::ApiClient;
use crate::auth::session::Session;
use crate::error::AuthFailure;

const DEFAULT_MESSAGE: &str = "Login failed";

/// Validates email/password credentials against the API.
#[derive(Debug, Clone)]
pub struct PasswordProvider {
    api: ApiClient,
}

impl PasswordProvider {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Session, AuthFailure> {
        validate_email(email)?;
        validate_password(password)?;

        let session = self
            .api
            .login(email.trim(), password)
            .await
            .map_err(|e| api_failure(e, DEFAULT_MESSAGE))?;

        if !session.is_valid() {
            tracing::warn!("Login response carried a user without an id");
            return Err(AuthFailure::rejected(DEFAULT_MESSAGE));
        }
        Ok(session)
    }
}
