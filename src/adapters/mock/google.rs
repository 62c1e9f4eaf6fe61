//! Mock Google sign-in SDK for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::traits::{GoogleAccount, GoogleSdkError, GoogleSignInSdk};

/// Configurable Google SDK double.
///
/// By default services are available and sign-in returns an account with
/// the ID token `google-id-token`.
#[derive(Debug, Clone)]
pub struct MockGoogleSdk {
    availability: Arc<Mutex<Result<(), GoogleSdkError>>>,
    sign_in_result: Arc<Mutex<Result<GoogleAccount, GoogleSdkError>>>,
    sign_in_calls: Arc<Mutex<usize>>,
    sign_out_calls: Arc<Mutex<usize>>,
}

impl MockGoogleSdk {
    pub fn new() -> Self {
        Self {
            availability: Arc::new(Mutex::new(Ok(()))),
            sign_in_result: Arc::new(Mutex::new(Ok(GoogleAccount {
                id_token: Some("google-id-token".to_string()),
                email: Some("g@x.com".to_string()),
            }))),
            sign_in_calls: Arc::new(Mutex::new(0)),
            sign_out_calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Make the availability check fail.
    pub fn set_unavailable(&self, err: GoogleSdkError) {
        *self.availability.lock().unwrap() = Err(err);
    }

    /// Configure what the interactive sign-in returns.
    pub fn set_sign_in_result(&self, result: Result<GoogleAccount, GoogleSdkError>) {
        *self.sign_in_result.lock().unwrap() = result;
    }

    pub fn sign_in_calls(&self) -> usize {
        *self.sign_in_calls.lock().unwrap()
    }

    pub fn sign_out_calls(&self) -> usize {
        *self.sign_out_calls.lock().unwrap()
    }
}

impl Default for MockGoogleSdk {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GoogleSignInSdk for MockGoogleSdk {
    async fn check_availability(&self) -> Result<(), GoogleSdkError> {
        self.availability.lock().unwrap().clone()
    }

    async fn sign_in(&self) -> Result<GoogleAccount, GoogleSdkError> {
        *self.sign_in_calls.lock().unwrap() += 1;
        self.sign_in_result.lock().unwrap().clone()
    }

    async fn sign_out(&self) -> Result<(), GoogleSdkError> {
        *self.sign_out_calls.lock().unwrap() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::GoogleErrorCode;

    #[tokio::test]
    async fn test_defaults() {
        let sdk = MockGoogleSdk::new();
        assert!(sdk.check_availability().await.is_ok());
        let account = sdk.sign_in().await.unwrap();
        assert_eq!(account.id_token.as_deref(), Some("google-id-token"));
        assert_eq!(sdk.sign_in_calls(), 1);
    }

    #[tokio::test]
    async fn test_configured_failures() {
        let sdk = MockGoogleSdk::new();
        sdk.set_unavailable(GoogleSdkError::services_unavailable());
        sdk.set_sign_in_result(Err(GoogleSdkError::cancelled()));

        assert_eq!(
            sdk.check_availability().await.unwrap_err().code,
            GoogleErrorCode::PlayServicesNotAvailable
        );
        assert_eq!(
            sdk.sign_in().await.unwrap_err().code,
            GoogleErrorCode::SignInCancelled
        );
    }
}
