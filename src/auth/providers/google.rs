//! Google sign-in: OS account picker, then token exchange with the API.

use std::sync::Arc;

use super::api_failure;
use crate::auth::api::ApiClient;
use crate::auth::session::Session;
use crate::error::{AuthFailure, FailureKind, ProviderReason};
use crate::traits::{GoogleErrorCode, GoogleSdkError, GoogleSignInSdk};

const DEFAULT_MESSAGE: &str = "Google sign in failed";

/// Shown when the SDK completes without handing back an ID token.
pub const NO_ID_TOKEN_MESSAGE: &str = "No ID token received from Google";

/// Runs the Google flow and exchanges the resulting ID token.
#[derive(Clone)]
pub struct GoogleProvider {
    sdk: Arc<dyn GoogleSignInSdk>,
    api: ApiClient,
}

impl std::fmt::Debug for GoogleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleProvider").field("api", &self.api).finish()
    }
}

fn reason_for(err: &GoogleSdkError) -> ProviderReason {
    match err.code {
        GoogleErrorCode::SignInCancelled => ProviderReason::Cancelled,
        GoogleErrorCode::InProgress => ProviderReason::AlreadyInProgress,
        GoogleErrorCode::PlayServicesNotAvailable => ProviderReason::ServicesUnavailable,
        GoogleErrorCode::Other(_) => ProviderReason::GenericFailure,
    }
}

fn sdk_failure(err: GoogleSdkError) -> AuthFailure {
    let reason = reason_for(&err);
    tracing::info!(reason = reason.as_str(), "Google sign-in did not complete: {}", err);
    AuthFailure::provider(reason)
}

impl GoogleProvider {
    pub fn new(sdk: Arc<dyn GoogleSignInSdk>, api: ApiClient) -> Self {
        Self { sdk, api }
    }

    /// Check services, run the interactive flow, exchange the token.
    pub async fn authenticate(&self) -> Result<Session, AuthFailure> {
        self.sdk.check_availability().await.map_err(sdk_failure)?;

        let account = self.sdk.sign_in().await.map_err(sdk_failure)?;
        let id_token = match account.id_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => {
                tracing::warn!("Google sign-in returned no ID token");
                return Err(AuthFailure::new(
                    FailureKind::Provider(ProviderReason::GenericFailure),
                    NO_ID_TOKEN_MESSAGE,
                ));
            }
        };

        let session = self
            .api
            .google_login(&id_token)
            .await
            .map_err(|e| api_failure(e, DEFAULT_MESSAGE))?;

        if !session.is_valid() {
            tracing::warn!("Google exchange returned a user without an id");
            return Err(AuthFailure::rejected(DEFAULT_MESSAGE));
        }
        Ok(session)
    }

    /// Sign out of the SDK so the next sign-in shows the account picker.
    /// Failures are logged only.
    pub async fn sign_out(&self) {
        if let Err(e) = self.sdk.sign_out().await {
            tracing::warn!("Google sign-out failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockGoogleSdk, MockHttpClient, MockResponse};
    use crate::traits::GoogleAccount;

    fn provider() -> (GoogleProvider, MockGoogleSdk, MockHttpClient) {
        let sdk = MockGoogleSdk::new();
        let http = MockHttpClient::new();
        let api = ApiClient::new("https://api.test", Arc::new(http.clone()));
        (GoogleProvider::new(Arc::new(sdk.clone()), api), sdk, http)
    }

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(reason_for(&GoogleSdkError::cancelled()), ProviderReason::Cancelled);
        assert_eq!(
            reason_for(&GoogleSdkError::in_progress()),
            ProviderReason::AlreadyInProgress
        );
        assert_eq!(
            reason_for(&GoogleSdkError::services_unavailable()),
            ProviderReason::ServicesUnavailable
        );
        assert_eq!(
            reason_for(&GoogleSdkError::new(
                GoogleErrorCode::Other("DEVELOPER_ERROR".to_string()),
                "bad config"
            )),
            ProviderReason::GenericFailure
        );
    }

    #[tokio::test]
    async fn test_unavailable_short_circuits() {
        let (provider, sdk, http) = provider();
        sdk.set_unavailable(GoogleSdkError::services_unavailable());

        let err = provider.authenticate().await.unwrap_err();
        assert_eq!(err.message, "Google Play Services not available");
        assert_eq!(sdk.sign_in_calls(), 0);
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled() {
        let (provider, sdk, http) = provider();
        sdk.set_sign_in_result(Err(GoogleSdkError::cancelled()));

        let err = provider.authenticate().await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Provider(ProviderReason::Cancelled));
        assert_eq!(err.message, "Sign in cancelled");
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_id_token() {
        let (provider, sdk, _http) = provider();
        sdk.set_sign_in_result(Ok(GoogleAccount {
            id_token: None,
            email: Some("g@x.com".to_string()),
        }));

        let err = provider.authenticate().await.unwrap_err();
        assert_eq!(err.message, NO_ID_TOKEN_MESSAGE);
    }

    #[tokio::test]
    async fn test_exchange() {
        let (provider, _sdk, http) = provider();
        http.set_default_response(MockResponse::json(
            200,
            serde_json::json!({"user": {"id": "g-1", "name": "G", "email": "g@x.com"}}),
        ));

        let session = provider.authenticate().await.unwrap();
        assert_eq!(session.id, "g-1");
        assert_eq!(
            http.requests_to("/api/auth/google")[0].json()["idToken"],
            "google-id-token"
        );
    }

    #[tokio::test]
    async fn test_exchange_rejected_uses_server_message() {
        let (provider, _sdk, http) = provider();
        http.set_default_response(MockResponse::json(
            403,
            serde_json::json!({"error": "Account disabled"}),
        ));

        let err = provider.authenticate().await.unwrap_err();
        assert_eq!(err.kind, FailureKind::CredentialRejected);
        assert_eq!(err.message, "Account disabled");
    }
}
