//! Platform adapters for hosts without mobile SDKs.
//!
//! The command-line front end runs on desktops where neither Google Play
//! Services nor a push token issuer exist. These adapters report that
//! honestly, so Google sign-in fails with the services-unavailable reason
//! and push registration is skipped as "not a physical device".

use async_trait::async_trait;

use crate::traits::{
    DevicePlatform, GoogleAccount, GoogleSdkError, GoogleSignInSdk, NotificationChannelConfig,
    PermissionStatus, PushError, PushPlatform, PushToken,
};

/// Google SDK stand-in that is never available.
#[derive(Debug, Clone, Default)]
pub struct UnavailableGoogleSdk;

#[async_trait]
impl GoogleSignInSdk for UnavailableGoogleSdk {
    async fn check_availability(&self) -> Result<(), GoogleSdkError> {
        Err(GoogleSdkError::services_unavailable())
    }

    async fn sign_in(&self) -> Result<GoogleAccount, GoogleSdkError> {
        Err(GoogleSdkError::services_unavailable())
    }

    async fn sign_out(&self) -> Result<(), GoogleSdkError> {
        Ok(())
    }
}

/// Push platform for desktop hosts: no channels, no permission, no tokens.
#[derive(Debug, Clone, Default)]
pub struct HeadlessPushPlatform;

#[async_trait]
impl PushPlatform for HeadlessPushPlatform {
    fn platform(&self) -> DevicePlatform {
        DevicePlatform::Desktop
    }

    fn is_physical_device(&self) -> bool {
        false
    }

    async fn ensure_channel(&self, _config: &NotificationChannelConfig) -> Result<(), PushError> {
        Ok(())
    }

    async fn permission_status(&self) -> Result<PermissionStatus, PushError> {
        Ok(PermissionStatus::Denied)
    }

    async fn request_permission(&self) -> Result<PermissionStatus, PushError> {
        Ok(PermissionStatus::Denied)
    }

    async fn device_token(&self, _project_id: &str) -> Result<PushToken, PushError> {
        Err(PushError::Token(
            "push tokens are not issued on desktop hosts".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::GoogleErrorCode;

    #[tokio::test]
    async fn test_google_sdk_unavailable() {
        let sdk = UnavailableGoogleSdk;
        let err = sdk.check_availability().await.unwrap_err();
        assert_eq!(err.code, GoogleErrorCode::PlayServicesNotAvailable);
        assert!(sdk.sign_out().await.is_ok());
    }

    #[tokio::test]
    async fn test_headless_push_platform() {
        let platform = HeadlessPushPlatform;
        assert_eq!(platform.platform(), DevicePlatform::Desktop);
        assert!(!platform.is_physical_device());
        assert_eq!(
            platform.permission_status().await.unwrap(),
            PermissionStatus::Denied
        );
        assert!(platform.device_token("project").await.is_err());
    }
}
