//! Splitpay API client.
//!
//! Typed wrappers for the authentication and push-token endpoints. Every
//! request goes through the [`HttpClient`] seam and carries the bound user
//! id in [`USER_ID_HEADER`] when the [`IdentityBinder`] holds one.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::binder::IdentityBinder;
use super::session::{deserialize_id, Session};
use crate::traits::{Headers, HttpClient, HttpError, PushToken, Response};

/// Default URL for the Splitpay API.
pub const DEFAULT_API_URL: &str = "https://api.splitpay.app";

/// Header carrying the bound user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

const LOGIN_PATH: &str = "/api/auth/login";
const GOOGLE_PATH: &str = "/api/auth/google";
const REGISTER_PATH: &str = "/api/auth/register";
const FORGOT_PASSWORD_PATH: &str = "/api/auth/forgot-password";
const PUSH_TOKEN_PATH: &str = "/api/users/push-token";

/// Error type for API client operations.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    /// The server answered with a non-2xx status.
    #[error("server rejected request ({status})")]
    Rejected { status: u16, message: Option<String> },

    /// A 2xx response whose body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// The server-provided message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status for rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub phone: &'a str,
    pub upi_id: &'a str,
}

/// Response carrying a user record (login and Google exchange).
#[derive(Debug, Clone, Deserialize)]
struct UserEnvelope {
    #[serde(default)]
    user: Option<Session>,
}

/// Response from `POST /api/auth/register`.
#[derive(Debug, Clone, Deserialize)]
struct RegisterResponse {
    #[serde(rename = "userId", deserialize_with = "deserialize_id")]
    user_id: String,
}

/// Pull a human message out of an error body: `message`, then `error`.
pub fn extract_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

/// Client for the Splitpay API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    binder: IdentityBinder,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("bound_id", &self.binder.bound_id())
            .finish()
    }
}

impl ApiClient {
    /// Create a client against `base_url` with a fresh, unbound binder.
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        Self::with_binder(base_url, http, IdentityBinder::new())
    }

    /// Create a client sharing an existing binder.
    pub fn with_binder(
        base_url: impl Into<String>,
        http: Arc<dyn HttpClient>,
        binder: IdentityBinder,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            binder,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The binder whose id is stamped onto each request.
    pub fn binder(&self) -> &IdentityBinder {
        &self.binder
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(user_id: Option<String>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(id) = user_id {
            headers.insert(USER_ID_HEADER.to_string(), id);
        }
        headers
    }

    /// POST a JSON body as the currently bound user.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        self.post_json_with(path, body, Self::headers(self.binder.bound_id()))
            .await
    }

    /// POST a JSON body, turning non-2xx statuses into [`ApiError::Rejected`].
    async fn post_json_with<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        headers: Headers,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        let body = serde_json::to_string(body)
            .map_err(|e| ApiError::InvalidResponse(format!("failed to encode request: {}", e)))?;

        tracing::debug!("POST {}", url);
        let response = self.http.post(&url, &body, &headers).await?;

        if !response.is_success() {
            let message = extract_message(&response.body);
            tracing::debug!(status = response.status, "POST {} rejected", path);
            return Err(ApiError::Rejected {
                status: response.status,
                message,
            });
        }

        Ok(response)
    }

    fn parse_user(response: &Response) -> Result<Session, ApiError> {
        let envelope: UserEnvelope = response
            .json()
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        envelope
            .user
            .ok_or_else(|| ApiError::InvalidResponse("response has no user".to_string()))
    }

    /// Sign in with email and password.
    ///
    /// POST /api/auth/login
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self.post_json(LOGIN_PATH, &body).await?;
        Self::parse_user(&response)
    }

    /// Exchange a Google ID token for a user record.
    ///
    /// POST /api/auth/google
    pub async fn google_login(&self, id_token: &str) -> Result<Session, ApiError> {
        let body = serde_json::json!({ "idToken": id_token });
        let response = self.post_json(GOOGLE_PATH, &body).await?;
        Self::parse_user(&response)
    }

    /// Create an account. Returns the new user id.
    ///
    /// POST /api/auth/register
    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<String, ApiError> {
        let response = self.post_json(REGISTER_PATH, request).await?;
        let data: RegisterResponse = response
            .json()
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(data.user_id)
    }

    /// Ask the server to send a password reset email.
    ///
    /// POST /api/auth/forgot-password
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "email": email });
        self.post_json(FORGOT_PASSWORD_PATH, &body).await?;
        Ok(())
    }

    /// Upload the device push token for `user_id`.
    ///
    /// The id is sent as given, not read from the binder, so the caller
    /// decides which user owns the token.
    ///
    /// POST /api/users/push-token
    pub async fn register_push_token(
        &self,
        token: &PushToken,
        user_id: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({ "token": token });
        self.post_json_with(PUSH_TOKEN_PATH, &body, Self::headers(Some(user_id.to_string())))
            .await?;
        Ok(())
    }
}
