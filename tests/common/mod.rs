//! Common test utilities for integration tests.
//!
//! This module provides reusable fixtures, a wired-up controller harness
//! and helper functions for integration testing the session core.
//!
//! # Example
//!
//! ```ignore
//! use common::{TestHarness, mock_login};
//!
//! let h = TestHarness::new();
//! mock_login(&h.http, "user-1");
//! assert!(h.controller.sign_in("user-1@example.com", "pw").await.is_success());
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use splitpay::adapters::mock::{InMemorySessionStore, MockGoogleSdk, MockHttpClient, MockResponse};
use splitpay::auth::{ApiClient, Session, SessionController};
use splitpay::traits::SessionStore;

pub const BASE_URL: &str = "https://api.splitpay.test";

pub fn url(path: &str) -> String {
    format!("{}{}", BASE_URL, path)
}

/// A session fixture whose email is derived from the id.
pub fn test_session(id: &str) -> Session {
    Session::new(id, format!("User {}", id), format!("{}@example.com", id))
}

/// The JSON body the login and Google endpoints return for `id`.
pub fn user_body(id: &str) -> serde_json::Value {
    let session = test_session(id);
    serde_json::json!({"user": {"id": session.id, "name": session.name, "email": session.email}})
}

/// Make the password login endpoint accept and return `id`.
pub fn mock_login(http: &MockHttpClient, id: &str) {
    http.set_response(&url("/api/auth/login"), MockResponse::json(200, user_body(id)));
}

/// Make the Google exchange endpoint return `id`.
pub fn mock_google_exchange(http: &MockHttpClient, id: &str) {
    http.set_response(&url("/api/auth/google"), MockResponse::json(200, user_body(id)));
}

/// Poll `check` until it holds or a second passes.
pub async fn wait_until<F>(mut check: F)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    while !check() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met within 1s"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Await `fut` with a generous timeout so a hang fails the test.
pub async fn within<F: Future>(fut: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(2), fut)
        .await
        .expect("operation timed out")
}

/// A controller wired to mocks, with handles to every mock.
pub struct TestHarness {
    pub controller: Arc<SessionController>,
    pub store: InMemorySessionStore,
    pub http: MockHttpClient,
    pub google: MockGoogleSdk,
    pub api: ApiClient,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_store(InMemorySessionStore::new())
    }

    pub fn with_store(store: InMemorySessionStore) -> Self {
        let http = MockHttpClient::new();
        let google = MockGoogleSdk::new();
        let api = ApiClient::new(BASE_URL, Arc::new(http.clone()));
        let controller = build_controller(Arc::new(store.clone()), api.clone(), google.clone());
        Self {
            controller,
            store,
            http,
            google,
            api,
        }
    }

    /// A harness over an arbitrary store; `store` handle is a fresh unused
    /// in-memory store.
    pub fn with_custom_store(custom: Arc<dyn SessionStore>) -> Self {
        let http = MockHttpClient::new();
        let google = MockGoogleSdk::new();
        let api = ApiClient::new(BASE_URL, Arc::new(http.clone()));
        let controller = build_controller(custom, api.clone(), google.clone());
        Self {
            controller,
            store: InMemorySessionStore::new(),
            http,
            google,
            api,
        }
    }

    pub fn bound_id(&self) -> Option<String> {
        self.controller.binder().bound_id()
    }
}

pub fn build_controller(
    store: Arc<dyn SessionStore>,
    api: ApiClient,
    google: MockGoogleSdk,
) -> Arc<SessionController> {
    Arc::new(
        SessionController::builder()
            .store(store)
            .api(api)
            .google(Arc::new(google))
            .build()
            .expect("all dependencies supplied"),
    )
}
