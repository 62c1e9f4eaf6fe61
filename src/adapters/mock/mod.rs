//! Mock implementations for testing.
//!
//! This module provides mock implementations of all trait abstractions,
//! enabling unit testing without network access, storage or a device.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses and gates
//! - [`InMemorySessionStore`] - In-memory session record storage
//! - [`MockGoogleSdk`] - Google sign-in SDK with scripted outcomes
//! - [`MockPushPlatform`] - Notification SDK with scripted permission/token

pub mod google;
pub mod http;
pub mod push;
pub mod session_store;

pub use google::MockGoogleSdk;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use push::MockPushPlatform;
pub use session_store::InMemorySessionStore;
