//! Concrete implementations of trait abstractions.
//!
//! This module provides production adapters implementing the traits defined
//! in `crate::traits`.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileSessionStore`] - File-based session record storage
//! - [`UnavailableGoogleSdk`] / [`HeadlessPushPlatform`] - Platform stand-ins
//!   for hosts without mobile SDKs
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for every trait.

pub mod file_session_store;
pub mod headless;
pub mod mock;
pub mod reqwest_http;

pub use file_session_store::FileSessionStore;
pub use headless::{HeadlessPushPlatform, UnavailableGoogleSdk};
pub use mock::{InMemorySessionStore, MockGoogleSdk, MockHttpClient, MockPushPlatform};
pub use reqwest_http::ReqwestHttpClient;
