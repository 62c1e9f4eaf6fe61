//! Trait abstractions for dependency injection and testability.
//!
//! Every external collaborator of the session core sits behind one of these
//! traits so the controller can be exercised without a network, a keychain
//! or a phone.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP POST transport
//! - [`SessionStore`] - Persistent storage of the session record
//! - [`GoogleSignInSdk`] - Platform Google sign-in flow
//! - [`PushPlatform`] - Platform notification permissions, channels and tokens

pub mod google;
pub mod http;
pub mod push;
pub mod session_store;

pub use google::{GoogleAccount, GoogleErrorCode, GoogleSdkError, GoogleSignInSdk};
pub use http::{Headers, HttpClient, HttpError, Response};
pub use push::{
    ChannelImportance, DevicePlatform, NotificationChannelConfig, PermissionStatus, PushError,
    PushPlatform, PushToken,
};
pub use session_store::{SessionStore, StoreError};
