//! Authentication and session lifecycle.
//!
//! This module provides:
//! - The [`Session`] model and its persisted record form
//! - The [`IdentityBinder`] that stamps the signed-in user onto API requests
//! - The [`ApiClient`] for the auth and push-token endpoints
//! - Identity provider adapters (password, Google, sign-up, password reset)
//! - The [`SessionController`] state machine and its transition events

pub mod api;
pub mod binder;
pub mod controller;
pub mod events;
pub mod providers;
pub mod result;
pub mod session;

pub use api::{ApiClient, ApiError, DEFAULT_API_URL, USER_ID_HEADER};
pub use binder::IdentityBinder;
pub use controller::{AuthSnapshot, SessionController, SessionControllerBuilder, SessionState};
pub use events::{
    create_transition_channel, SessionTransition, SignInMethod, TransitionKind,
    TransitionReceiver, TransitionSender,
};
pub use providers::SignUpProfile;
pub use result::AuthResult;
pub use session::{Session, SESSION_STORAGE_KEY};
