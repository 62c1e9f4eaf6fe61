//! Splitpay client session core.
//!
//! Authentication and session lifecycle for the Splitpay shared-expense
//! client: sign-in (password and Google), sign-up, sign-out, password
//! reset, session persistence and push-token registration.
//!
//! This library exposes modules for use by the binary and integration tests.

pub mod adapters;
pub mod auth;
pub mod cli;
pub mod error;
pub mod notifications;
pub mod startup;
pub mod traits;
