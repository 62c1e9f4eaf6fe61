//! Push notification registration.
//!
//! After each sign-in the [`NotificationRegistrar`] asks the device for a
//! push token and uploads it for the signed-in user. Everything here is
//! best-effort: failures are logged and never reach the sign-in result.

mod registrar;

pub use registrar::{
    NotificationRegistrar, RegistrarConfig, RegistrationOutcome, SkipReason,
};
